//! `mdr thumbnail` – thumbnail URL for a catalog entry.

use anyhow::Result;
use mdr_core::catalog::MemoryCatalog;
use mdr_core::service::{DerivativeService, ResolveMode};

use super::{lookup_entry, print_outcome};

pub fn run_thumbnail(
    service: &DerivativeService,
    catalog: &MemoryCatalog,
    name: &str,
    size: u32,
    mode: ResolveMode,
) -> Result<()> {
    let resource = lookup_entry(catalog, name)?;
    let url = service.thumbnail_url(&resource, size, mode)?;
    print_outcome(url)
}
