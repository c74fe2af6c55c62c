//! `mdr image` – aspect-preserving image resize URL for a catalog entry.

use anyhow::Result;
use mdr_core::catalog::MemoryCatalog;
use mdr_core::resolution::FixedAxis;
use mdr_core::service::{DerivativeService, ResolveMode};

use super::{lookup_entry, print_outcome};

pub fn run_image(
    service: &DerivativeService,
    catalog: &MemoryCatalog,
    name: &str,
    size: u32,
    fixed: FixedAxis,
    mode: ResolveMode,
) -> Result<()> {
    let resource = lookup_entry(catalog, name)?;
    let url = service.image_url(&resource, size, fixed, mode)?;
    print_outcome(url)
}
