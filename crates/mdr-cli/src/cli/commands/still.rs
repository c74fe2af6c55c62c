//! `mdr still` – video still URL for a catalog entry.

use anyhow::Result;
use mdr_core::catalog::MemoryCatalog;
use mdr_core::resolution::FixedAxis;
use mdr_core::service::{DerivativeService, ResolveMode};

use super::{lookup_entry, print_outcome};

pub fn run_still(
    service: &DerivativeService,
    catalog: &MemoryCatalog,
    name: &str,
    size: u32,
    fixed: FixedAxis,
    time: f32,
    mode: ResolveMode,
) -> Result<()> {
    let resource = lookup_entry(catalog, name)?;
    let url = service.video_still_url_at(&resource, size, fixed, time, mode)?;
    print_outcome(url)
}
