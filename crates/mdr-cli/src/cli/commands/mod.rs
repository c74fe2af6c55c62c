//! Command implementations and shared helpers.

mod catalog;
mod image;
mod still;
mod thumbnail;

pub use catalog::run_catalog;
pub use image::run_image;
pub use still::run_still;
pub use thumbnail::run_thumbnail;

use anyhow::{Context, Result};
use mdr_core::catalog::{MemoryCatalog, ResourceRef};
use mdr_core::config::{self, MdrConfig};
use mdr_core::service::DerivativeService;
use mdr_core::transport::CurlTransport;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Loads the catalog from the CLI override, the configured path, or the
/// default location, in that order.
pub fn load_catalog(override_path: Option<&Path>, cfg: &MdrConfig) -> Result<MemoryCatalog> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => match &cfg.catalog_path {
            Some(p) => p.clone(),
            None => config::default_catalog_path()?,
        },
    };
    MemoryCatalog::from_file(&path)
}

/// Builds the derivative service from config, sharing the loaded catalog.
pub fn build_service(cfg: &MdrConfig, catalog: Arc<MemoryCatalog>) -> Result<DerivativeService> {
    Url::parse(&cfg.service_url)
        .with_context(|| format!("invalid service_url in config: {}", cfg.service_url))?;
    let transport = CurlTransport::new(
        Duration::from_secs(cfg.connect_timeout_secs),
        Duration::from_secs(cfg.timeout_secs),
    );
    Ok(DerivativeService::new(
        &cfg.service_url,
        catalog,
        Arc::new(transport),
    ))
}

/// Resolves a catalog entry name ("doc" or "doc/attachment") to a reference.
pub(super) fn lookup_entry(catalog: &MemoryCatalog, name: &str) -> Result<ResourceRef> {
    catalog
        .resolve_name(name)
        .with_context(|| format!("no catalog entry named {name:?}"))
}

/// Prints the resolved URL, or exits with code 2 when the processing service
/// rejected the request (resolved mode), so scripts can branch on it.
pub(super) fn print_outcome(url: Option<Url>) -> Result<()> {
    match url {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => {
            eprintln!("mdr: derivative request rejected by the processing service (see log)");
            std::process::exit(2);
        }
    }
}
