//! CLI for the MDR media derivative resolver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use mdr_core::config;
use mdr_core::resolution::FixedAxis;
use mdr_core::service::ResolveMode;
use std::path::PathBuf;
use std::sync::Arc;

use commands::{build_service, load_catalog, run_catalog, run_image, run_still, run_thumbnail};

/// Top-level CLI for the MDR media derivative resolver.
#[derive(Debug, Parser)]
#[command(name = "mdr")]
#[command(about = "MDR: resolve media derivatives (thumbnails, resizes, video stills)", long_about = None)]
pub struct Cli {
    /// Path to the catalog file (defaults to the configured path).
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Which dimension the --size value fixes; the other one follows the
/// original aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AxisArg {
    Width,
    Height,
}

impl From<AxisArg> for FixedAxis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::Width => FixedAxis::Width,
            AxisArg::Height => FixedAxis::Height,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print or resolve the thumbnail URL of a catalog entry.
    Thumbnail {
        /// Catalog entry: a document name, or "document/attachment".
        name: String,

        /// Thumbnail edge length in pixels (16..=256; thumbnails are quadratic).
        #[arg(long, default_value = "128")]
        size: u32,

        /// Contact the service and print the real derivative URL instead of
        /// the request URL.
        #[arg(long)]
        resolve: bool,
    },

    /// Print or resolve an aspect-preserving image resize URL.
    Image {
        /// Catalog entry: a document name, or "document/attachment".
        name: String,

        /// Pixel size of the fixed dimension.
        #[arg(long)]
        size: u32,

        /// Which dimension --size fixes.
        #[arg(long, value_enum, default_value = "width")]
        fixed: AxisArg,

        /// Contact the service and print the real derivative URL instead of
        /// the request URL.
        #[arg(long)]
        resolve: bool,
    },

    /// Print or resolve a video still URL.
    Still {
        /// Catalog entry: a document name, or "document/attachment".
        name: String,

        /// Pixel size of the fixed dimension.
        #[arg(long)]
        size: u32,

        /// Which dimension --size fixes.
        #[arg(long, value_enum, default_value = "width")]
        fixed: AxisArg,

        /// Normalized timecode in [0.0, 1.0] (0.5 = middle of the video).
        #[arg(long, default_value = "0.5")]
        time: f32,

        /// Contact the service and print the real derivative URL instead of
        /// the request URL.
        #[arg(long)]
        resolve: bool,
    },

    /// List the documents and attachments in the catalog.
    Catalog,
}

fn mode(resolve: bool) -> ResolveMode {
    if resolve {
        ResolveMode::Resolved
    } else {
        ResolveMode::Immediate
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let catalog = Arc::new(load_catalog(cli.catalog.as_deref(), &cfg)?);

        match cli.command {
            CliCommand::Thumbnail {
                name,
                size,
                resolve,
            } => {
                let service = build_service(&cfg, Arc::clone(&catalog))?;
                run_thumbnail(&service, &catalog, &name, size, mode(resolve))?;
            }
            CliCommand::Image {
                name,
                size,
                fixed,
                resolve,
            } => {
                let service = build_service(&cfg, Arc::clone(&catalog))?;
                run_image(&service, &catalog, &name, size, fixed.into(), mode(resolve))?;
            }
            CliCommand::Still {
                name,
                size,
                fixed,
                time,
                resolve,
            } => {
                let service = build_service(&cfg, Arc::clone(&catalog))?;
                run_still(
                    &service,
                    &catalog,
                    &name,
                    size,
                    fixed.into(),
                    time,
                    mode(resolve),
                )?;
            }
            CliCommand::Catalog => run_catalog(&catalog),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
