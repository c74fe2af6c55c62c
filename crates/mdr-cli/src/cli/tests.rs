//! CLI parse tests.

use super::{AxisArg, Cli, CliCommand};
use clap::Parser;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_thumbnail_defaults() {
    match parse(&["mdr", "thumbnail", "sunset"]) {
        CliCommand::Thumbnail {
            name,
            size,
            resolve,
        } => {
            assert_eq!(name, "sunset");
            assert_eq!(size, 128);
            assert!(!resolve);
        }
        _ => panic!("expected Thumbnail"),
    }
}

#[test]
fn cli_parse_thumbnail_with_size_and_resolve() {
    match parse(&["mdr", "thumbnail", "sunset", "--size", "64", "--resolve"]) {
        CliCommand::Thumbnail {
            name,
            size,
            resolve,
        } => {
            assert_eq!(name, "sunset");
            assert_eq!(size, 64);
            assert!(resolve);
        }
        _ => panic!("expected Thumbnail"),
    }
}

#[test]
fn cli_parse_image() {
    match parse(&[
        "mdr", "image", "sunset", "--size", "640", "--fixed", "height",
    ]) {
        CliCommand::Image {
            name,
            size,
            fixed,
            resolve,
        } => {
            assert_eq!(name, "sunset");
            assert_eq!(size, 640);
            assert_eq!(fixed, AxisArg::Height);
            assert!(!resolve);
        }
        _ => panic!("expected Image"),
    }
}

#[test]
fn cli_parse_image_defaults_to_fixed_width() {
    match parse(&["mdr", "image", "sunset", "--size", "640"]) {
        CliCommand::Image { fixed, .. } => assert_eq!(fixed, AxisArg::Width),
        _ => panic!("expected Image"),
    }
}

#[test]
fn cli_parse_still_with_attachment_name() {
    match parse(&[
        "mdr",
        "still",
        "sunset/clip",
        "--size",
        "720",
        "--time",
        "0.25",
    ]) {
        CliCommand::Still {
            name,
            size,
            fixed,
            time,
            resolve,
        } => {
            assert_eq!(name, "sunset/clip");
            assert_eq!(size, 720);
            assert_eq!(fixed, AxisArg::Width);
            assert!((time - 0.25).abs() < 1e-6);
            assert!(!resolve);
        }
        _ => panic!("expected Still"),
    }
}

#[test]
fn cli_parse_still_default_time_is_middle() {
    match parse(&["mdr", "still", "sunset/clip", "--size", "720"]) {
        CliCommand::Still { time, .. } => assert!((time - 0.5).abs() < 1e-6),
        _ => panic!("expected Still"),
    }
}

#[test]
fn cli_parse_catalog() {
    match parse(&["mdr", "catalog"]) {
        CliCommand::Catalog => {}
        _ => panic!("expected Catalog"),
    }
}

#[test]
fn cli_parse_global_catalog_path() {
    let cli = Cli::try_parse_from(["mdr", "--catalog", "/tmp/cat.toml", "catalog"]).unwrap();
    assert_eq!(
        cli.catalog.as_deref(),
        Some(std::path::Path::new("/tmp/cat.toml"))
    );
}

#[test]
fn cli_image_requires_size() {
    assert!(Cli::try_parse_from(["mdr", "image", "sunset"]).is_err());
}
