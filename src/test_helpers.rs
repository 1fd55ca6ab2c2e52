//! Shared test utilities for the garage-site test suite.
//!
//! Tests work against the real `content/` directory shipped with the crate,
//! either read in place or copied into a temporary directory they can
//! mutate.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::catalog::{Catalog, parse_catalog};
use crate::config::SiteConfig;
use crate::page::Site;

// =========================================================================
// Fixture setup
// =========================================================================

pub fn content_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("content")
}

/// Copy `content/` to a temp directory and return it.
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&content_dir(), tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Catalog sources
// =========================================================================

pub fn stock_catalog_toml() -> String {
    std::fs::read_to_string(content_dir().join("catalog.toml")).unwrap()
}

/// The stock catalog with its services replaced by `services` (TOML
/// `[[services]]` tables). Services are the last tables of the file.
pub fn catalog_with_services(services: &str) -> String {
    let stock = stock_catalog_toml();
    let head = stock
        .find("\n[[services]]")
        .map(|pos| &stock[..pos])
        .unwrap_or(&stock);
    format!("{head}\n{services}")
}

pub fn stock_catalog() -> Catalog {
    parse_catalog(&stock_catalog_toml()).unwrap().0
}

pub fn stock_site() -> Site {
    let (catalog, report) = parse_catalog(&stock_catalog_toml()).unwrap();
    Site {
        config: SiteConfig::default(),
        catalog,
        report,
    }
}
