//! `mdr catalog` – list documents and attachments in the catalog.

use mdr_core::catalog::MemoryCatalog;

pub fn run_catalog(catalog: &MemoryCatalog) {
    let rows = catalog.rows();
    if rows.is_empty() {
        println!("Catalog is empty.");
        return;
    }
    println!("{:<24} {:<8} {}", "NAME", "MEDIA", "URL");
    for row in rows {
        println!("{:<24} {:<8} {}", row.name, row.media_kind, row.url);
    }
}
