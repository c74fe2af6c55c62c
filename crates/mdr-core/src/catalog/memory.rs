//! In-memory catalog, loadable from a TOML file.

use super::{Attachment, AttachmentId, Document, DocumentId, MediaKind, MetadataLookup, ResourceRef};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// In-memory metadata catalog.
///
/// Stands in for the platform metadata store. Documents are keyed by their
/// unique resource URL; catalog files additionally assign short names so the
/// CLI can address entries as `doc` or `doc/attachment`.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    documents: HashMap<String, Document>,
    names: HashMap<String, ResourceRef>,
}

/// Row for catalog listings.
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub name: String,
    pub media_kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    documents: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    name: String,
    url: String,
    media: String,
    #[serde(default)]
    attachments: Vec<AttachmentEntry>,
}

#[derive(Debug, Deserialize)]
struct AttachmentEntry {
    name: String,
    url: String,
    media: String,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("read catalog file: {}", path.display()))?;
        Self::from_toml(&data).with_context(|| format!("parse catalog: {}", path.display()))
    }

    /// Builds a catalog from TOML text.
    pub fn from_toml(data: &str) -> Result<Self> {
        let parsed: CatalogFile = toml::from_str(data)?;
        let mut catalog = MemoryCatalog::new();

        for entry in parsed.documents {
            let id = DocumentId::new(&entry.url)
                .with_context(|| format!("document {:?}", entry.name))?;

            let mut attachments = Vec::new();
            for att in &entry.attachments {
                let att_id = AttachmentId::new(id.clone(), &att.url)
                    .with_context(|| format!("attachment {:?}/{:?}", entry.name, att.name))?;
                catalog.names.insert(
                    format!("{}/{}", entry.name, att.name),
                    ResourceRef::Attachment(att_id.clone()),
                );
                attachments.push(Attachment {
                    id: att_id,
                    media_kind: MediaKind::from_mime(&att.media),
                });
            }

            catalog
                .names
                .insert(entry.name.clone(), ResourceRef::Document(id.clone()));
            catalog.insert(Document {
                id,
                media_kind: MediaKind::from_mime(&entry.media),
                attachments,
            });
        }

        Ok(catalog)
    }

    /// Adds or replaces a document snapshot.
    pub fn insert(&mut self, document: Document) {
        self.documents
            .insert(document.id.unique_resource_url().to_string(), document);
    }

    /// Resolves a short name from a catalog file: `doc` or `doc/attachment`.
    pub fn resolve_name(&self, name: &str) -> Option<ResourceRef> {
        self.names.get(name).cloned()
    }

    /// Named entries with their media kinds, sorted by name.
    pub fn rows(&self) -> Vec<CatalogRow> {
        let mut rows: Vec<CatalogRow> = self
            .names
            .iter()
            .filter_map(|(name, reference)| {
                let media_kind = match reference {
                    ResourceRef::Document(id) => {
                        self.documents.get(id.unique_resource_url())?.media_kind
                    }
                    ResourceRef::Attachment(id) => self
                        .documents
                        .get(id.parent().unique_resource_url())?
                        .attachment(id)?
                        .media_kind,
                };
                Some(CatalogRow {
                    name: name.clone(),
                    media_kind,
                    url: reference.unique_resource_url().to_string(),
                })
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }
}

impl MetadataLookup for MemoryCatalog {
    fn document(&self, id: &DocumentId) -> Option<Document> {
        self.documents.get(id.unique_resource_url()).cloned()
    }
}
