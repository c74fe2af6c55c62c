//! Metadata lookup: documents, attachments and their media kinds.
//!
//! The derivative service only depends on the [`MetadataLookup`] trait and
//! does not know where the metadata comes from. [`MemoryCatalog`] is the
//! file-backed in-memory implementation used by the CLI and tests.

mod memory;

pub use memory::{CatalogRow, MemoryCatalog};

use crate::error::DerivativeError;
use std::fmt;
use url::Url;

/// Main media classification of a stored resource.
///
/// Derived from the stored MIME type, never from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    /// Classifies a MIME type string by its main type (`"image/png"` -> `Image`).
    pub fn from_mime(mime: &str) -> Self {
        match mime.split('/').next().map(str::trim) {
            Some(main) if main.eq_ignore_ascii_case("image") => MediaKind::Image,
            Some(main) if main.eq_ignore_ascii_case("video") => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Other => write!(f, "other"),
        }
    }
}

/// Identifier of a stored document.
///
/// Wraps the document's stable absolute unique resource URL, which is what
/// gets percent-encoded into processing requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Builds the identifier, validating that `url` is a syntactically valid
    /// absolute URL.
    pub fn new(url: impl Into<String>) -> Result<Self, DerivativeError> {
        let url = url.into();
        validate_resource_url(&url)?;
        Ok(Self(url))
    }

    /// Stable absolute URL naming the underlying stored bytes.
    pub fn unique_resource_url(&self) -> &str {
        &self.0
    }
}

/// Identifier of an attachment within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttachmentId {
    parent: DocumentId,
    url: String,
}

impl AttachmentId {
    /// Builds the identifier, validating that `url` is a syntactically valid
    /// absolute URL.
    pub fn new(parent: DocumentId, url: impl Into<String>) -> Result<Self, DerivativeError> {
        let url = url.into();
        validate_resource_url(&url)?;
        Ok(Self { parent, url })
    }

    /// The document this attachment belongs to.
    pub fn parent(&self) -> &DocumentId {
        &self.parent
    }

    /// Stable absolute URL naming the underlying stored bytes.
    pub fn unique_resource_url(&self) -> &str {
        &self.url
    }
}

fn validate_resource_url(url: &str) -> Result<(), DerivativeError> {
    Url::parse(url).map_err(|e| DerivativeError::InvalidReference {
        reason: format!("{url}: {e}"),
    })?;
    Ok(())
}

/// Closed union over the two resource identifier kinds.
///
/// Both variants expose the shared unique-resource-URL capability, so call
/// sites never downcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    Document(DocumentId),
    Attachment(AttachmentId),
}

impl ResourceRef {
    /// Stable absolute URL naming the underlying stored bytes.
    pub fn unique_resource_url(&self) -> &str {
        match self {
            ResourceRef::Document(id) => id.unique_resource_url(),
            ResourceRef::Attachment(id) => id.unique_resource_url(),
        }
    }
}

impl From<DocumentId> for ResourceRef {
    fn from(id: DocumentId) -> Self {
        ResourceRef::Document(id)
    }
}

impl From<AttachmentId> for ResourceRef {
    fn from(id: AttachmentId) -> Self {
        ResourceRef::Attachment(id)
    }
}

/// Metadata snapshot of an attachment.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub id: AttachmentId,
    pub media_kind: MediaKind,
}

/// Metadata snapshot of a document and its attachments.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    pub media_kind: MediaKind,
    pub attachments: Vec<Attachment>,
}

impl Document {
    /// Finds an attachment of this document by identifier.
    pub fn attachment(&self, id: &AttachmentId) -> Option<&Attachment> {
        self.attachments.iter().find(|a| &a.id == id)
    }
}

/// Read-only metadata lookup consumed by the derivative service.
///
/// Lookups observe a snapshot taken at call time; the backing store may
/// change between two calls. Two concurrent validations can therefore see
/// different metadata states (eventual consistency, accepted race).
pub trait MetadataLookup: Send + Sync {
    /// Current snapshot of a document, or `None` if it does not exist.
    fn document(&self, id: &DocumentId) -> Option<Document>;

    /// Attachment within a previously looked-up document snapshot.
    fn attachment(&self, document: &Document, id: &AttachmentId) -> Option<Attachment> {
        document.attachment(id).cloned()
    }
}
