//! Typed failure classes for derivative requests.

use crate::catalog::MediaKind;
use thiserror::Error;

/// Failure raised while validating or composing a derivative request.
///
/// All variants except [`DerivativeError::Internal`] are caller errors and
/// are raised synchronously, before any network activity, so immediate-mode
/// callers get fast local feedback and resolved-mode callers avoid wasted
/// round trips. A rejection by the remote service in resolved mode is not an
/// error at all: the service reports it as an absent URL plus a logged
/// diagnostic (see `DerivativeService`). Nothing here is retried.
#[derive(Debug, Error)]
pub enum DerivativeError {
    /// The unique resource URL behind a reference is not a valid absolute URL.
    #[error("invalid resource reference: {reason}")]
    InvalidReference { reason: String },

    /// The referenced document or attachment is absent from the metadata
    /// snapshot observed at call time.
    #[error("resource not found: {url}")]
    NotFound { url: String },

    /// Requested thumbnail size is outside the allowed range.
    #[error("size {size} out of range [{min}, {max}]")]
    SizeOutOfRange { size: u32, min: u32, max: u32 },

    /// Requested image/snapshot size must be positive.
    #[error("size must be positive, got {0}")]
    NonPositiveSize(u32),

    /// Snapshot timecode outside [0.0, 1.0].
    #[error("timecode {0} out of range [0.0, 1.0]")]
    TimeOutOfRange(f32),

    /// The resource's media kind does not match the operation.
    #[error("media kind mismatch: operation requires {expected}, resource is {actual}")]
    MediaKindMismatch {
        expected: MediaKind,
        actual: MediaKind,
    },

    /// The composed request string failed to parse as a URL. Indicates a bug
    /// in request composition, not a user-correctable condition.
    #[error("malformed request URL: {0}")]
    Internal(#[from] url::ParseError),
}
