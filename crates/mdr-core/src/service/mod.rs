//! Derivative service: validation against the metadata lookup and
//! resolution of composed request URLs.
//!
//! Each operation is a single logical call: validate, compose, resolve.
//! Validation is a pure check against the metadata snapshot observed at call
//! time and always happens before any network activity.

#[cfg(test)]
mod tests;

use crate::catalog::{MediaKind, MetadataLookup, ResourceRef};
use crate::error::DerivativeError;
use crate::request::{DerivativeSpec, DEFAULT_TIMECODE};
use crate::resolution::FixedAxis;
use crate::transport::Transport;
use std::sync::Arc;
use url::Url;

/// Thumbnail edge length bounds in pixels. Thumbnails are always quadratic.
pub const THUMBNAIL_MIN: u32 = 16;
pub const THUMBNAIL_MAX: u32 = 256;

/// How the final URL is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Return the processing request URL without contacting the service.
    /// Dereferencing it later triggers the real redirect (303 See Other).
    Immediate,
    /// Contact the service now, blocking for one round trip, and return the
    /// redirect target; `None` if the service rejects the request.
    Resolved,
}

/// Client for the remote media processing service.
///
/// Constructed explicitly with the service base URL and shared handles to
/// the metadata lookup and the transport. The transport is a long-lived
/// resource reused across concurrent calls; no request-scoped state is kept
/// between calls.
#[derive(Clone)]
pub struct DerivativeService {
    service_url: String,
    catalog: Arc<dyn MetadataLookup>,
    transport: Arc<dyn Transport>,
}

impl DerivativeService {
    /// Builds a service client. `service_url` is normalized (trailing
    /// slashes stripped) so endpoint paths compose cleanly.
    pub fn new(
        service_url: &str,
        catalog: Arc<dyn MetadataLookup>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            service_url: crate::config::normalize_service_url(service_url),
            catalog,
            transport,
        }
    }

    /// URL of the quadratic thumbnail of a document or attachment.
    ///
    /// Accepts any media kind. `size` is the edge length in pixels and must
    /// lie within [`THUMBNAIL_MIN`, `THUMBNAIL_MAX`].
    pub fn thumbnail_url(
        &self,
        resource: &ResourceRef,
        size: u32,
        mode: ResolveMode,
    ) -> Result<Option<Url>, DerivativeError> {
        self.lookup_media_kind(resource)?;
        if !(THUMBNAIL_MIN..=THUMBNAIL_MAX).contains(&size) {
            return Err(DerivativeError::SizeOutOfRange {
                size,
                min: THUMBNAIL_MIN,
                max: THUMBNAIL_MAX,
            });
        }

        let request = DerivativeSpec::Thumbnail { size }
            .request_url(&self.service_url, resource.unique_resource_url());
        self.resolve(&request, mode)
    }

    /// URL of an aspect-preserving resize of an image resource.
    ///
    /// `size` fixes the dimension named by `fixed`; the other dimension is
    /// computed downstream. The resource's media kind must be image.
    pub fn image_url(
        &self,
        resource: &ResourceRef,
        size: u32,
        fixed: FixedAxis,
        mode: ResolveMode,
    ) -> Result<Option<Url>, DerivativeError> {
        let kind = self.lookup_media_kind(resource)?;
        check_positive_size(size)?;
        check_media_kind(MediaKind::Image, kind)?;

        let request = DerivativeSpec::ResizedImage { size, fixed }
            .request_url(&self.service_url, resource.unique_resource_url());
        self.resolve(&request, mode)
    }

    /// URL of a video still taken from the middle of the video.
    pub fn video_still_url(
        &self,
        resource: &ResourceRef,
        size: u32,
        fixed: FixedAxis,
        mode: ResolveMode,
    ) -> Result<Option<Url>, DerivativeError> {
        self.video_still_url_at(resource, size, fixed, DEFAULT_TIMECODE, mode)
    }

    /// URL of a video still at a normalized timecode in [0.0, 1.0].
    ///
    /// The resource's media kind must be video.
    pub fn video_still_url_at(
        &self,
        resource: &ResourceRef,
        size: u32,
        fixed: FixedAxis,
        time: f32,
        mode: ResolveMode,
    ) -> Result<Option<Url>, DerivativeError> {
        let kind = self.lookup_media_kind(resource)?;
        check_positive_size(size)?;
        if !(0.0..=1.0).contains(&time) {
            return Err(DerivativeError::TimeOutOfRange(time));
        }
        check_media_kind(MediaKind::Video, kind)?;

        let request = DerivativeSpec::VideoStill {
            size,
            fixed,
            timecode: time,
        }
        .request_url(&self.service_url, resource.unique_resource_url());
        self.resolve(&request, mode)
    }

    /// Existence + media kind check against the current metadata snapshot.
    ///
    /// Attachment refs resolve in two steps: parent document first (a
    /// possibly-stale snapshot is accepted), then the attachment within it.
    /// Either step missing is a not-found failure.
    fn lookup_media_kind(&self, resource: &ResourceRef) -> Result<MediaKind, DerivativeError> {
        match resource {
            ResourceRef::Document(id) => {
                let document = self.catalog.document(id).ok_or_else(|| {
                    DerivativeError::NotFound {
                        url: id.unique_resource_url().to_string(),
                    }
                })?;
                Ok(document.media_kind)
            }
            ResourceRef::Attachment(id) => {
                let document = self.catalog.document(id.parent()).ok_or_else(|| {
                    DerivativeError::NotFound {
                        url: id.parent().unique_resource_url().to_string(),
                    }
                })?;
                let attachment = self.catalog.attachment(&document, id).ok_or_else(|| {
                    DerivativeError::NotFound {
                        url: id.unique_resource_url().to_string(),
                    }
                })?;
                Ok(attachment.media_kind)
            }
        }
    }

    /// Terminal resolution step.
    ///
    /// Immediate mode parses the composed string and returns it without any
    /// network traffic. Resolved mode issues one blocking GET: a 303 yields
    /// the redirect target; anything else, including a transport failure, is
    /// logged and reported as `None`. No retries.
    fn resolve(
        &self,
        request_url: &str,
        mode: ResolveMode,
    ) -> Result<Option<Url>, DerivativeError> {
        match mode {
            ResolveMode::Immediate => Ok(Some(Url::parse(request_url)?)),
            ResolveMode::Resolved => {
                let outcome = match self.transport.get(request_url) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        tracing::warn!(
                            url = request_url,
                            error = %err,
                            "derivative request failed in transport"
                        );
                        return Ok(None);
                    }
                };

                if outcome.status != 303 {
                    tracing::warn!(
                        url = request_url,
                        status = outcome.status,
                        "derivative request rejected by processing service"
                    );
                    return Ok(None);
                }

                let Some(location) = outcome.location else {
                    tracing::warn!(url = request_url, "303 response without Location header");
                    return Ok(None);
                };

                match Url::parse(&location) {
                    Ok(url) => {
                        tracing::debug!(url = request_url, location = %url, "derivative resolved");
                        Ok(Some(url))
                    }
                    Err(err) => {
                        tracing::warn!(
                            location = %location,
                            error = %err,
                            "303 Location is not a valid URL"
                        );
                        Ok(None)
                    }
                }
            }
        }
    }
}

fn check_positive_size(size: u32) -> Result<(), DerivativeError> {
    if size == 0 {
        return Err(DerivativeError::NonPositiveSize(size));
    }
    Ok(())
}

fn check_media_kind(expected: MediaKind, actual: MediaKind) -> Result<(), DerivativeError> {
    if actual != expected {
        return Err(DerivativeError::MediaKindMismatch { expected, actual });
    }
    Ok(())
}
