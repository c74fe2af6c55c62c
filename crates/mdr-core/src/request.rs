//! Deterministic request-URL composition for the processing endpoints.
//!
//! Parameter order is fixed by the wire contract: `item` (percent-encoded
//! unique resource URL), `async=false`, then `size` or `resolution` and, for
//! video stills, `timecode`.

use crate::resolution::{resolution_token, FixedAxis};
use url::form_urlencoded;

/// Default snapshot timecode: the middle of the video.
pub const DEFAULT_TIMECODE: f32 = 0.5;

/// One derivative operation with its sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivativeSpec {
    /// Quadratic thumbnail; valid for any media kind.
    Thumbnail { size: u32 },
    /// Aspect-preserving resize of an image.
    ResizedImage { size: u32, fixed: FixedAxis },
    /// Single frame of a video at a normalized timecode.
    VideoStill {
        size: u32,
        fixed: FixedAxis,
        timecode: f32,
    },
}

impl DerivativeSpec {
    /// Composes the processing request URL for this derivative of the
    /// resource named by `unique_resource_url`.
    ///
    /// Identical inputs always produce byte-identical strings. `service_url`
    /// must already be normalized (no trailing slash).
    pub fn request_url(&self, service_url: &str, unique_resource_url: &str) -> String {
        let item = encode_item(unique_resource_url);
        match *self {
            DerivativeSpec::Thumbnail { size } => format!(
                "{service_url}/process/generic/thumbnail?item={item}&async=false&size={size}"
            ),
            DerivativeSpec::ResizedImage { size, fixed } => format!(
                "{service_url}/process/image/resized?item={item}&async=false&resolution={}",
                resolution_token(size, fixed)
            ),
            DerivativeSpec::VideoStill {
                size,
                fixed,
                timecode,
            } => format!(
                "{service_url}/process/video/still?item={item}&async=false&resolution={}&timecode={}",
                resolution_token(size, fixed),
                format_timecode(timecode)
            ),
        }
    }
}

/// Form-encodes a unique resource URL for use as the `item` parameter value.
fn encode_item(unique_resource_url: &str) -> String {
    form_urlencoded::byte_serialize(unique_resource_url.as_bytes()).collect()
}

/// Formats a timecode as float text, keeping the decimal point on whole
/// values (`1.0` stays `"1.0"`, not `"1"`).
fn format_timecode(timecode: f32) -> String {
    if timecode.fract() == 0.0 {
        format!("{timecode:.1}")
    } else {
        format!("{timecode}")
    }
}
