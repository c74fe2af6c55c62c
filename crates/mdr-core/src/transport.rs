//! Blocking HTTP transport for resolved-mode requests.
//!
//! Uses the curl crate (libcurl). Redirect following is disabled: the 303
//! redirect target IS the result the derivative service extracts, so the
//! transport must report the status code and `Location` header as-is.

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

/// Outcome of one GET: status code plus the `Location` header, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetOutcome {
    pub status: u32,
    pub location: Option<String>,
}

/// Blocking GET capability consumed by the derivative service.
///
/// Implementations must tolerate overlapping calls from multiple threads,
/// must not follow redirects, and raise only on connectivity failure (an
/// HTTP error status is a normal outcome, not an `Err`).
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<GetOutcome>;
}

/// libcurl-backed transport.
///
/// A fresh easy handle is created per request, so overlapping GETs from
/// concurrent callers do not contend on shared state. Timeout policy lives
/// here, not in the derivative service.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CurlTransport {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<GetOutcome> {
        let mut header_lines: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(false)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            // Body is irrelevant here; only status and headers matter.
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform().context("GET request failed")?;
        }

        let status = easy.response_code().context("no response code")?;

        Ok(GetOutcome {
            status,
            location: parse_location(&header_lines),
        })
    }
}

/// Extracts the `Location` header value from raw header lines.
fn parse_location(lines: &[String]) -> Option<String> {
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("location") {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}
