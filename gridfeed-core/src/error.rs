//! Structured error types for the acquisition pipeline.

use thiserror::Error;

/// Errors surfaced by the request pipeline.
///
/// All variants propagate to the immediate caller; there is no internal
/// fallback or default substitution. An empty record set is *not* an error —
/// "no data in the requested window" is a valid, silent outcome.
#[derive(Debug, Error)]
pub enum GridError {
    /// Contradictory or unsupported request options. Raised before any
    /// network call is made.
    #[error("invalid request options: {0}")]
    Configuration(String),

    /// Transport failure fetching one date batch. Not retried; aborts the
    /// whole request with no partial data.
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The payload does not contain the expected schema. Carries the raw
    /// content for diagnostics, so a format change or an error page served
    /// with HTTP 200 is distinguishable from a correct zero-row response.
    #[error("could not parse payload: {reason}")]
    Parse { reason: String, content: String },
}

impl GridError {
    pub fn parse(reason: impl Into<String>, content: impl Into<String>) -> Self {
        GridError::Parse {
            reason: reason.into(),
            content: content.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        GridError::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
