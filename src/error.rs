//! Non-fatal issues surfaced by the fetch pipeline.
//!
//! The fetcher never fails its caller: it always hands back whatever product
//! list it accumulated, plus at most one of these as a side channel.

use thiserror::Error;

/// Last-error indicator recorded by the fetch path and readable through
/// [`crate::catalog::ProductCatalog::last_issue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchIssue {
    /// Required credentials are missing; no request was attempted.
    #[error("configuration incomplete: {0}")]
    ConfigurationIncomplete(String),

    /// No usable access token; no request was attempted.
    #[error("authentication unavailable: {0}")]
    AuthFailure(String),

    /// Network-level failure mid-pagination; accumulated pages were kept.
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status; accumulated pages were kept.
    #[error("upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// A fully successful pagination produced zero items. Informational,
    /// deliberately distinct from the failure variants above.
    #[error("upstream returned no items")]
    EmptyResult,
}

impl FetchIssue {
    /// Whether this issue represents an actual failure (as opposed to the
    /// informational empty state).
    pub fn is_failure(&self) -> bool {
        !matches!(self, FetchIssue::EmptyResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_not_a_failure() {
        assert!(!FetchIssue::EmptyResult.is_failure());
        assert!(FetchIssue::Transport("timed out".into()).is_failure());
        assert!(FetchIssue::UpstreamStatus {
            status: 503,
            body: String::new()
        }
        .is_failure());
    }
}
