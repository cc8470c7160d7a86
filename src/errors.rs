use thiserror::Error;

/// Errors from the feed fetch/normalize boundary. Everything past this
/// boundary deals in defaults, never in exceptions: a failed fetch becomes a
/// single user-visible error line, not a crash.
#[derive(Debug, Error, Clone)]
pub enum FeedError {
    /// Transport-level failure (DNS, TCP, TLS, timeout)
    #[error("Feed request failed: {0}")]
    Network(String),

    /// Upstream answered with a non-2xx status
    #[error("Feed server returned HTTP {0}")]
    HttpStatus(u16),

    /// Body was not valid JSON
    #[error("Feed body is not valid JSON: {0}")]
    MalformedJson(String),

    /// JSON parsed, but neither a keyed object with a `matches` array nor a
    /// bare array was found
    #[error("Feed contained no recognizable match list")]
    UnrecognizedShape,
}

impl FeedError {
    /// User-facing diagnostic with a suggestion, for the error panel.
    pub fn diagnostics(&self) -> String {
        match self {
            FeedError::Network(source) => {
                format!(
                    "Could not reach the match feed.\nError: {}\nSuggestion: Check your internet connection and press 'r' to retry.",
                    source
                )
            }
            FeedError::HttpStatus(status) => {
                format!(
                    "The match feed rejected the request.\nStatus: HTTP {}\nSuggestion: The feed may be down or moved. Try again later.",
                    status
                )
            }
            FeedError::MalformedJson(source) => {
                format!(
                    "The match feed sent unreadable data.\nError: {}\nSuggestion: This is an upstream issue. Press 'r' to retry.",
                    source
                )
            }
            FeedError::UnrecognizedShape => {
                "The match feed changed shape and no matches could be read.\nSuggestion: An app update may be required.".to_string()
            }
        }
    }
}
