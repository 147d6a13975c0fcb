// Error taxonomy for the acquisition pipeline

use thiserror::Error;

/// Failures the engine reports to its caller.
///
/// Every variant aborts the current job or batch immediately. Nothing in
/// the engine retries on its own; the caller decides what to do with the
/// kind it gets back.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The content reference could not be parsed as a locator
    #[error("invalid reference: {0}")]
    ReferenceInvalid(String),

    /// The provider reports the content cannot be served
    /// (removed, private, region-blocked)
    #[error("content unavailable: {0}")]
    ContentUnavailable(String),

    /// The provider reports an age gate on the content
    #[error("age-restricted content: {0}")]
    AgeRestricted(String),

    /// No stream satisfies the requested selection rule exactly
    #[error("no stream available for {0}")]
    QualityUnavailable(String),

    /// The audio extraction step failed
    #[error("audio transcode failed: {0}")]
    TranscodeFailed(String),

    /// The request was submitted without a download mode
    #[error("no download mode selected")]
    NoModeSelected,

    /// Everything else, from network faults to unexpected provider
    /// output. Detail is kept for logs only.
    #[error("download failed: {0}")]
    Unclassified(String),
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        Self::Unclassified(e.to_string())
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(e: reqwest::Error) -> Self {
        Self::Unclassified(e.to_string())
    }
}
