use thiserror::Error;

/// Errors raised by the modal widget itself
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("waitlist dialog is not open")]
    Closed,

    #[error("a waitlist submission is already in flight")]
    SubmissionInFlight,

    #[error("required element not found: {0}")]
    MissingElement(String),

    #[error("invalid waitlist configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// The request never produced a response (connectivity, CORS, aborted fetch)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
}
