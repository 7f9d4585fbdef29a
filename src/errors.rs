use thiserror::Error;

/// Errors surfaced by the listener itself.
///
/// `Configuration` is raised at construction time, before any transport call
/// is made. `Transport` is how a failed queue operation leaves the listen
/// loop; the loop does not catch these (see [`crate::listener::QueueListener::listen`]).
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listener was constructed with invalid or missing configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A queue operation failed. Terminates the listen loop.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A failure notice could not be serialized for the error queue.
    #[error("failed to serialize failure notice: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised by [`crate::transport::QueueTransport`] implementations,
/// one variant per operation. Each wraps the flattened source chain of the
/// underlying service error.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("queue lookup failed: {0}")]
    Lookup(String),

    #[error("queue creation failed: {0}")]
    Create(String),

    #[error("receive failed: {0}")]
    Receive(String),

    #[error("delete failed: {0}")]
    Delete(String),

    #[error("send failed: {0}")]
    Send(String),
}

/// A recoverable per-message failure: the handler rejected the message, or
/// its body could not be parsed.
///
/// Carries a short category (`kind`) alongside the human-readable message so
/// the failure can be reported and forwarded as a
/// [`crate::listener::FailureNotice`]. The listen loop catches this, leaves
/// the message on the queue for redelivery, and moves on to the next one.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct HandlerError {
    kind: String,
    message: String,
}

impl HandlerError {
    /// Creates a handler failure with an explicit category, e.g.
    /// `HandlerError::new("MissingOrderId", "payload has no `order_id` field")`.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        HandlerError {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// The failure category, forwarded as the notice's `exception_type`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The human-readable description, forwarded as the notice's
    /// `error_message`.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::new("InvalidMessageBody", err.to_string())
    }
}
