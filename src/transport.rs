use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::TransportError;

mod sqs;

pub use sqs::{SqsQueueTransport, SqsTransportConfig};

/// Queue (system) attributes delivered with a message, e.g. sender account id
/// and approximate receive count.
pub type QueueAttributes = HashMap<String, String>;

/// User-set message attributes delivered with a message.
pub type MessageAttributes = HashMap<String, MessageAttribute>;

/// A resolved queue identifier (for SQS, the queue URL).
///
/// Opaque to callers; the listener memoizes one per queue role and hands it
/// back to the transport for receive/delete/send.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueHandle(String);

impl QueueHandle {
    pub fn new(url: impl Into<String>) -> Self {
        QueueHandle(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single user-set attribute value, decoupled from the SDK's attribute type
/// so handlers and in-memory transports never touch `aws_sdk_sqs` types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAttribute {
    pub data_type: String,
    pub string_value: Option<String>,
}

/// One received unit of work.
///
/// The body is the still-serialized payload; the listener owns
/// deserialization before the handler sees it. The receipt handle identifies
/// this specific delivery for the eventual delete.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub receipt_handle: String,
    pub body: String,
    pub attributes: QueueAttributes,
    pub message_attributes: Option<MessageAttributes>,
}

/// The queue operations the listener consumes, abstracted behind a trait so
/// the loop can run against SQS in production and an in-memory double in
/// tests.
///
/// Implementations own at-least-once delivery semantics; the listener only
/// promises to delete a message when its handler succeeds.
#[async_trait]
pub trait QueueTransport: Send + Sync {
    /// Looks up an existing queue by name, scoped to the owning account.
    /// Returns `Ok(None)` when no such queue exists.
    async fn queue_url(
        &self,
        name: &str,
        owner_id: &str,
    ) -> Result<Option<QueueHandle>, TransportError>;

    /// Creates a queue with the given visibility timeout (seconds) and
    /// returns its handle.
    async fn create_queue(
        &self,
        name: &str,
        visibility_timeout: u32,
    ) -> Result<QueueHandle, TransportError>;

    /// Pulls the next batch of messages. May long-poll for a
    /// transport-defined duration; an empty vec is a normal outcome.
    async fn receive_messages(
        &self,
        handle: &QueueHandle,
    ) -> Result<Vec<ReceivedMessage>, TransportError>;

    /// Deletes one delivered message by its receipt handle.
    async fn delete_message(
        &self,
        handle: &QueueHandle,
        receipt_handle: &str,
    ) -> Result<(), TransportError>;

    /// Sends a serialized body to a queue.
    async fn send_message(&self, handle: &QueueHandle, body: &str) -> Result<(), TransportError>;
}
