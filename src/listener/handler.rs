use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::HandlerError;
use crate::transport::{MessageAttributes, QueueAttributes};

/// The message-processing capability injected into a
/// [`crate::listener::QueueListener`], and the crate's sole extension point.
///
/// Called once per received message, sequentially, from the listen loop's
/// task. A returned error leaves the message on the queue for redelivery and
/// optionally forwards a notice to the error queue; `Ok(())` deletes it.
/// Handlers should be idempotent where possible, since the queue delivers
/// at-least-once.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(
        &self,
        body: Value,
        attributes: QueueAttributes,
        message_attributes: Option<MessageAttributes>,
    ) -> Result<(), HandlerError>;
}

/// Adapts an async closure into a [`MessageHandler`], for integrators who
/// don't want a named handler type.
///
/// ```
/// use sqs_listener::handler_fn;
///
/// let handler = handler_fn(|body, _attributes, _message_attributes| async move {
///     println!("received {body}");
///     Ok(())
/// });
/// ```
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Value, QueueAttributes, Option<MessageAttributes>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    HandlerFn(f)
}

/// See [`handler_fn`].
pub struct HandlerFn<F>(F);

#[async_trait]
impl<F, Fut> MessageHandler for HandlerFn<F>
where
    F: Fn(Value, QueueAttributes, Option<MessageAttributes>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn handle(
        &self,
        body: Value,
        attributes: QueueAttributes,
        message_attributes: Option<MessageAttributes>,
    ) -> Result<(), HandlerError> {
        (self.0)(body, attributes, message_attributes).await
    }
}
