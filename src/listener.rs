use std::convert::Infallible;

use serde_json::Value;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::errors::{HandlerError, ListenerError};
use crate::transport::{QueueHandle, QueueTransport, ReceivedMessage};

mod config;
mod handler;
mod notice;

pub use config::{ACCOUNT_ID_ENV_VAR, ListenerConfig};
pub use handler::{HandlerFn, MessageHandler, handler_fn};
pub use notice::FailureNotice;

/// A long-running consumer of one named queue.
///
/// `QueueListener` owns the poll-dispatch-acknowledge cycle: it resolves (or
/// creates) its queue, pulls batches of messages, runs the injected
/// [`MessageHandler`] on each, deletes a message exactly when its handler
/// succeeds, and on failure forwards a [`FailureNotice`] to the configured
/// error queue while leaving the original message for redelivery.
///
/// Handler and body-parse failures are contained per message. Transport
/// failures are not: a failed receive, delete, send, or queue resolution
/// ends [`listen`](QueueListener::listen) with the error, and the caller
/// decides whether to restart.
///
/// ```no_run
/// use sqs_listener::{handler_fn, ListenerConfig, QueueListener, SqsQueueTransport};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let transport = SqsQueueTransport::from_env().await;
///     let handler = handler_fn(|body, _attributes, _message_attributes| async move {
///         println!("processing {body}");
///         Ok(())
///     });
///
///     let config = ListenerConfig::new("jobs")
///         .error_queue("jobs-errors")
///         .account_id_from_env();
///
///     let mut listener = QueueListener::new(transport, handler, config)?;
///     listener.listen().await?;
///     Ok(())
/// }
/// ```
pub struct QueueListener<T, H>
where
    T: QueueTransport,
    H: MessageHandler,
{
    transport: T,
    handler: H,
    config: ListenerConfig,
    account_id: String,
    error_handle: Option<QueueHandle>,
}

impl<T, H> QueueListener<T, H>
where
    T: QueueTransport,
    H: MessageHandler,
{
    /// Validates the configuration and builds the listener.
    ///
    /// Fails fast with [`ListenerError::Configuration`] on a missing or empty
    /// account id, an empty queue name, or a zero interval/timeout. No
    /// transport call is made here.
    pub fn new(transport: T, handler: H, config: ListenerConfig) -> Result<Self, ListenerError> {
        if config.queue.is_empty() {
            return Err(ListenerError::Configuration(
                "queue name must not be empty".into(),
            ));
        }
        let account_id = match config.account_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(ListenerError::Configuration(format!(
                    "queue owner account id not configured; \
                     call ListenerConfig::account_id or set {ACCOUNT_ID_ENV_VAR}"
                )));
            }
        };
        if config.poll_interval.is_zero() {
            return Err(ListenerError::Configuration(
                "poll interval must be positive".into(),
            ));
        }
        if config.visibility_timeout == 0 || config.error_visibility_timeout == 0 {
            return Err(ListenerError::Configuration(
                "visibility timeouts must be positive".into(),
            ));
        }

        Ok(QueueListener {
            transport,
            handler,
            config,
            account_id,
            error_handle: None,
        })
    }

    /// Looks up the named queue scoped to the configured owner account,
    /// creating it with the given visibility timeout (seconds) if it does
    /// not exist.
    ///
    /// Idempotent: a second call finds the queue created by the first. A
    /// pre-existing queue keeps whatever visibility timeout it already has;
    /// the argument only applies on creation.
    pub async fn resolve_or_create_queue(
        &self,
        name: &str,
        visibility_timeout: u32,
    ) -> Result<QueueHandle, ListenerError> {
        match self.transport.queue_url(name, &self.account_id).await? {
            Some(handle) => Ok(handle),
            None => Ok(self
                .transport
                .create_queue(name, visibility_timeout)
                .await?),
        }
    }

    /// Runs the consumer loop until a transport call fails.
    ///
    /// Resolves the main queue once, then forever: receive a batch; if it is
    /// empty, sleep for the poll interval and receive again; otherwise drain
    /// the batch in receipt order and immediately re-poll. Within the batch,
    /// each message is parsed as JSON and handed to the handler: success
    /// deletes the message, failure reports it and forwards a notice (when an
    /// error queue is configured) without deleting.
    ///
    /// The return type says the rest: there is no normal exit. Use
    /// [`listen_with_shutdown`](QueueListener::listen_with_shutdown) for a
    /// stoppable variant.
    #[tracing::instrument(skip_all, fields(queue = %self.config.queue))]
    pub async fn listen(&mut self) -> Result<Infallible, ListenerError> {
        let main = self
            .resolve_or_create_queue(&self.config.queue, self.config.visibility_timeout)
            .await?;
        tracing::info!(url = %main, "listening");

        loop {
            let batch = self.transport.receive_messages(&main).await?;
            if batch.is_empty() {
                sleep(self.config.poll_interval).await;
                continue;
            }

            tracing::debug!(count = batch.len(), "draining batch");
            for message in batch {
                let receipt_handle = message.receipt_handle.clone();
                match self.dispatch(message).await {
                    Ok(()) => {
                        self.transport.delete_message(&main, &receipt_handle).await?;
                    }
                    Err(failure) => {
                        tracing::error!(kind = failure.kind(), "message handler failed: {failure}");
                        self.forward_failure(&failure).await?;
                    }
                }
            }
        }
    }

    /// [`listen`](QueueListener::listen), stoppable via a oneshot signal.
    ///
    /// Returns `Ok(())` once the signal fires (or its sender is dropped);
    /// any in-flight receive or handler call is cancelled at its next await
    /// point. Undeleted messages reappear after their visibility timeout.
    pub async fn listen_with_shutdown(
        &mut self,
        shutdown: oneshot::Receiver<()>,
    ) -> Result<(), ListenerError> {
        let queue = self.config.queue.clone();
        tokio::select! {
            result = self.listen() => match result {
                Ok(never) => match never {},
                Err(err) => Err(err),
            },
            _ = shutdown => {
                tracing::info!(queue = %queue, "shutdown signal received, stopping listener");
                Ok(())
            }
        }
    }

    /// Parses the body and invokes the handler. Both failure modes collapse
    /// into [`HandlerError`] so the loop treats them identically.
    async fn dispatch(&self, message: ReceivedMessage) -> Result<(), HandlerError> {
        let body: Value = serde_json::from_str(&message.body)?;
        self.handler
            .handle(body, message.attributes, message.message_attributes)
            .await
    }

    /// Sends a [`FailureNotice`] to the error queue, resolving the queue on
    /// first use and reusing the handle afterwards. A no-op when no error
    /// queue is configured.
    async fn forward_failure(&mut self, failure: &HandlerError) -> Result<(), ListenerError> {
        let Some(error_queue) = self.config.error_queue.clone() else {
            return Ok(());
        };

        let handle = match self.error_handle.clone() {
            Some(handle) => handle,
            None => {
                let handle = self
                    .resolve_or_create_queue(&error_queue, self.config.error_visibility_timeout)
                    .await?;
                self.error_handle = Some(handle.clone());
                handle
            }
        };

        let body = serde_json::to_string(&FailureNotice::from(failure))?;
        tracing::info!(queue = %error_queue, "forwarding failure notice to error queue");
        self.transport.send_message(&handle, &body).await?;
        Ok(())
    }
}
