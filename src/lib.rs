//! # SQS Listener
//!
//! A long-running AWS SQS consumer loop: poll a named queue, dispatch each
//! message to your handler, delete messages that were handled successfully,
//! and forward a structured failure notice to an optional error queue when a
//! handler fails.
//!
//! ## Features
//!
//! - Asynchronous polling loop on tokio, one sequential worker per listener
//! - Handler as a trait or a plain async closure ([`handler_fn`])
//! - Lazy resolve-or-create for both the main and the error queue
//! - Delete-iff-success acknowledgement; failed messages stay for redelivery
//! - JSON failure notices (`exception_type` / `error_message`) on an error
//!   queue
//! - Queue operations behind a [`transport::QueueTransport`] trait, so the
//!   loop is testable without AWS
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sqs_listener::{handler_fn, ListenerConfig, QueueListener, SqsQueueTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = SqsQueueTransport::from_env().await;
//!     let handler = handler_fn(|body, _attributes, _message_attributes| async move {
//!         println!("processing {body}");
//!         Ok(())
//!     });
//!
//!     let config = ListenerConfig::new("jobs")
//!         .error_queue("jobs-errors")
//!         .account_id_from_env();
//!
//!     let mut listener = QueueListener::new(transport, handler, config)?;
//!     listener.listen().await?;
//!     Ok(())
//! }
//! ```
//!
//! Handler failures never stop the loop. Transport failures do: `listen`
//! returns the error and the caller owns any restart policy.

pub mod client;
pub mod errors;
pub mod listener;
pub mod transport;

pub use errors::{HandlerError, ListenerError, TransportError};
pub use listener::{FailureNotice, ListenerConfig, MessageHandler, QueueListener, handler_fn};
pub use transport::{
    MessageAttribute, MessageAttributes, QueueAttributes, QueueHandle, QueueTransport,
    ReceivedMessage, SqsQueueTransport, SqsTransportConfig,
};
