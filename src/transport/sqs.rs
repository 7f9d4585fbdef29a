use std::collections::HashMap;

use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use aws_sdk_sqs::types::{MessageSystemAttributeName, QueueAttributeName};

use super::{MessageAttribute, QueueHandle, QueueTransport, ReceivedMessage};
use crate::errors::TransportError;

/// Receive tuning for the SQS transport.
///
/// Defaults to full batches with the SQS long-poll ceiling, so an idle queue
/// costs one request per twenty seconds on top of the listener's own poll
/// interval.
#[derive(Debug, Clone)]
pub struct SqsTransportConfig {
    /// Maximum messages pulled per receive request (SQS caps this at 10).
    pub max_number_of_messages: i32,

    /// Long-poll wait per receive request, in seconds (SQS caps this at 20).
    pub wait_time_seconds: i32,
}

impl Default for SqsTransportConfig {
    fn default() -> Self {
        SqsTransportConfig {
            max_number_of_messages: 10,
            wait_time_seconds: 20,
        }
    }
}

/// [`QueueTransport`] backed by the AWS SQS service client.
#[derive(Debug, Clone)]
pub struct SqsQueueTransport {
    client: aws_sdk_sqs::Client,
    config: SqsTransportConfig,
}

impl SqsQueueTransport {
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        Self::with_config(client, SqsTransportConfig::default())
    }

    pub fn with_config(client: aws_sdk_sqs::Client, config: SqsTransportConfig) -> Self {
        SqsQueueTransport { client, config }
    }

    /// Builds the transport on a client configured from the process
    /// environment. See [`crate::client::from_env`].
    pub async fn from_env() -> Self {
        Self::new(crate::client::from_env().await)
    }
}

#[async_trait::async_trait]
impl QueueTransport for SqsQueueTransport {
    async fn queue_url(
        &self,
        name: &str,
        owner_id: &str,
    ) -> Result<Option<QueueHandle>, TransportError> {
        let result = self
            .client
            .get_queue_url()
            .queue_name(name)
            .queue_owner_aws_account_id(owner_id)
            .send()
            .await;

        match result {
            Ok(output) => Ok(output.queue_url().map(QueueHandle::new)),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(GetQueueUrlError::is_queue_does_not_exist) =>
            {
                Ok(None)
            }
            Err(err) => Err(TransportError::Lookup(error_chain(&err))),
        }
    }

    async fn create_queue(
        &self,
        name: &str,
        visibility_timeout: u32,
    ) -> Result<QueueHandle, TransportError> {
        let output = self
            .client
            .create_queue()
            .queue_name(name)
            .attributes(
                QueueAttributeName::VisibilityTimeout,
                visibility_timeout.to_string(),
            )
            .send()
            .await
            .map_err(|err| TransportError::Create(error_chain(&err)))?;

        tracing::debug!(queue = name, "created queue");

        output
            .queue_url()
            .map(QueueHandle::new)
            .ok_or_else(|| TransportError::Create(format!("no queue url returned for `{name}`")))
    }

    async fn receive_messages(
        &self,
        handle: &QueueHandle,
    ) -> Result<Vec<ReceivedMessage>, TransportError> {
        let output = self
            .client
            .receive_message()
            .queue_url(handle.url())
            .max_number_of_messages(self.config.max_number_of_messages)
            .wait_time_seconds(self.config.wait_time_seconds)
            .message_system_attribute_names(MessageSystemAttributeName::All)
            .message_attribute_names("All")
            .send()
            .await
            .map_err(|err| TransportError::Receive(error_chain(&err)))?;

        let messages = output
            .messages()
            .iter()
            .filter_map(convert_message)
            .collect();

        Ok(messages)
    }

    async fn delete_message(
        &self,
        handle: &QueueHandle,
        receipt_handle: &str,
    ) -> Result<(), TransportError> {
        self.client
            .delete_message()
            .queue_url(handle.url())
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|err| TransportError::Delete(error_chain(&err)))?;

        Ok(())
    }

    async fn send_message(&self, handle: &QueueHandle, body: &str) -> Result<(), TransportError> {
        self.client
            .send_message()
            .queue_url(handle.url())
            .message_body(body)
            .send()
            .await
            .map_err(|err| TransportError::Send(error_chain(&err)))?;

        Ok(())
    }
}

/// Maps an SDK message into our transport type. Messages missing a body or
/// receipt handle cannot be dispatched or deleted; they are skipped and left
/// to the queue's redelivery behavior.
fn convert_message(message: &aws_sdk_sqs::types::Message) -> Option<ReceivedMessage> {
    let (Some(receipt_handle), Some(body)) = (message.receipt_handle(), message.body()) else {
        tracing::warn!(
            message_id = message.message_id().unwrap_or("<unknown>"),
            "skipping message without body or receipt handle"
        );
        return None;
    };

    let attributes = message
        .attributes()
        .map(|attrs| {
            attrs
                .iter()
                .map(|(k, v)| (k.as_str().to_string(), v.clone()))
                .collect()
        })
        .unwrap_or_default();

    let message_attributes = message.message_attributes().map(|attrs| {
        attrs
            .iter()
            .map(|(k, v)| {
                let attribute = MessageAttribute {
                    data_type: v.data_type().to_string(),
                    string_value: v.string_value().map(str::to_string),
                };
                (k.clone(), attribute)
            })
            .collect::<HashMap<_, _>>()
    });

    Some(ReceivedMessage {
        receipt_handle: receipt_handle.to_string(),
        body: body.to_string(),
        attributes,
        message_attributes,
    })
}

/// Flattens an error and its source chain into one line for a
/// [`TransportError`] payload.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(err) = source {
        rendered.push_str(": ");
        rendered.push_str(&err.to_string());
        source = err.source();
    }
    rendered
}
