//! SQS client construction.
//!
//! The listener itself only speaks [`crate::transport::QueueTransport`]; these
//! helpers cover the common ways of standing up the underlying
//! `aws_sdk_sqs::Client` it runs on.

use aws_config::Region;
use aws_sdk_sqs::config::SharedCredentialsProvider;

/// Builds a client from the process environment (`AWS_ACCESS_KEY_ID`,
/// `AWS_SECRET_ACCESS_KEY`, `AWS_REGION`, `AWS_PROFILE`, ...).
pub async fn from_env() -> aws_sdk_sqs::Client {
    let config = aws_config::load_from_env().await;
    aws_sdk_sqs::Client::new(&config)
}

/// Builds a client against a non-default endpoint URL, keeping the rest of
/// the configuration environment-sourced. Intended for local SQS-compatible
/// stacks in development and testing.
pub async fn with_endpoint_url(endpoint_url: &str) -> aws_sdk_sqs::Client {
    let config = aws_config::from_env()
        .endpoint_url(endpoint_url)
        .load()
        .await;
    aws_sdk_sqs::Client::new(&config)
}

/// Builds a client from explicit credentials and region, bypassing the
/// environment entirely.
pub fn with_credentials(
    access_key_id: &str,
    secret_access_key: &str,
    region: &str,
) -> aws_sdk_sqs::Client {
    let credentials = aws_sdk_sqs::config::Credentials::new(
        access_key_id,
        secret_access_key,
        None,
        None,
        "sqs-listener",
    );

    let config = aws_sdk_sqs::config::Builder::new()
        .region(Region::new(region.to_string()))
        .credentials_provider(SharedCredentialsProvider::new(credentials))
        .build();

    aws_sdk_sqs::Client::from_conf(config)
}
