use std::env;
use std::time::Duration;

/// Environment variable holding the queue-owner AWS account id, read only by
/// [`ListenerConfig::account_id_from_env`].
pub const ACCOUNT_ID_ENV_VAR: &str = "AWS_ACCOUNT_ID";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);
const DEFAULT_VISIBILITY_TIMEOUT: u32 = 600;

/// Configuration for a [`crate::listener::QueueListener`].
///
/// Built fluently from a queue name; everything else has a default. The
/// visibility timeout should reflect the longest a handler may take on one
/// message: a message still being handled past it becomes eligible for
/// redelivery to another consumer.
///
/// ```
/// use std::time::Duration;
/// use sqs_listener::ListenerConfig;
///
/// let config = ListenerConfig::new("jobs")
///     .error_queue("jobs-errors")
///     .poll_interval(Duration::from_secs(30))
///     .account_id("123456789012");
/// ```
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    pub(crate) queue: String,
    pub(crate) error_queue: Option<String>,
    pub(crate) poll_interval: Duration,
    pub(crate) visibility_timeout: u32,
    pub(crate) error_visibility_timeout: u32,
    pub(crate) account_id: Option<String>,
}

impl ListenerConfig {
    /// Starts a configuration for the named queue with default polling and
    /// visibility settings (60 s interval, 600 s timeouts).
    pub fn new(queue: impl Into<String>) -> Self {
        ListenerConfig {
            queue: queue.into(),
            error_queue: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
            error_visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
            account_id: None,
        }
    }

    /// Queue to receive a [`crate::listener::FailureNotice`] per handler
    /// failure. Without one, failed messages are simply left for redelivery.
    pub fn error_queue(mut self, name: impl Into<String>) -> Self {
        self.error_queue = Some(name.into());
        self
    }

    /// How long to sleep after a receive that returned no messages.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Visibility timeout (seconds) applied if the main queue has to be
    /// created.
    pub fn visibility_timeout(mut self, seconds: u32) -> Self {
        self.visibility_timeout = seconds;
        self
    }

    /// Visibility timeout (seconds) applied if the error queue has to be
    /// created.
    pub fn error_visibility_timeout(mut self, seconds: u32) -> Self {
        self.error_visibility_timeout = seconds;
        self
    }

    /// The AWS account id owning the queues. Required: listener construction
    /// fails without it.
    pub fn account_id(mut self, id: impl Into<String>) -> Self {
        self.account_id = Some(id.into());
        self
    }

    /// Fills the account id from `AWS_ACCOUNT_ID` if the variable is set.
    /// This is the one environment read in the crate, and it happens here at
    /// configuration time, never inside the listen loop.
    pub fn account_id_from_env(mut self) -> Self {
        if let Ok(id) = env::var(ACCOUNT_ID_ENV_VAR) {
            self.account_id = Some(id);
        }
        self
    }

    pub fn queue_name(&self) -> &str {
        &self.queue
    }

    pub fn error_queue_name(&self) -> Option<&str> {
        self.error_queue.as_deref()
    }
}
