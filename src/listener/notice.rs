use serde::{Deserialize, Serialize};

use crate::errors::HandlerError;

/// The record forwarded to the error queue when a handler fails.
///
/// The field names are the wire contract: consumers of the error queue see a
/// JSON object with `exception_type` and `error_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureNotice {
    pub exception_type: String,
    pub error_message: String,
}

impl From<&HandlerError> for FailureNotice {
    fn from(failure: &HandlerError) -> Self {
        FailureNotice {
            exception_type: failure.kind().to_string(),
            error_message: failure.message().to_string(),
        }
    }
}
