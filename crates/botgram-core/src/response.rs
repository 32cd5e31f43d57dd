//! Response envelope of the remote bot API.
//!
//! Every reply is wrapped in an envelope: `ok: true` with a `result`, or a
//! failure with an `error_code` and a `description`. Failed envelopes feed
//! [`classify`](crate::api_error::classify) after the status-class prefix
//! is stripped from the description.

use serde::Deserialize;

use crate::api_error::{classify, StatusClass};
use crate::errors::{Error, Result};

#[derive(Clone, Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<u16>,
    pub parameters: Option<ResponseParameters>,
}

/// Extra failure context some errors carry. Passed through untouched;
/// acting on `retry_after` is the caller's business.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseParameters {
    pub migrate_to_chat_id: Option<i64>,
    pub retry_after: Option<u32>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope: the payload on success, a classified
    /// [`ApiError`](crate::api_error::ApiError) on failure.
    pub fn into_result(self) -> Result<T> {
        if self.ok {
            return self.result.ok_or_else(|| {
                Error::MalformedResponse("ok response without a result".to_string())
            });
        }

        let code = self.error_code.unwrap_or(0);
        let description = self.description.unwrap_or_default();
        let bare = strip_class_prefix(&description);
        Err(Error::Api(classify(StatusClass::from_code(code), bare)))
    }
}

/// The wire form prefixes descriptions with their status class, e.g.
/// `"Bad Request: chat not found"`; rule matching runs on the bare text.
fn strip_class_prefix(description: &str) -> &str {
    for prefix in ["Bad Request: ", "Forbidden: "] {
        if let Some(bare) = description.strip_prefix(prefix) {
            return bare;
        }
    }
    description
}
