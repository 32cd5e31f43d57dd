//! Ports to the external transport.
//!
//! The core never performs I/O itself. An HTTP adapter implements
//! [`Transport`] out of tree; [`call`] is the one shuttling helper that
//! pushes a method payload through the port, parses the envelope, and
//! hands failures to the classifier.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::Result;
use crate::response::ApiResponse;

/// Hexagonal port for the request transport.
///
/// `execute` posts the JSON payload of a named API method and returns the
/// raw envelope body. Implementations map their own transport failures
/// into [`crate::Error`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, method: &str, payload: serde_json::Value)
        -> Result<serde_json::Value>;
}

/// Invoke `method` through `transport` and unwrap the envelope into a
/// typed result.
pub async fn call<T, P>(transport: &dyn Transport, method: &str, payload: &P) -> Result<T>
where
    T: DeserializeOwned,
    P: Serialize,
{
    let payload = serde_json::to_value(payload)?;
    let raw = transport.execute(method, payload).await?;
    let envelope: ApiResponse<T> = serde_json::from_value(raw)?;

    let result = envelope.into_result();
    if let Err(err) = &result {
        tracing::debug!(method, %err, "bot api call failed");
    }
    result
}
