use crate::api_error::ApiError;

/// Core error type for the client library.
///
/// Transport adapters should map their own failures into this type so
/// callers can handle local and remote failures consistently (prompt the
/// user vs report a bad response vs give up).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid chat reference `{raw}`: expected an @handle or an integer id")]
    InvalidChatRef { raw: String },

    #[error("malformed api response: {0}")]
    MalformedResponse(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, Error>;
