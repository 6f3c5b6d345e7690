//! The single error shape every API call fails with.
//!
//! Transport failures and non-success responses are both turned into a human-readable string
//! here, so callers never handle `reqwest` errors directly. The `Display` text of an
//! [`ApiError`] is the message a user should see.

use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, timeout, broken body).
    #[error("Erro: {0}")]
    Client(String),
    /// The server answered, but not with a usable success response.
    #[error("{message}")]
    Server { status: u16, message: String },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Normalise a failure that happened before any response arrived.
    pub fn client(message: impl Into<String>) -> Self {
        ApiError::Client(message.into())
    }

    /// Normalise a non-success response.
    ///
    /// The server's own `message` wins when the body carries one; otherwise the status and a
    /// transport description are combined.
    pub fn from_response(status: StatusCode, url: &str, body: &[u8]) -> Self {
        let transport = format!("Http failure response for {url}: {status}");
        Self::server(status, server_message(body), &transport)
    }

    /// Normalise a success response whose body could not be decoded.
    pub fn undecodable(status: StatusCode, url: &str) -> Self {
        let transport = format!("Http failure during parsing for {url}");
        Self::server(status, None, &transport)
    }

    fn server(status: StatusCode, server_message: Option<String>, transport: &str) -> Self {
        let message = server_message.unwrap_or_else(|| {
            format!(
                "Código do erro: {}\nMensagem: {}",
                status.as_u16(),
                transport
            )
        });
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }

    /// HTTP status of a server-side failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Client(_) => None,
            ApiError::Server { status, .. } => Some(*status),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Client(err.to_string())
    }
}

/// Non-empty `message` string from a JSON error body, if there is one.
fn server_message(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        message: Option<serde_json::Value>,
    }

    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.message? {
        serde_json::Value::String(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}
