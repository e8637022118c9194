//! HTTP clients for the channel metadata, feed item and translation APIs.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

pub mod translate;
pub mod youtube;

pub use translate::{GoogleTranslator, Translator};
pub use youtube::{VideoSource, YouTubeClient};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("api error {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ApiError::Timeout } else { ApiError::Http(err) }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Send once, map non-2xx to `ApiError::Status`, decode the body as `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ApiError> {
    let response = req.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
            .ok()
            .map(|env| env.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(ApiError::Status { status, message });
    }

    Ok(serde_json::from_slice(&bytes)?)
}
