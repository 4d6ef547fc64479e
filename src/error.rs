/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum DateTimeError {
    /// Endpoint URL, host or port is empty.
    #[error("missing endpoint configuration: {0}")]
    MissingEndpointConfig(String),
    /// Requested content type is neither `application/json` nor `text/plain`.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    /// Request could not be built from the configured target.
    #[error("request construction error: {0}")]
    Request(reqwest::Error),
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-200 HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Response body could not be read.
    #[error("response body error: {0}")]
    Body(reqwest::Error),
    /// Response body did not match the negotiated content type.
    #[error("decode error: {0}")]
    Decode(String),
    /// Retry budget ran out; `source` is the error of the last attempt.
    #[error("all retry attempts failed ({attempts} attempts in {elapsed_ms} ms)")]
    RetryExhausted {
        attempts: usize,
        elapsed_ms: u64,
        #[source]
        source: Box<DateTimeError>,
    },
}

impl DateTimeError {
    /// Returns `true` for errors detected before any network I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingEndpointConfig(_) | Self::UnsupportedContentType(_)
        )
    }

    /// Returns the error of the last attempt when retries ran out, or `self`.
    pub fn last_error(&self) -> &DateTimeError {
        match self {
            Self::RetryExhausted { source, .. } => source.last_error(),
            other => other,
        }
    }
}
