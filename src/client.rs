use std::fmt;
use std::time::{Duration, Instant};

use reqwest::{header, StatusCode};
use tokio::time::sleep;

use crate::{
    decode::{body_excerpt, decode_datetime},
    Backoff, ClientOptions, ContentType, DateTimeError, Endpoint, Result, ServerSelector,
    ServerTargets,
};

#[derive(Clone)]
/// HTTP client for a `/datetime` endpoint.
pub struct DateTimeClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    options: ClientOptions,
}

impl fmt::Debug for DateTimeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeClient")
            .field("endpoint", &self.endpoint)
            .field("options", &self.options)
            .finish()
    }
}

impl DateTimeClient {
    /// Creates a client for a base URL such as `http://localhost:8000`.
    ///
    /// `/datetime` is appended unless the URL already ends with it.
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_endpoint(Endpoint::Url(url.into()))
    }

    /// Creates a client for a base host URL and a separate port.
    ///
    /// Example: `("http://localhost", "8080")` targets
    /// `http://localhost:8080/datetime`.
    pub fn with_host_port(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self::from_endpoint(Endpoint::HostPort {
            host: host.into(),
            port: port.into(),
        })
    }

    /// Creates a client bound to the port `selector` picks from `targets`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use datetime_client::{DateTimeClient, ServerTargets};
    ///
    /// let targets = ServerTargets::new("http://localhost", "8080", "8090");
    /// let client = DateTimeClient::for_server(&targets, "gin");
    /// ```
    pub fn for_server(targets: &ServerTargets, selector: impl Into<ServerSelector>) -> Self {
        Self::from_endpoint(targets.endpoint_for(selector.into()))
    }

    pub fn from_endpoint(endpoint: Endpoint) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            options: ClientOptions::default(),
        }
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Fetches the current datetime, negotiating `content_type`.
    ///
    /// `content_type` must be `application/json` or `text/plain`; anything
    /// else fails with [`DateTimeError::UnsupportedContentType`] before any
    /// request is sent.
    pub async fn fetch(&self, content_type: &str) -> Result<String> {
        let content_type = parse_content_type(content_type)?;
        self.fetch_endpoint(&self.endpoint, content_type).await
    }

    /// Fetches the current datetime with an already validated content type.
    pub async fn fetch_as(&self, content_type: ContentType) -> Result<String> {
        self.fetch_endpoint(&self.endpoint, content_type).await
    }

    /// Fetches from the server `selector` picks out of `targets`, ignoring
    /// the endpoint this client was built with.
    pub async fn fetch_from(
        &self,
        targets: &ServerTargets,
        selector: impl Into<ServerSelector>,
        content_type: &str,
    ) -> Result<String> {
        let content_type = parse_content_type(content_type)?;
        let selector = selector.into();
        tracing::debug!(selector = selector.as_str(), "resolving server target");
        self.fetch_endpoint(&targets.endpoint_for(selector), content_type).await
    }

    async fn fetch_endpoint(
        &self,
        endpoint: &Endpoint,
        content_type: ContentType,
    ) -> Result<String> {
        let url = endpoint.datetime_url().map_err(|err| {
            tracing::error!(endpoint = ?endpoint, "{err}");
            err
        })?;

        tracing::info!(url = %url, content_type = %content_type, "fetching datetime");
        self.fetch_with_retry(&url, content_type).await
    }

    async fn fetch_with_retry(&self, url: &str, content_type: ContentType) -> Result<String> {
        let started = Instant::now();
        let mut backoff = Backoff::from_options(&self.options);
        let mut attempts = 0usize;

        loop {
            attempts += 1;
            let err = match self.send_once(url, content_type, attempts).await {
                Ok(datetime) => {
                    tracing::info!(attempt = attempts, datetime = %datetime, "retrieved datetime");
                    return Ok(datetime);
                }
                Err(err) => err,
            };

            if !self.options.retry_policy.should_retry(&err) {
                tracing::error!(
                    attempt = attempts,
                    error = %err,
                    "datetime request failed permanently"
                );
                return Err(err);
            }

            let elapsed = started.elapsed();
            match backoff.next_delay(elapsed) {
                Some(delay) => {
                    tracing::warn!(
                        attempt = attempts,
                        error = %err,
                        delay_ms = millis(delay),
                        "datetime request failed, retrying"
                    );
                    sleep(delay).await;
                }
                None => {
                    let elapsed_ms = millis(elapsed);
                    tracing::error!(
                        attempts,
                        elapsed_ms,
                        error = %err,
                        "all retry attempts failed"
                    );
                    return Err(DateTimeError::RetryExhausted {
                        attempts,
                        elapsed_ms,
                        source: Box::new(err),
                    });
                }
            }
        }
    }

    /// Runs one GET exchange. The response is consumed (and its connection
    /// released) before this returns on every path.
    async fn send_once(
        &self,
        url: &str,
        content_type: ContentType,
        attempt: usize,
    ) -> Result<String> {
        tracing::debug!(url = %url, attempt, "sending datetime request");

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, content_type.as_str())
            .timeout(Duration::from_millis(self.options.timeout_ms))
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        tracing::debug!(
            status = status.as_u16(),
            content_type = ?response.headers().get(header::CONTENT_TYPE),
            "received response"
        );

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DateTimeError::Http {
                status: status.as_u16(),
                body: body_excerpt(&body),
            });
        }

        let body = response.text().await.map_err(DateTimeError::Body)?;
        decode_datetime(content_type, body)
    }
}

fn parse_content_type(value: &str) -> Result<ContentType> {
    value.parse::<ContentType>().map_err(|err| {
        tracing::error!(content_type = value, "{err}");
        err
    })
}

fn classify_send_error(err: reqwest::Error) -> DateTimeError {
    if err.is_builder() {
        DateTimeError::Request(err)
    } else {
        DateTimeError::Transport(err)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
