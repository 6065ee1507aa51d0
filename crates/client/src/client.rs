use std::time::Duration;

use movie_tracker_core::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_REMOTE_URL};
use movie_tracker_core::env_config::{
    HTTP_TIMEOUT_ENV, REMOTE_URL_ENV, env_parse_with_default, env_string,
};
use movie_tracker_core::{AppendRequest, AppendResponse, ReadResponse, RemoteMovie};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Delays before each retry of a full read. Appends are never retried.
const READ_RETRY_DELAYS: [Duration; 2] = [Duration::from_millis(500), Duration::from_secs(2)];

/// Client for the RemoteStore endpoint.
///
/// A single URL serves both operations: `GET` reads every year tab, `POST`
/// appends one row.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: reqwest::Client,
    endpoint: String,
    retry_delays: Vec<Duration>,
}

impl SheetsClient {
    /// Creates a client for `endpoint` with the given request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;
        Ok(Self { client, endpoint: endpoint.into(), retry_delays: READ_RETRY_DELAYS.to_vec() })
    }

    /// Creates a client from `MOVIE_TRACKER_REMOTE_URL` and
    /// `MOVIE_TRACKER_HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ClientError> {
        let endpoint = env_string(REMOTE_URL_ENV).unwrap_or_else(|| DEFAULT_REMOTE_URL.to_owned());
        let timeout = env_parse_with_default(HTTP_TIMEOUT_ENV, DEFAULT_HTTP_TIMEOUT_SECS);
        Self::new(endpoint, Duration::from_secs(timeout))
    }

    /// Replaces the delays used between full-read retries.
    #[must_use]
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Read every movie row from the spreadsheet.
    ///
    /// Transient failures (connection errors, 429, 5xx) are retried.
    ///
    /// # Errors
    /// Returns an error if every attempt fails, the body is not a valid
    /// envelope, or the envelope reports `success: false`.
    pub async fn fetch_all(&self) -> Result<Vec<RemoteMovie>, ClientError> {
        let mut last_error: Option<ClientError> = None;

        for attempt in 0..=self.retry_delays.len() {
            if attempt > 0 {
                let delay = self.retry_delays.get(attempt - 1).copied().unwrap_or_default();
                tokio::time::sleep(delay).await;
                tracing::warn!(
                    "RemoteStore read retry {attempt}/{} after {delay:?}",
                    self.retry_delays.len()
                );
            }

            match self.try_fetch_all().await {
                Ok(movies) => return Ok(movies),
                Err(e) if e.is_transient() => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(ClientError::RetriesExhausted(Box::new(
            last_error.unwrap_or_else(|| ClientError::Remote("no attempt made".to_owned())),
        )))
    }

    async fn try_fetch_all(&self) -> Result<Vec<RemoteMovie>, ClientError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let envelope: ReadResponse = read_envelope(response, "read response").await?;
        if !envelope.success {
            return Err(ClientError::Remote(
                envelope.error.unwrap_or_else(|| "unspecified error".to_owned()),
            ));
        }
        tracing::debug!(rows = envelope.movies.len(), "RemoteStore read complete");
        Ok(envelope.movies)
    }

    /// Append one movie to its year tab.
    ///
    /// # Errors
    /// Returns an error if the request fails or the endpoint rejects the row.
    pub async fn append(&self, request: &AppendRequest) -> Result<(), ClientError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let envelope: AppendResponse = read_envelope(response, "append response").await?;
        if envelope.success {
            Ok(())
        } else {
            Err(ClientError::Remote(envelope.error.unwrap_or_else(|| "unspecified error".to_owned())))
        }
    }
}

/// Decode a `{success, ...}` envelope.
///
/// A non-2xx response whose body is still a well-formed envelope is handed
/// back so the caller surfaces the endpoint's own error message. 429 and 503
/// ask the caller to come back later, so they always become
/// [`ClientError::HttpStatus`], as does any non-2xx response without an
/// envelope.
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if matches!(status.as_u16(), 429 | 503) {
        return Err(ClientError::HttpStatus { code: status.as_u16(), body: truncate(&body, 200).to_owned() });
    }

    match serde_json::from_str::<T>(&body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => {
            Err(ClientError::HttpStatus { code: status.as_u16(), body: truncate(&body, 200).to_owned() })
        },
        Err(source) => Err(ClientError::JsonParse {
            context: format!("{context} (body: {})", truncate(&body, 200)),
            source,
        }),
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
