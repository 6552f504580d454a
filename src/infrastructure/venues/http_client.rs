//! # HTTP Client
//!
//! Thin wrapper around [`reqwest::Client`] shared by the venue adapters.
//!
//! Requests carry a per-client deadline. Bodies are passed as pre-built
//! strings and sent unchanged, so a signature computed over the string
//! covers exactly what goes over the wire. Responses are returned with
//! their status so adapters can map venue-specific codes themselves.

use crate::infrastructure::venues::error::{VenueError, VenueResult};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A response whose body has been read to a string.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    body: String,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the raw body.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns true for 2xx statuses.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `VenueError::ProtocolError` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> VenueResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            VenueError::protocol_error(format!("unexpected response body: {e}"))
        })
    }

    /// Converts a non-success response into an error.
    #[must_use]
    pub fn into_error(self) -> VenueError {
        match self.status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                VenueError::authentication(self.body)
            }
            status => VenueError::http_status(status.as_u16(), self.body),
        }
    }
}

/// HTTP client bound to one venue's base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a client for `base_url` with the given request deadline.
    ///
    /// # Errors
    ///
    /// Returns `VenueError::InternalError` if the client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> VenueResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| VenueError::internal_error(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
        })
    }

    /// Returns the base URL without a trailing slash.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request deadline.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Sends a GET to `path_and_query`, appended verbatim to the base URL.
    ///
    /// # Errors
    ///
    /// Returns `VenueError` on transport failure or timeout.
    pub async fn get(&self, path_and_query: &str, headers: HeaderMap) -> VenueResult<HttpResponse> {
        self.send(Method::GET, path_and_query, headers, None).await
    }

    /// Sends a form-encoded POST with `body` as the exact payload.
    ///
    /// # Errors
    ///
    /// Returns `VenueError` on transport failure or timeout.
    pub async fn post_form(
        &self,
        path: &str,
        body: String,
        mut headers: HeaderMap,
    ) -> VenueResult<HttpResponse> {
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        self.send(Method::POST, path, headers, Some(body)).await
    }

    /// Sends a JSON POST with `body` as the exact payload.
    ///
    /// # Errors
    ///
    /// Returns `VenueError` on transport failure or timeout.
    pub async fn post_json(
        &self,
        path: &str,
        body: String,
        mut headers: HeaderMap,
    ) -> VenueResult<HttpResponse> {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.send(Method::POST, path, headers, Some(body)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> VenueResult<HttpResponse> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_error(e))?;
        Ok(HttpResponse::new(status, body))
    }

    fn map_error(&self, err: reqwest::Error) -> VenueError {
        if err.is_timeout() {
            VenueError::timeout_with_duration(err.to_string(), self.timeout_ms)
        } else {
            VenueError::from(err)
        }
    }
}

/// Builds a header value, rejecting non-visible ASCII.
///
/// # Errors
///
/// Returns `VenueError::InvalidRequest` naming `name` if `value` cannot be
/// sent as a header.
pub fn header_value(name: &str, value: &str) -> VenueResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| VenueError::invalid_request(format!("invalid characters in {name} header")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Ping {
        ok: bool,
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = HttpClient::new("https://example.com/", 1000).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
        assert_eq!(client.timeout_ms(), 1000);
    }

    #[test]
    fn json_decode_failure_is_protocol_error() {
        let response = HttpResponse::new(StatusCode::OK, "<html>");
        let err = response.json::<Ping>().unwrap_err();
        assert_eq!(err.kind(), "protocol");

        let response = HttpResponse::new(StatusCode::OK, r#"{"ok":true}"#);
        assert!(response.json::<Ping>().unwrap().ok);
    }

    #[test]
    fn auth_statuses_become_authentication_errors() {
        let err = HttpResponse::new(StatusCode::UNAUTHORIZED, "bad key").into_error();
        assert!(matches!(err, VenueError::Authentication { .. }));

        let err = HttpResponse::new(StatusCode::BAD_GATEWAY, "upstream").into_error();
        assert_eq!(err, VenueError::http_status(502, "upstream"));
    }

    #[test]
    fn header_value_rejects_newlines() {
        assert!(header_value("X-MBX-APIKEY", "abc\n").is_err());
        assert!(header_value("X-MBX-APIKEY", "abc").is_ok());
    }
}
