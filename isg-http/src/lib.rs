//! Minimal HTTP client for embedded device web servers.
//!
//! - Anchors every request to a base URL (`http://<host>/`)
//! - Text GETs and `application/x-www-form-urlencoded` POSTs
//! - Per-request options: timeout, retry budget
//! - Bodies decoded with the charset the device declares
//! - Optional *raw* request/response logging via `ISG_HTTP_RAW=1`
//!
//! ```rust
//! # async fn demo() -> Result<(), isg_http::HttpError> {
//! let client = isg_http::HttpClient::new("http://192.168.1.126/")?;
//! let page: String = client
//!     .get_text("?s=1,0", isg_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, body snippets (truncated), retries and final errors,
//! plus raw request/response lines (target `http.raw`) when `ISG_HTTP_RAW=1`.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode, Url};
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "ISG_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)

static NEXT_REQ_ID: AtomicU64 = AtomicU64::new(1);

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with cookies redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap, body: Option<&[u8]>) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, value) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", name, value.replace('\'', r"'\''")));
    }
    if let Some(bytes) = body {
        if let Ok(s) = std::str::from_utf8(bytes) {
            let mut s = s.to_string();
            if s.len() > RAW_MAX_BODY {
                truncate_at_char_boundary(&mut s, RAW_MAX_BODY);
                s.push('…');
            }
            parts.push(format!("-d '{}'", s.replace('\'', r"'\''")));
        } else {
            parts.push(format!("--data-binary @- # ({} bytes)", bytes.len()));
        }
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

/// Redact session headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let mut val = v.to_str().unwrap_or("").to_string();
            if key.eq_ignore_ascii_case("cookie")
                || key.eq_ignore_ascii_case("set-cookie")
                || key.eq_ignore_ascii_case("authorization")
            {
                val = "<redacted>".into();
            }
            (key, val)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("device returned {status}: {body_snippet}")]
    Status {
        status: StatusCode,
        body_snippet: String,
    },
}

// ==============================
// Request Options
// ==============================

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use isg_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert!(opts.retries.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts {
    pub timeout: Option<Duration>,
    pub retries: Option<usize>,
}

// ==============================
// Client
// ==============================

#[derive(Clone, Debug)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// Devices get one shot per request unless [`HttpClient::with_retries`]
    /// raises the budget.
    ///
    /// ```
    /// use isg_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("http://192.168.1.126/")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// assert_eq!(client.max_retries, 0);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
            max_retries: 0,
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    ///
    /// ```
    /// use isg_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("http://192.168.1.126/")?
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Override the default retry budget returned by [`HttpClient::new`].
    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve `path` (e.g. `?s=1,0` or `save.php`) against the base URL.
    ///
    /// ```
    /// use isg_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new("http://192.168.1.126/")?;
    /// assert_eq!(client.resolve("?s=4,2")?.as_str(), "http://192.168.1.126/?s=4,2");
    /// assert_eq!(client.resolve("save.php")?.as_str(), "http://192.168.1.126/save.php");
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn resolve(&self, path: &str) -> Result<Url, HttpError> {
        self.base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))
    }

    /// GET a page and return its body as text.
    pub async fn get_text(&self, path: &str, opts: RequestOpts) -> Result<String, HttpError> {
        self.request_text_internal(Method::GET, path, None, opts)
            .await
    }

    /// POST `fields` as `application/x-www-form-urlencoded` and return the
    /// response body as text.
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        opts: RequestOpts,
    ) -> Result<String, HttpError> {
        let body = encode_form(fields).into_bytes();
        self.request_text_internal(Method::POST, path, Some(body), opts)
            .await
    }

    // ==============================
    // Core request implementation
    // ==============================

    async fn request_text_internal(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        opts: RequestOpts,
    ) -> Result<String, HttpError> {
        let url = self.resolve(path)?;

        let mut attempt = 0usize;
        let max_retries = opts.retries.unwrap_or(self.max_retries);
        let req_id = format!("r{:x}", NEXT_REQ_ID.fetch_add(1, Ordering::Relaxed));

        loop {
            // ----- Build request -----
            let mut rb = self.inner.request(method.clone(), url.clone());

            let timeout = opts.timeout.unwrap_or(self.default_timeout);
            rb = rb.timeout(timeout);

            // Send exact bytes so raw logging shows what the device receives.
            let mut sent_headers = HeaderMap::new();
            if let Some(bytes) = &body {
                sent_headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
                rb = rb.body(bytes.clone());
            }
            rb = rb.headers(sent_headers.clone());

            let attempt0 = attempt + 1;
            tracing::debug!(
                req_id=%req_id,
                attempt=attempt0,
                max_retries,
                method=%method,
                host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
                query=?url.query(),
                timeout_ms=timeout.as_millis() as u64,
                body_len=body.as_ref().map(Vec::len).unwrap_or(0),
                "http.request.start"
            );

            if raw_enabled() {
                let curl = make_curl(&method, &url, &sent_headers, body.as_deref());
                tracing::debug!(target: "http.raw", %req_id, %curl, "request");
            }

            // ----- Send -----
            let t0 = std::time::Instant::now();
            let resp = match rb.send().await {
                Ok(resp) => resp,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            req_id=%req_id,
                            attempt,
                            max_retries,
                            backoff_ms=delay.as_millis() as u64,
                            message=%message,
                            "http.retrying.network_send"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(
                        req_id=%req_id,
                        attempt,
                        max_retries,
                        message=%message,
                        "http.network_error.send"
                    );
                    return Err(HttpError::Network(message));
                }
            };
            let status = resp.status();
            let headers = resp.headers().clone();
            // Honours the declared charset, lossy UTF-8 otherwise.
            let text = match resp.text().await {
                Ok(text) => text,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            req_id=%req_id,
                            attempt,
                            max_retries,
                            backoff_ms=delay.as_millis() as u64,
                            message=%message,
                            "http.retrying.network_body"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(
                        req_id=%req_id,
                        attempt,
                        max_retries,
                        message=%message,
                        "http.network_error.body"
                    );
                    return Err(HttpError::Network(message));
                }
            };
            let dur_ms = t0.elapsed().as_millis() as u64;

            tracing::debug!(
                req_id=%req_id,
                %status,
                duration_ms=dur_ms,
                body_len=text.len(),
                content_type=?headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
                "http.response.headers"
            );

            if raw_enabled() {
                let hdrs = redact_headers(&headers);
                let truncated = text.len() > RAW_MAX_BODY;
                let mut shown = text.clone();
                truncate_at_char_boundary(&mut shown, RAW_MAX_BODY);
                tracing::info!(
                    target:"http.raw",
                    %req_id,
                    status=%status,
                    duration_ms=dur_ms,
                    headers=?hdrs,
                    body=%shown,
                    truncated
                );
            }

            let snippet = snip_body(&text);
            tracing::trace!(
                req_id=%req_id,
                body_snippet=%snippet,
                "http.response.body_snippet"
            );

            // ----- Success path -----
            if status.is_success() {
                return Ok(text);
            }

            // ----- Non-success: maybe retry -----
            let is_429 = status == StatusCode::TOO_MANY_REQUESTS;
            let is_5xx = status.is_server_error();

            if (is_429 || is_5xx) && attempt < max_retries {
                attempt += 1;
                let delay = retry_after_delay_secs(&headers)
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| backoff(attempt));
                tracing::warn!(
                    req_id=%req_id,
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms=delay.as_millis() as u64,
                    body_snippet=%snippet,
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(
                req_id=%req_id,
                %status,
                body_snippet=%snippet,
                "http.error"
            );
            return Err(HttpError::Status {
                status,
                body_snippet: snippet,
            });
        }
    }
}

// ==============================
// Helpers
// ==============================

/// Encode `fields` as an `application/x-www-form-urlencoded` body.
///
/// ```
/// let body = isg_http::encode_form(&[("data", r#"[{"name":"val16"}]"#)]);
/// assert_eq!(body, "data=%5B%7B%22name%22%3A%22val16%22%7D%5D");
/// ```
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

fn backoff(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt.saturating_sub(1)).min(16)))
}

fn retry_after_delay_secs(h: &HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &str) -> String {
    let mut snip = body.to_string();
    if snip.len() > 500 {
        truncate_at_char_boundary(&mut snip, 500);
        snip.push_str("...");
    }
    snip
}

fn truncate_at_char_boundary(s: &mut String, max: usize) {
    let mut cut = max.min(s.len());
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_capped_on_a_char_boundary() {
        let body = "°".repeat(400); // two bytes each
        let snip = snip_body(&body);
        assert!(snip.ends_with("..."));
        assert!(snip.len() <= 503);
    }

    #[test]
    fn cookies_are_redacted() {
        let mut h = HeaderMap::new();
        h.insert("cookie", HeaderValue::from_static("PHPSESSID=abc"));
        h.insert("accept", HeaderValue::from_static("text/html"));
        let redacted = redact_headers(&h);
        assert!(redacted.contains(&("cookie".to_string(), "<redacted>".to_string())));
        assert!(redacted.contains(&("accept".to_string(), "text/html".to_string())));
    }

    #[test]
    fn backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_millis(200));
        assert_eq!(backoff(2), Duration::from_millis(400));
        assert_eq!(backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn curl_line_contains_form_body() {
        let url = Url::parse("http://10.0.0.2/save.php").unwrap();
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        let curl = make_curl(&Method::POST, &url, &h, Some(b"data=x"));
        assert!(curl.starts_with("curl -XPOST"));
        assert!(curl.contains("-d 'data=x'"));
        assert!(curl.ends_with("'http://10.0.0.2/save.php'"));
    }
}
