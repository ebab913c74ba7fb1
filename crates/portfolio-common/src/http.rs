use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::str::FromStr;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::warn;

use crate::error::CommonError;

#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub max_error_body_bytes: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 2,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_millis(2_000),
            max_error_body_bytes: 8 * 1024,
        }
    }
}

impl HttpClientConfig {
    /// Optional:
    /// - `PORTFOLIO_HTTP_TIMEOUT_SECS` (default: 10)
    /// - `PORTFOLIO_HTTP_MAX_RETRIES` (default: 2)
    /// - `PORTFOLIO_HTTP_RETRY_INITIAL_MS` (default: 200)
    /// - `PORTFOLIO_HTTP_RETRY_MAX_MS` (default: 2000)
    /// - `PORTFOLIO_HTTP_MAX_ERROR_BODY_BYTES` (default: 8192)
    ///
    /// Unparsable values keep the default.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            timeout: env_parse("PORTFOLIO_HTTP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(d.timeout),
            max_retries: env_parse("PORTFOLIO_HTTP_MAX_RETRIES").unwrap_or(d.max_retries),
            initial_backoff: env_parse("PORTFOLIO_HTTP_RETRY_INITIAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(d.initial_backoff),
            max_backoff: env_parse("PORTFOLIO_HTTP_RETRY_MAX_MS")
                .map(Duration::from_millis)
                .unwrap_or(d.max_backoff),
            max_error_body_bytes: env_parse("PORTFOLIO_HTTP_MAX_ERROR_BODY_BYTES")
                .unwrap_or(d.max_error_body_bytes),
        }
    }

    /// Delay before retry number `retry` (0-based): doubling from `initial_backoff`, capped
    /// at `max_backoff`, plus up to a quarter of that as jitter.
    fn backoff(&self, retry: u32) -> Duration {
        let base = self
            .initial_backoff
            .checked_mul(1u32.checked_shl(retry).unwrap_or(u32::MAX))
            .map_or(self.max_backoff, |d| d.min(self.max_backoff));
        let spread = (base.as_millis() as u64 / 4).max(1);
        base + Duration::from_millis(jitter(retry) % (spread + 1))
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn jitter(seed: u32) -> u64 {
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u32(seed);
    hasher.finish()
}

/// Thin GET-only client used to pull static site resources.
#[derive(Clone)]
pub struct HttpClient {
    config: HttpClientConfig,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("portfolio/dft-blog")
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    /// GET `url` and return the response body as text.
    ///
    /// Transport failures, 429 and 5xx responses are retried with capped exponential
    /// backoff. Any other non-success status fails immediately.
    pub async fn get_text(&self, url: &str) -> Result<String, CommonError> {
        let mut retry = 0;
        loop {
            let err = match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) => e,
            };
            if retry >= self.config.max_retries || !is_transient(&err) {
                return Err(err);
            }
            let delay = self.config.backoff(retry);
            retry += 1;
            warn!(url, retry, delay_ms = delay.as_millis(), error = %err, "GET failed, retrying");
            tokio::time::sleep(delay).await;
        }
    }

    async fn get_once(&self, url: &str) -> Result<String, CommonError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let mut body = resp.text().await?;
        if status.is_success() {
            return Ok(body);
        }
        truncate_at_char_boundary(&mut body, self.config.max_error_body_bytes);
        Err(CommonError::Status { status, body })
    }
}

fn is_transient(err: &CommonError) -> bool {
    match err {
        CommonError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
        CommonError::Status { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
        }
        CommonError::Io(_) => false,
    }
}

fn truncate_at_char_boundary(s: &mut String, max_bytes: usize) {
    if s.len() <= max_bytes {
        return;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/blog/index.json")
    }

    fn no_retry_config() -> HttpClientConfig {
        HttpClientConfig {
            max_retries: 0,
            ..HttpClientConfig::default()
        }
    }

    #[test]
    fn backoff_doubles_up_to_cap() {
        let config = HttpClientConfig {
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_millis(1_000),
            ..HttpClientConfig::default()
        };
        let first = config.backoff(0);
        assert!(first >= Duration::from_millis(200) && first <= Duration::from_millis(250));
        let second = config.backoff(1);
        assert!(second >= Duration::from_millis(400) && second <= Duration::from_millis(500));
        for retry in [3, 10, 40] {
            let late = config.backoff(retry);
            assert!(late >= Duration::from_millis(1_000) && late <= Duration::from_millis(1_250));
        }
    }

    #[test]
    fn retries_only_throttling_and_server_errors() {
        let status = |code: u16| CommonError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        };
        assert!(is_transient(&status(503)));
        assert!(is_transient(&status(429)));
        assert!(!is_transient(&status(404)));
        assert!(!is_transient(&CommonError::Io(std::io::Error::other("disk"))));
    }

    #[test]
    fn error_body_truncation_keeps_utf8() {
        let mut body = "ééé".to_string();
        truncate_at_char_boundary(&mut body, 3);
        assert_eq!(body, "é");
        let mut short = "ok".to_string();
        truncate_at_char_boundary(&mut short, 8);
        assert_eq!(short, "ok");
    }

    #[tokio::test]
    async fn get_text_returns_body() {
        let url = serve_once("200 OK", r#"{"posts":[]}"#).await;
        let client = HttpClient::new(no_retry_config()).unwrap();
        let body = client.get_text(&url).await.unwrap();
        assert_eq!(body, r#"{"posts":[]}"#);
    }

    #[tokio::test]
    async fn get_text_surfaces_status() {
        let url = serve_once("404 Not Found", "missing").await;
        let client = HttpClient::new(no_retry_config()).unwrap();
        match client.get_text(&url).await {
            Err(CommonError::Status { status, body }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "missing");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
