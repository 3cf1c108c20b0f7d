//! Telegram Bot API notifier.

use crate::notifier::{Notifier, NotifyError};
use async_trait::async_trait;
use pricealert_core::Credentials;
use std::time::Duration;
use tracing::{debug, warn};

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest API error body kept in a [`NotifyError`].
const MAX_ERROR_BODY: usize = 200;

/// Sends alerts to a single chat via `sendMessage`.
pub struct TelegramNotifier {
    credentials: Credentials,
    http_client: reqwest::Client,
    base_url: String,
}

impl TelegramNotifier {
    /// Create a notifier for the public Bot API.
    pub fn new(credentials: Credentials) -> Result<Self, NotifyError> {
        Self::with_base_url(credentials, TELEGRAM_API_URL)
    }

    /// Create a notifier against a custom API host (local Bot API server, tests).
    pub fn with_base_url(
        credentials: Credentials,
        base_url: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        Self::with_timeout(credentials, base_url, REQUEST_TIMEOUT)
    }

    /// Custom API host with a non-default request timeout.
    pub fn with_timeout(
        credentials: Credentials,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            credentials,
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn chat_id(&self) -> &str {
        &self.credentials.chat_id
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url, self.credentials.bot_token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let params = [
            ("chat_id", self.credentials.chat_id.as_str()),
            ("text", message),
            ("parse_mode", "HTML"),
        ];

        let response = self
            .http_client
            .post(self.send_message_url())
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut description = response.text().await.unwrap_or_default();
            if description.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| description.is_char_boundary(i))
                    .unwrap_or(0);
                description.truncate(cut);
            }
            warn!(
                status = status.as_u16(),
                "Telegram API returned non-success status"
            );
            return Err(NotifyError::HttpStatus {
                status: status.as_u16(),
                description,
            });
        }

        debug!(chat_id = %self.credentials.chat_id, "Telegram message delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one request, reply with `status_line`, and return the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(head_end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
                    let content_length = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    /// Accept connections and never answer them.
    async fn serve_silent() -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        (format!("http://{}", addr), handle)
    }

    fn creds() -> Credentials {
        Credentials::new("123:ABC", "-100200")
    }

    #[test]
    fn test_send_message_url() {
        let notifier = TelegramNotifier::with_base_url(creds(), "http://localhost:8081/").unwrap();
        assert_eq!(
            notifier.send_message_url(),
            "http://localhost:8081/bot123:ABC/sendMessage"
        );
        assert_eq!(notifier.chat_id(), "-100200");
    }

    #[tokio::test]
    async fn test_send_posts_form() {
        let (base_url, server) = serve_once("HTTP/1.1 200 OK", r#"{"ok":true}"#).await;
        let notifier = TelegramNotifier::with_base_url(creds(), base_url).unwrap();

        notifier.send("<b>hi</b> & bye").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /bot123:ABC/sendMessage"));
        assert!(request.contains("application/x-www-form-urlencoded"));
        assert!(request.contains("chat_id=-100200"));
        assert!(request.contains("parse_mode=HTML"));
        assert!(request.contains("text=%3Cb%3Ehi%3C%2Fb%3E+%26+bye"));
    }

    #[tokio::test]
    async fn test_send_non_success_is_error() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 400 Bad Request",
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .await;
        let notifier = TelegramNotifier::with_base_url(creds(), base_url).unwrap();

        let err = notifier.send("hello").await.unwrap_err();
        match err {
            NotifyError::HttpStatus { status, description } => {
                assert_eq!(status, 400);
                assert!(description.contains("chat not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_send_network_error_hides_token() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let notifier = TelegramNotifier::with_base_url(creds(), format!("http://{}", addr)).unwrap();

        let err = notifier.send("hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Network(_)), "got {:?}", err);
        assert!(!err.to_string().contains("ABC"));
    }

    #[tokio::test]
    async fn test_send_timeout() {
        let (base_url, server) = serve_silent().await;
        let notifier =
            TelegramNotifier::with_timeout(creds(), base_url, Duration::from_millis(200)).unwrap();

        let err = notifier.send("hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Timeout), "got {:?}", err);
        server.abort();
    }
}
