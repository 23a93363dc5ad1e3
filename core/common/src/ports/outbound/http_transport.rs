//! HTTP 送信 Outbound ポート
//!
//! requester はこの trait 越しに 1 回だけ POST する。実装は `common::adapter::ReqwestTransport`、
//! テストでは呼び出し回数を数えるスタブを注入する。

use std::time::Duration;

/// 送信する 1 件のリクエスト（JSON 本文の POST）
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    /// (name, value)。Debug では Authorization の値を伏せる
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "***")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// 受信したレスポンス（ステータスと本文のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 送信失敗（いずれも呼び出し側ではネットワークエラーになる）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("HTTP request failed: {0}")]
    Other(String),
}

/// JSON を POST してレスポンスを受け取る（ブロッキング）
pub trait HttpTransport: Send + Sync {
    fn post_json(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            url: "http://localhost/chat/completions".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: "{}".to_string(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("authorization"), None);
    }

    #[test]
    fn test_debug_redacts_authorization() {
        let req = HttpRequest {
            url: "http://localhost/chat/completions".to_string(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), "Bearer sk-secret".to_string()),
            ],
            body: "{}".to_string(),
            timeout: Duration::from_secs(1),
        };
        let debug = format!("{:?}", req);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("\"Authorization\", \"***\""));
        assert!(debug.contains("application/json"));
        assert_eq!(req.header("authorization"), Some("Bearer sk-secret"));
    }

    #[test]
    fn test_is_success() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(401, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }
}
