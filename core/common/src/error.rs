//! エラーハンドリング
//!
//! 呼び出し側が扱う 4 分類（設定・認証・ネットワーク・サービス）に、内部エラー（JSON / I/O）を加えた列挙型。
//! 終了コードは sysexits に合わせる。

use std::fmt;

/// サービス側エラーの細分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// 429
    RateLimited,
    /// 400 / 404 / 409 / 413 / 422（モデル名不正など）
    InvalidRequest,
    /// 5xx
    Unavailable,
    /// 成功ステータスだが本文が JSON でない、または生成テキストが無い
    MalformedResponse,
    Other,
}

impl ServiceErrorKind {
    /// HTTP ステータスから分類する（401 / 403 は認証エラーとして別扱い）
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            400 | 404 | 409 | 413 | 422 => Self::InvalidRequest,
            500..=599 => Self::Unavailable,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::InvalidRequest => "invalid_request",
            Self::Unavailable => "unavailable",
            Self::MalformedResponse => "malformed_response",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// エラーの大分類（ログ・表示用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Network,
    Service,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Authentication => "authentication",
            Self::Network => "network",
            Self::Service => "service",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 入力・設定の不備。ネットワーク呼び出し前に検出する
    #[error("{0}")]
    Configuration(String),
    /// 資格情報がサービスに拒否された（401 / 403）
    #[error("{0}")]
    Authentication(String),
    /// 接続不可・タイムアウト・本文の読み取り失敗
    #[error("{0}")]
    Network(String),
    /// サービスが非成功ステータスまたは不正な本文を返した
    #[error("{message}")]
    Service {
        status: Option<u16>,
        kind: ServiceErrorKind,
        message: String,
    },
    #[error("JSON error: {0}")]
    Json(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// 引数不正・設定不足
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// 必須の環境変数が無い
    pub fn env(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn service(status: Option<u16>, kind: ServiceErrorKind, msg: impl Into<String>) -> Self {
        Self::Service {
            status,
            kind,
            message: msg.into(),
        }
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Network(_) => ErrorKind::Network,
            Self::Service { .. } => ErrorKind::Service,
            Self::Json(_) | Self::Io(_) => ErrorKind::Internal,
        }
    }

    /// 使い方の表示が役に立つエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// 呼び出し側が時間を置いて再試行してよいか（このクレート自身は再試行しない）
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Service { kind, .. } => {
                matches!(kind, ServiceErrorKind::RateLimited | ServiceErrorKind::Unavailable)
            }
            _ => false,
        }
    }

    /// sysexits 準拠の終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 64,
            Self::Service { .. } => 69,
            Self::Json(_) | Self::Io(_) => 70,
            Self::Network(_) => 74,
            Self::Authentication(_) => 77,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
