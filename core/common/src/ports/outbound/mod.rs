//! Outbound ポート: 環境変数・HTTP 送信・ログ出力を trait で抽象化する

pub mod env_resolver;
pub mod http_transport;
pub mod log;

pub use env_resolver::EnvResolver;
pub use http_transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
