//! Chat Completions への単発リクエスト
//!
//! 設定の解決（config）、ペイロード（request）、生レスポンス（response）、送信と分類（requester）。

pub mod config;
pub mod request;
pub mod requester;
pub mod response;

pub use config::{RequesterConfig, Settings};
pub use request::CompletionRequest;
pub use requester::CompletionRequester;
pub use response::{CompletionResponse, Usage};
