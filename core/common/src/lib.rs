//! oneshot 共通ライブラリ
//!
//! Chat Completions への単発リクエストと、それを支える設定・ログ・HTTP のポートとアダプター。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Credential, ModelName, ChatMessage）
pub mod domain;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// 単発リクエスト
pub mod llm;

pub use error::Error;
