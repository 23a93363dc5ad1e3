//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: common::ports::outbound（環境変数・HTTP・ログ）をそのまま使う

pub mod inbound;
