//! Ports & Adapters のポート定義
//!
//! - inbound: なし（common はライブラリのためアプリの入り口を持たない）
//! - outbound: 環境変数・HTTP・ログを外界に依頼するための trait

pub mod outbound;
