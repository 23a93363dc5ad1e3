//! 標準環境変数解決実装（std::env を委譲、.env は dotenvy で読み込む）

use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl StdEnvResolver {
    /// カレントディレクトリから親へ辿って `.env` を読み込む
    ///
    /// 既に設定済みの変数は上書きしない。`.env` が無いのは正常（None）。
    pub fn load_dotenv(&self) -> Option<PathBuf> {
        dotenvy::dotenv().ok()
    }
}

impl EnvResolver for StdEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}
