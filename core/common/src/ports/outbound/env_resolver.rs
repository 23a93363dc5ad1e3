//! 環境変数解決 Outbound ポート
//!
//! 設定の解決（llm::config）はこの trait 経由でのみ環境変数にアクセスする。

use std::collections::HashMap;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の `MapEnvResolver`。
pub trait EnvResolver: Send + Sync {
    /// 変数の値。未設定なら None（空文字列はそのまま返す）
    fn var(&self, name: &str) -> Option<String>;

    /// 空白のみの値を未設定とみなして返す
    fn non_empty_var(&self, name: &str) -> Option<String> {
        self.var(name).filter(|v| !v.trim().is_empty())
    }
}

/// 固定の値を返す EnvResolver（テスト・埋め込み用）
#[derive(Debug, Clone, Default)]
pub struct MapEnvResolver {
    vars: HashMap<String, String>,
}

impl MapEnvResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvResolver for MapEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
