//! oneshot コマンドの enum（Command Pattern）
//!
//! ヘルプ表示 vs 単発リクエストの分岐を enum で明示する。

use common::domain::ModelName;
use std::time::Duration;

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// レスポンス JSON 全体（整形済み）
    #[default]
    Raw,
    /// 生成テキストのみ
    Text,
}

/// oneshot の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum OneshotCommand {
    /// ヘルプ表示
    Help,
    /// 1 回だけ問い合わせて結果を出力する
    Complete {
        prompt: String,
        model: Option<ModelName>,
        system: Option<String>,
        temperature: Option<f64>,
        max_tokens: Option<u32>,
        timeout: Option<Duration>,
        format: OutputFormat,
    },
}

impl OneshotCommand {
    /// ログ用の短い名前
    pub fn name(&self) -> &'static str {
        match self {
            OneshotCommand::Help => "help",
            OneshotCommand::Complete { .. } => "complete",
        }
    }
}
