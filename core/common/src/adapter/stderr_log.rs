//! 人間向けに stderr へ 1 行ずつ出す Log 実装（-v / --verbose 時）
//!
//! fields は要点のみ（巨大化防止のため値を切り詰める）。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use serde_json::Value;
use std::io::Write;

const FIELD_VALUE_MAX: usize = 200;

fn field_summary(value: &Value) -> String {
    let s = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if s.chars().count() <= FIELD_VALUE_MAX {
        return s;
    }
    let truncated: String = s.chars().take(FIELD_VALUE_MAX).collect();
    format!("{}...", truncated)
}

/// 1 レコードを `[level] message k=v ...` に整形する
pub fn format_line(record: &LogRecord) -> String {
    let mut line = format!("[{}] {}", record.level.as_str(), record.message);
    if let Some(fields) = &record.fields {
        for (k, v) in fields {
            line.push(' ');
            line.push_str(k);
            line.push('=');
            line.push_str(&field_summary(v));
        }
    }
    line
}

/// stderr へ出力する Log 実装。`max_level` より詳細なレコードは捨てる
pub struct StderrLog {
    max_level: LogLevel,
}

impl StderrLog {
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level > self.max_level {
            return Ok(());
        }
        let mut err = std::io::stderr().lock();
        writeln!(err, "{}", format_line(record)).map_err(|e| Error::io_msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let rec = LogRecord::new(LogLevel::Info, "completion request finished")
            .field("elapsed_ms", 42)
            .field("model", "gpt-4o");
        assert_eq!(
            format_line(&rec),
            "[info] completion request finished elapsed_ms=42 model=gpt-4o"
        );
    }

    #[test]
    fn test_long_field_is_truncated() {
        let rec = LogRecord::new(LogLevel::Debug, "x").field("body", "a".repeat(500));
        let line = format_line(&rec);
        assert!(line.ends_with("..."));
        assert!(line.len() < 300);
    }

    #[test]
    fn test_level_filter() {
        let log = StderrLog::new(LogLevel::Warn);
        assert!(log.log(&LogRecord::new(LogLevel::Debug, "dropped")).is_ok());
    }
}
