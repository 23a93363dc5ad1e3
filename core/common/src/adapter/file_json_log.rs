//! ファイルへ JSONL で追記する Log 実装
//!
//! ログの出力先はファイルのみ。エラー時のコンソール表示（stderr）とは別。

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    path: PathBuf,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io_msg(format!("create {}: {}", parent.display(), e)))?;
        }
        let mut w = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io_msg(format!("open {}: {}", self.path.display(), e)))?;
        let mut line = serde_json::to_string(record).map_err(|e| Error::json(e.to_string()))?;
        line.push('\n');
        w.write_all(line.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// 何も出力しない Log 実装（既定・テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

/// 複数の Log へ同じレコードを流す。1 つが失敗しても残りには書き、最初のエラーを返す
pub struct TeeLog {
    sinks: Vec<Box<dyn Log>>,
}

impl TeeLog {
    pub fn new(sinks: Vec<Box<dyn Log>>) -> Self {
        Self { sinks }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::LogLevel;

    #[test]
    fn test_noop_log() {
        let log = NoopLog;
        let rec = LogRecord::new(LogLevel::Info, "test");
        assert!(log.log(&rec).is_ok());
    }

    #[test]
    fn test_file_json_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("oneshot.jsonl");
        let log = FileJsonLog::new(&path);
        log.log(&LogRecord::new(LogLevel::Info, "first").layer("cli"))
            .unwrap();
        log.log(&LogRecord::new(LogLevel::Error, "second").field("exit_code", 74))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["message"], "first");
        assert_eq!(first["layer"], "cli");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level"], "error");
        assert_eq!(second["fields"]["exit_code"], 74);
    }

    #[test]
    fn test_tee_log_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("ok.jsonl");
        // ディレクトリを開こうとして失敗する
        let bad = FileJsonLog::new(dir.path());
        let tee = TeeLog::new(vec![Box::new(bad), Box::new(FileJsonLog::new(&good))]);
        assert!(tee.log(&LogRecord::new(LogLevel::Info, "x")).is_err());
        assert_eq!(std::fs::read_to_string(&good).unwrap().lines().count(), 1);
    }
}
