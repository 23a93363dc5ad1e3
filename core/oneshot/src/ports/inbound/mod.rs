//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::cli::Config;
use common::error::Error;

/// Config を受け取って実行し、終了コードを返す
///
/// main はこの trait を実装した Runner の run を呼び出す。
pub trait UseCaseRunner {
    fn run(&self, config: Config) -> Result<i32, Error>;
}
