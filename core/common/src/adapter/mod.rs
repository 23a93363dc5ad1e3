//! アダプター（外界の I/O を trait で抽象化した実装）
//!
//! 標準実装（Std* / Reqwest*）とログ出力先。テストではモックを注入する。

pub mod file_json_log;
pub mod reqwest_transport;
pub mod std_env_resolver;
pub mod stderr_log;

pub use file_json_log::{FileJsonLog, NoopLog, TeeLog};
pub use reqwest_transport::ReqwestTransport;
pub use std_env_resolver::StdEnvResolver;
pub use stderr_log::StderrLog;
