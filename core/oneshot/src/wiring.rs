//! 配線: 標準アダプタで App を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, NoopLog, ReqwestTransport, StdEnvResolver, StderrLog, TeeLog};
use common::error::Error;
use common::llm::config::LOG_FILE_ENV;
use common::ports::outbound::{EnvResolver, HttpTransport, Log, LogLevel};

use crate::usecase::CompleteUseCase;

/// main が使う依存の束
pub struct App {
    pub logger: Arc<dyn Log>,
    pub complete_use_case: CompleteUseCase,
}

impl App {
    pub fn new(
        env_resolver: Arc<dyn EnvResolver>,
        transport: Arc<dyn HttpTransport>,
        logger: Arc<dyn Log>,
    ) -> Self {
        let complete_use_case =
            CompleteUseCase::new(env_resolver, transport, Arc::clone(&logger));
        Self {
            logger,
            complete_use_case,
        }
    }
}

/// ログ出力先を決める: ONESHOT_LOG_FILE があればファイル、-v なら stderr、両方なら両方
pub fn build_logger(env_resolver: &dyn EnvResolver, verbose: bool) -> Arc<dyn Log> {
    let mut sinks: Vec<Box<dyn Log>> = Vec::new();
    if let Some(path) = env_resolver.non_empty_var(LOG_FILE_ENV) {
        sinks.push(Box::new(FileJsonLog::new(path)));
    }
    if verbose {
        sinks.push(Box::new(StderrLog::new(LogLevel::Debug)));
    }
    match sinks.len() {
        0 => Arc::new(NoopLog),
        1 => Arc::from(sinks.remove(0)),
        _ => Arc::new(TeeLog::new(sinks)),
    }
}

/// 配線: .env を読み込み、標準アダプタで App を組み立てる
pub fn wire_oneshot(verbose: bool) -> Result<App, Error> {
    let env = StdEnvResolver;
    env.load_dotenv();
    let logger = build_logger(&env, verbose);
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new()?);
    Ok(App::new(Arc::new(env), transport, logger))
}
