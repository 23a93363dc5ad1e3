//! 単発リクエストのユースケース
//!
//! 設定を解決し、CLI 指定で上書きしてから requester を組み立て、1 回だけ問い合わせて出力する。
//! 出力は成功時のみ書く（失敗時に部分的な出力を残さない）。

use crate::domain::command::OutputFormat;
use common::domain::ModelName;
use common::error::{Error, ServiceErrorKind};
use common::llm::{CompletionRequest, CompletionRequester, Settings};
use common::ports::outbound::{EnvResolver, HttpTransport, Log};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// 1 回の実行に必要な入力
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteInput {
    pub prompt: String,
    pub model: Option<ModelName>,
    pub system: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
    pub format: OutputFormat,
}

pub struct CompleteUseCase {
    env: Arc<dyn EnvResolver>,
    transport: Arc<dyn HttpTransport>,
    logger: Arc<dyn Log>,
}

impl CompleteUseCase {
    pub fn new(
        env: Arc<dyn EnvResolver>,
        transport: Arc<dyn HttpTransport>,
        logger: Arc<dyn Log>,
    ) -> Self {
        Self {
            env,
            transport,
            logger,
        }
    }

    pub fn run(&self, input: CompleteInput, out: &mut dyn Write) -> Result<i32, Error> {
        let mut settings = Settings::from_env(self.env.as_ref())?;
        if let Some(model) = input.model {
            settings.model = model;
        }
        if let Some(timeout) = input.timeout {
            settings.requester.timeout = timeout;
        }

        let requester = CompletionRequester::new(Arc::clone(&self.transport), settings.requester)
            .with_logger(Arc::clone(&self.logger));

        let response = match (input.system, input.temperature, input.max_tokens) {
            (None, None, None) => {
                requester.complete(&settings.credential, &settings.model, &input.prompt)?
            }
            (system, temperature, max_tokens) => {
                let mut request = CompletionRequest::single(settings.model.to_string(), input.prompt);
                if let Some(system) = system {
                    request = request.with_system(system);
                }
                if let Some(t) = temperature {
                    request = request.with_temperature(t);
                }
                if let Some(n) = max_tokens {
                    request = request.with_max_tokens(n);
                }
                requester.complete_request(&settings.credential, &request)?
            }
        };

        let rendered = match input.format {
            OutputFormat::Raw => response.to_pretty_json(),
            OutputFormat::Text => response
                .content()
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::service(
                        None,
                        ServiceErrorKind::MalformedResponse,
                        "response contains no generated content",
                    )
                })?,
        };
        writeln!(out, "{}", rendered).map_err(|e| Error::io_msg(e.to_string()))?;
        out.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(0)
    }
}
