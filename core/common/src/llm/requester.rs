//! 1 回だけのリクエスト/レスポンス交換を行う CompletionRequester
//!
//! 入力検証 → ペイロード生成 → HttpTransport で POST → ステータスと本文を分類して返す。
//! 再試行・ストリーミングは行わない。

use crate::adapter::NoopLog;
use crate::domain::Credential;
use crate::error::{Error, ServiceErrorKind};
use crate::llm::config::{RequesterConfig, MAX_TIMEOUT_SECS};
use crate::llm::request::CompletionRequest;
use crate::llm::response::CompletionResponse;
use crate::ports::outbound::{HttpRequest, HttpResponse, HttpTransport, Log, LogLevel, LogRecord};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// エラーメッセージに含める本文の上限（巨大化防止）
const ERROR_BODY_MAX: usize = 400;

/// Chat Completions に 1 回だけ問い合わせるクライアント
///
/// エントリポイントで一度だけ組み立て、参照で渡す。内部状態は持たない。
pub struct CompletionRequester {
    transport: Arc<dyn HttpTransport>,
    config: RequesterConfig,
    logger: Arc<dyn Log>,
}

impl CompletionRequester {
    pub fn new(transport: Arc<dyn HttpTransport>, config: RequesterConfig) -> Self {
        Self {
            transport,
            config,
            logger: Arc::new(NoopLog),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = logger;
        self
    }

    /// user メッセージ 1 件で問い合わせる
    ///
    /// credential / model / prompt のいずれかが空なら、送信せずに設定エラーを返す。
    pub fn complete(
        &self,
        credential: &Credential,
        model: &str,
        prompt: &str,
    ) -> Result<CompletionResponse, Error> {
        self.complete_request(credential, &CompletionRequest::single(model, prompt))
    }

    /// 組み立て済みのリクエストで問い合わせる（system 指示・temperature 付きなど）
    pub fn complete_request(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, Error> {
        if credential.is_empty() {
            return Err(Error::invalid_argument("API key must not be empty"));
        }
        request.validate()?;
        if self.config.timeout.is_zero() || self.config.timeout.as_secs() > MAX_TIMEOUT_SECS {
            return Err(Error::invalid_argument(format!(
                "timeout must be between 1 and {} seconds",
                MAX_TIMEOUT_SECS
            )));
        }

        let url = self.config.completions_url();
        let http_request = HttpRequest {
            url: url.clone(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", credential.expose()),
                ),
            ],
            body: request.to_json()?,
            timeout: self.config.timeout,
        };

        self.emit(
            LogRecord::new(LogLevel::Info, "completion request started")
                .kind("request")
                .field("url", url)
                .field("model", request.model.as_str())
                .field("messages", request.messages.len()),
        );

        let started = Instant::now();
        let result = self
            .transport
            .post_json(&http_request)
            .map_err(|e| Error::http(e.to_string()))
            .and_then(interpret_response);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(resp) => {
                let mut rec = LogRecord::new(LogLevel::Info, "completion request finished")
                    .kind("request")
                    .field("elapsed_ms", elapsed_ms);
                if let Some(total) = resp.usage().and_then(|u| u.total_tokens) {
                    rec = rec.field("total_tokens", total);
                }
                self.emit(rec);
            }
            Err(e) => {
                self.emit(
                    LogRecord::new(LogLevel::Error, e.to_string())
                        .kind("error")
                        .field("error_kind", e.kind().as_str())
                        .field("elapsed_ms", elapsed_ms),
                );
            }
        }
        result
    }

    fn emit(&self, record: LogRecord) {
        // ログ出力の失敗で結果を変えない
        let _ = self.logger.log(&record.layer("adapter"));
    }
}

/// ステータスと本文から結果を決める
fn interpret_response(response: HttpResponse) -> Result<CompletionResponse, Error> {
    let status = response.status;
    if !response.is_success() {
        let message = error_message(status, &response.body);
        return Err(match status {
            401 | 403 => Error::auth(format!("authentication failed: {}", message)),
            _ => Error::service(
                Some(status),
                ServiceErrorKind::from_status(status),
                format!("API error: {}", message),
            ),
        });
    }

    let value: Value = serde_json::from_str(&response.body).map_err(|e| {
        Error::service(
            Some(status),
            ServiceErrorKind::MalformedResponse,
            format!("Failed to parse response JSON: {}", e),
        )
    })?;

    // 200 でも error オブジェクトを返す互換サーバがある
    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let msg = error["message"]
            .as_str()
            .or_else(|| error.as_str())
            .unwrap_or("Unknown error");
        return Err(Error::service(
            Some(status),
            ServiceErrorKind::Other,
            format!("API error: {}", msg),
        ));
    }

    let response = CompletionResponse::new(value);
    match response.content() {
        Some(text) if !text.is_empty() => Ok(response),
        _ => Err(Error::service(
            Some(status),
            ServiceErrorKind::MalformedResponse,
            "response contains no generated content",
        )),
    }
}

/// エラーレスポンスからメッセージを取り出す（`error.message` が無ければ本文の先頭）
fn error_message(status: u16, body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = v["error"]["message"].as_str() {
            return msg.to_string();
        }
    }
    let body = body.trim();
    if body.chars().count() > ERROR_BODY_MAX {
        let truncated: String = body.chars().take(ERROR_BODY_MAX).collect();
        format!("HTTP {}: {}...", status, truncated)
    } else {
        format!("HTTP {}: {}", status, body)
    }
}
