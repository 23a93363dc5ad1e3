//! Chat Completions リクエストペイロード

use crate::domain::{ChatMessage, Role};
use crate::error::Error;
use serde::Serialize;

/// temperature の許容範囲（OpenAI 互換 API の仕様に合わせる）
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// `/chat/completions` に送る本文
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// 生成トークン数の上限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// user メッセージ 1 件だけのリクエスト
    pub fn single(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: None,
            max_tokens: None,
        }
    }

    /// 先頭に system メッセージを差し込む
    pub fn with_system(mut self, instruction: impl Into<String>) -> Self {
        self.messages.insert(0, ChatMessage::system(instruction));
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// 送信前の検証。失敗時は設定エラー（ネットワークには出ない）
    pub fn validate(&self) -> Result<(), Error> {
        if self.model.trim().is_empty() {
            return Err(Error::invalid_argument("Model name must not be empty"));
        }
        if self.messages.is_empty() {
            return Err(Error::invalid_argument(
                "A completion request needs at least one message",
            ));
        }
        let has_user_content = self
            .messages
            .iter()
            .any(|m| m.role == Role::User && !m.content.trim().is_empty());
        if !has_user_content {
            return Err(Error::invalid_argument("Prompt must not be empty"));
        }
        if let Some(t) = self.temperature {
            if !TEMPERATURE_RANGE.contains(&t) {
                return Err(Error::invalid_argument(format!(
                    "temperature must be between 0.0 and 2.0 (got {})",
                    t
                )));
            }
        }
        if self.max_tokens == Some(0) {
            return Err(Error::invalid_argument("max_tokens must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_payload_shape() {
        let req = CompletionRequest::single("gpt-4o", "Hello");
        let v: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "Hello"}]
            })
        );
    }

    #[test]
    fn test_with_system_prepends() {
        let req = CompletionRequest::single("gpt-4o", "Hello")
            .with_system("You are terse")
            .with_temperature(0.2);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, Role::System);
        assert_eq!(req.messages[1].role, Role::User);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["temperature"], 0.2);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_inputs() {
        assert!(CompletionRequest::single("", "hi").validate().is_err());
        assert!(CompletionRequest::single("gpt-4o", "   ").validate().is_err());

        let req = CompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![],
            temperature: None,
            max_tokens: None,
        };
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("at least one message"));
    }

    #[test]
    fn test_validate_system_only_is_rejected() {
        let req = CompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage::system("rules")],
            temperature: None,
            max_tokens: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_temperature_range() {
        let req = CompletionRequest::single("gpt-4o", "hi").with_temperature(2.5);
        assert!(req.validate().unwrap_err().to_string().contains("temperature"));
        let req = CompletionRequest::single("gpt-4o", "hi").with_temperature(0.0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_max_tokens_serialized_only_when_set() {
        let req = CompletionRequest::single("gpt-4o", "hi");
        let v = serde_json::to_value(&req).unwrap();
        assert!(v.get("max_tokens").is_none());

        let req = req.with_temperature(0.7).with_max_tokens(4000);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["max_tokens"], 4000);
        assert_eq!(v["temperature"], 0.7);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_max_tokens() {
        let err = CompletionRequest::single("gpt-4o", "hi")
            .with_max_tokens(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
        assert!(err.is_usage());
    }
}
