//! サービスからのレスポンス（構造は検証せずそのまま保持する）

use serde_json::Value;

/// トークン使用量（usage が含まれる場合のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Usage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

/// 生のレスポンス JSON
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse(Value);

impl CompletionResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// 生成テキスト。`choices[0].message.content` を優先し、無ければトップレベルの `content`
    pub fn content(&self) -> Option<&str> {
        self.0["choices"][0]["message"]["content"]
            .as_str()
            .or_else(|| self.0["content"].as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.0["id"].as_str()
    }

    pub fn model(&self) -> Option<&str> {
        self.0["model"].as_str()
    }

    pub fn usage(&self) -> Option<Usage> {
        let usage = self.0.get("usage")?.as_object()?;
        let get = |k: &str| usage.get(k).and_then(Value::as_u64);
        Some(Usage {
            prompt_tokens: get("prompt_tokens"),
            completion_tokens: get("completion_tokens"),
            total_tokens: get("total_tokens"),
        })
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<Value> for CompletionResponse {
    fn from(v: Value) -> Self {
        Self(v)
    }
}
