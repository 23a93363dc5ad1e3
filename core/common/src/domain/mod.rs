//! ドメイン型（Newtype）
//!
//! String を直接運ばず、意味のある型に包んで境界を明確にする。

use serde::{Deserialize, Serialize};

/// API キー（認証用の不透明なトークン）
///
/// Debug / Display では値を出さない。ログやエラーメッセージに混ざらないようにする。
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// 空白のみも空とみなす
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Authorization ヘッダ用に生の値を取り出す
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

/// モデル名（gpt-4o 等）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName(String);

impl ModelName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for ModelName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ModelName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// メッセージの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
    Assistant,
}

/// 1 件のメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_is_redacted() {
        let c = Credential::new("sk-secret-value");
        assert_eq!(format!("{:?}", c), "Credential(***)");
        assert_eq!(c.to_string(), "***");
        assert_eq!(c.expose(), "sk-secret-value");
    }

    #[test]
    fn test_credential_blank_is_empty() {
        assert!(Credential::new("").is_empty());
        assert!(Credential::new("  \n").is_empty());
        assert!(!Credential::new("k").is_empty());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::user("Hello");
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["role"], "user");
        assert_eq!(v["content"], "Hello");
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
    }

    #[test]
    fn test_role_rejects_unknown() {
        let r: Result<Role, _> = serde_json::from_str("\"function\"");
        assert!(r.is_err());
    }
}
