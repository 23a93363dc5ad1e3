//! 実行設定の解決（環境変数 → Settings）
//!
//! API キーにハードコードした既定値は持たない。未設定なら設定エラー。

use crate::domain::{Credential, ModelName};
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "ONESHOT_MODEL";
pub const TIMEOUT_ENV: &str = "ONESHOT_TIMEOUT_SECS";
pub const LOG_FILE_ENV: &str = "ONESHOT_LOG_FILE";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// タイムアウトの上限（24 時間）。これを超えると Instant への加算があふれる
pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// requester の接続先とタイムアウト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl RequesterConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// `{base_url}/chat/completions`
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// 起動時に一度だけ解決する設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub credential: Credential,
    pub model: ModelName,
    pub requester: RequesterConfig,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// 環境変数から解決する
    ///
    /// 優先順位（モデル・タイムアウト）: CLI 指定 → 環境変数 → 既定値。CLI 指定は呼び出し側で上書きする。
    pub fn from_env(env: &dyn EnvResolver) -> Result<Self, Error> {
        let credential = env
            .non_empty_var(API_KEY_ENV)
            .map(Credential::new)
            .ok_or_else(|| {
                Error::env(format!(
                    "{} environment variable is not set (export it or add it to .env)",
                    API_KEY_ENV
                ))
            })?;
        let base_url = env
            .non_empty_var(BASE_URL_ENV)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = ModelName::new(
            env.non_empty_var(MODEL_ENV)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        );
        let timeout = match env.non_empty_var(TIMEOUT_ENV) {
            Some(raw) => parse_timeout_secs(&raw)
                .map_err(|e| Error::env(format!("{}: {}", TIMEOUT_ENV, e)))?,
            None => DEFAULT_TIMEOUT,
        };
        let log_file = env.non_empty_var(LOG_FILE_ENV).map(PathBuf::from);

        Ok(Self {
            credential,
            model,
            requester: RequesterConfig::new(base_url, timeout),
            log_file,
        })
    }
}

/// 1 から MAX_TIMEOUT_SECS までの整数秒をパースする
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, Error> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid_argument(format!("invalid timeout '{}': expected seconds", raw)))?;
    if secs == 0 {
        return Err(Error::invalid_argument("timeout must be at least 1 second"));
    }
    if secs > MAX_TIMEOUT_SECS {
        return Err(Error::invalid_argument(format!(
            "timeout must be at most {} seconds (got {})",
            MAX_TIMEOUT_SECS, secs
        )));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ports::outbound::env_resolver::MapEnvResolver;

    #[test]
    fn test_from_env_defaults() {
        let env = MapEnvResolver::new().with(API_KEY_ENV, "sk-test");
        let s = Settings::from_env(&env).unwrap();
        assert_eq!(s.credential.expose(), "sk-test");
        assert_eq!(&*s.model, "gpt-4o");
        assert_eq!(s.requester.base_url, DEFAULT_BASE_URL);
        assert_eq!(s.requester.timeout, Duration::from_secs(30));
        assert!(s.log_file.is_none());
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let err = Settings::from_env(&MapEnvResolver::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_configuration_error() {
        let env = MapEnvResolver::new().with(API_KEY_ENV, "   ");
        assert_eq!(
            Settings::from_env(&env).unwrap_err().kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_overrides_from_env() {
        let env = MapEnvResolver::new()
            .with(API_KEY_ENV, "k")
            .with(BASE_URL_ENV, "http://localhost:8080/v1/")
            .with(MODEL_ENV, "gpt-4o-mini")
            .with(TIMEOUT_ENV, "5")
            .with(LOG_FILE_ENV, "/tmp/oneshot.jsonl");
        let s = Settings::from_env(&env).unwrap();
        assert_eq!(
            s.requester.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(&*s.model, "gpt-4o-mini");
        assert_eq!(s.requester.timeout, Duration::from_secs(5));
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/oneshot.jsonl")));
    }

    #[test]
    fn test_invalid_timeout() {
        let env = MapEnvResolver::new()
            .with(API_KEY_ENV, "k")
            .with(TIMEOUT_ENV, "soon");
        let err = Settings::from_env(&env).unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_ENV));

        assert!(parse_timeout_secs("0").is_err());
        assert_eq!(parse_timeout_secs(" 12 ").unwrap(), Duration::from_secs(12));
    }

    #[test]
    fn test_timeout_upper_bound() {
        assert_eq!(
            parse_timeout_secs("86400").unwrap(),
            Duration::from_secs(MAX_TIMEOUT_SECS)
        );
        let err = parse_timeout_secs("86401").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        let err = parse_timeout_secs("18446744073709551615").unwrap_err();
        assert!(err.to_string().contains("at most"));

        let env = MapEnvResolver::new()
            .with(API_KEY_ENV, "k")
            .with(TIMEOUT_ENV, "18446744073709551615");
        let err = Settings::from_env(&env).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_settings_debug_does_not_leak_key() {
        let env = MapEnvResolver::new().with(API_KEY_ENV, "sk-very-secret");
        let s = Settings::from_env(&env).unwrap();
        assert!(!format!("{:?}", s).contains("sk-very-secret"));
    }
}
