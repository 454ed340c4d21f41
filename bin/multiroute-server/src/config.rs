//! Server configuration, loaded from environment variables at startup.

use std::time::Duration;

use multiroute_core::{BackendConfig, CHAT_TIMEOUT, ModelRoutes};

/// Runtime configuration for multiroute-server.
///
/// Every field has a default so the server starts without any environment
/// variables set. Built once in `main` and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Service name reported by `/health` (default: `"llm-multiroute"`).
    pub app_name: String,

    /// TCP address to bind, from `SERVER_HOST` and `SERVER_PORT`
    /// (default: `"0.0.0.0:8082"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    /// Comma-separated CORS allow-list. `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Model backend connection settings.
    pub backend: BackendConfig,

    /// Model name per task type.
    pub models: ModelRoutes,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let host = env_or("SERVER_HOST", "0.0.0.0");
        let port: u16 = parse_or(lookup("SERVER_PORT"), 8082);
        let timeout = match parse_or(lookup("OLLAMA_TIMEOUT_SECS"), 0u64) {
            0 => CHAT_TIMEOUT,
            secs => Duration::from_secs(secs),
        };

        Self {
            app_name: env_or("APP_NAME", "llm-multiroute"),
            bind_address: format!("{host}:{port}"),
            log_level: env_or("MULTIROUTE_LOG", "info"),
            log_json: flag(lookup("MULTIROUTE_LOG_JSON"), false),
            enable_swagger: flag(lookup("MULTIROUTE_ENABLE_SWAGGER"), true),
            cors_allowed_origins: lookup("MULTIROUTE_CORS_ORIGINS").filter(|v| !v.trim().is_empty()),
            backend: BackendConfig {
                base_url: env_or("OLLAMA_BASE_URL", "https://ollama.com"),
                api_key: lookup("OLLAMA_API_KEY").filter(|v| !v.is_empty()),
                temperature: parse_or(lookup("OLLAMA_TEMPERATURE"), 0.7),
                timeout,
            },
            models: ModelRoutes {
                classify: env_or("OLLAMA_MODEL_CLASSIFY", "gemma3:4b"),
                sentiment: env_or("OLLAMA_MODEL_SENTIMENT", "ministral-3:3b"),
                summarize: env_or("OLLAMA_MODEL_SUMMARIZE", "ministral-3:8b"),
                intent: env_or("OLLAMA_MODEL_INTENT", "gemma3:12b"),
            },
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn flag(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = from_pairs(&[]);
        assert_eq!(cfg.app_name, "llm-multiroute");
        assert_eq!(cfg.bind_address, "0.0.0.0:8082");
        assert_eq!(cfg.backend.base_url, "https://ollama.com");
        assert_eq!(cfg.backend.api_key, None);
        assert_eq!(cfg.backend.temperature, 0.7);
        assert_eq!(cfg.backend.timeout, CHAT_TIMEOUT);
        assert_eq!(cfg.models.classify, "gemma3:4b");
        assert_eq!(cfg.models.sentiment, "ministral-3:3b");
        assert_eq!(cfg.models.summarize, "ministral-3:8b");
        assert_eq!(cfg.models.intent, "gemma3:12b");
        assert!(cfg.enable_swagger);
        assert!(!cfg.log_json);
        assert!(cfg.cors_allowed_origins.is_none());
    }

    #[test]
    fn per_task_model_overrides() {
        let cfg = from_pairs(&[
            ("OLLAMA_MODEL_CLASSIFY", "llama3:8b"),
            ("OLLAMA_MODEL_INTENT", "qwen3:4b"),
        ]);
        assert_eq!(cfg.models.classify, "llama3:8b");
        assert_eq!(cfg.models.intent, "qwen3:4b");
        assert_eq!(cfg.models.sentiment, "ministral-3:3b");
    }

    #[test]
    fn backend_settings_are_read() {
        let cfg = from_pairs(&[
            ("OLLAMA_BASE_URL", "http://localhost:11434"),
            ("OLLAMA_API_KEY", "k-123"),
            ("OLLAMA_TEMPERATURE", "0.2"),
            ("OLLAMA_TIMEOUT_SECS", "30"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "9000"),
        ]);
        assert_eq!(cfg.backend.base_url, "http://localhost:11434");
        assert_eq!(cfg.backend.api_key.as_deref(), Some("k-123"));
        assert_eq!(cfg.backend.temperature, 0.2);
        assert_eq!(cfg.backend.timeout, Duration::from_secs(30));
        assert_eq!(cfg.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn empty_api_key_means_no_credential() {
        let cfg = from_pairs(&[("OLLAMA_API_KEY", "")]);
        assert_eq!(cfg.backend.api_key, None);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let cfg = from_pairs(&[
            ("SERVER_PORT", "http"),
            ("OLLAMA_TEMPERATURE", "warm"),
            ("OLLAMA_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(cfg.bind_address, "0.0.0.0:8082");
        assert_eq!(cfg.backend.temperature, 0.7);
        assert_eq!(cfg.backend.timeout, CHAT_TIMEOUT);
    }

    #[test]
    fn zero_timeout_uses_default() {
        let cfg = from_pairs(&[("OLLAMA_TIMEOUT_SECS", "0")]);
        assert_eq!(cfg.backend.timeout, CHAT_TIMEOUT);
    }

    #[test]
    fn boolean_flags_accept_one_and_true() {
        let cfg = from_pairs(&[
            ("MULTIROUTE_LOG_JSON", "TRUE"),
            ("MULTIROUTE_ENABLE_SWAGGER", "0"),
        ]);
        assert!(cfg.log_json);
        assert!(!cfg.enable_swagger);
    }
}
