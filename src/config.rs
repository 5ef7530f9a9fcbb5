// src/config.rs
use crate::errors::AdsmithError;
use crate::services::generation_client::RetryPolicy;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub bind_addr: String,
    pub max_attempts: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AdsmithError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AdsmithError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GEMINI_API_KEY")
            .ok_or_else(|| AdsmithError::Config("GEMINI_API_KEY must be set".to_string()))?;

        let max_attempts = match get("ADSMITH_MAX_ATTEMPTS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AdsmithError::Config(format!("ADSMITH_MAX_ATTEMPTS must be a positive integer, got {raw}"))
                })?,
            None => RetryPolicy::default().max_attempts,
        };

        Ok(Self {
            api_key,
            base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            text_model: get("ADSMITH_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: get("ADSMITH_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            bind_addr: get("ADSMITH_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_attempts,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, AdsmithError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn api_key_is_required() {
        assert!(matches!(config(&[]), Err(AdsmithError::Config(_))));
        assert!(matches!(
            config(&[("GEMINI_API_KEY", "  ")]),
            Err(AdsmithError::Config(_))
        ));
    }

    #[test]
    fn defaults_fill_the_rest() {
        let cfg = config(&[("GEMINI_API_KEY", "k")]).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(cfg.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.retry_policy().max_attempts, 3);
    }

    #[test]
    fn overrides_apply() {
        let cfg = config(&[
            ("GEMINI_API_KEY", "k"),
            ("ADSMITH_IMAGE_MODEL", "custom-image"),
            ("ADSMITH_MAX_ATTEMPTS", "5"),
        ])
        .unwrap();
        assert_eq!(cfg.image_model, "custom-image");
        assert_eq!(cfg.max_attempts, 5);
    }

    #[test]
    fn bad_attempt_count_is_rejected() {
        for raw in ["0", "three"] {
            assert!(config(&[("GEMINI_API_KEY", "k"), ("ADSMITH_MAX_ATTEMPTS", raw)]).is_err());
        }
    }
}
