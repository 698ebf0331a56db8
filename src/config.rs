use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 60;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_VARS: [&str; 3] = ["QUIZGENIUS_API_KEY", "GEMINI_API_KEY", "API_KEY"];
const MODEL_VAR: &str = "QUIZGENIUS_MODEL";
const ENDPOINT_VAR: &str = "QUIZGENIUS_ENDPOINT";
const QUESTION_COUNT_VAR: &str = "QUIZGENIUS_QUESTION_COUNT";
const SECONDS_PER_QUESTION_VAR: &str = "QUIZGENIUS_SECONDS_PER_QUESTION";
const CHECKOUT_KEY_VAR: &str = "QUIZGENIUS_CHECKOUT_KEY";
const TIMEOUT_VAR: &str = "QUIZGENIUS_TIMEOUT_SECS";

/// Runtime settings for the two external boundaries and the quiz itself.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub question_count: usize,
    pub seconds_per_question: u32,
    pub checkout_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            question_count: DEFAULT_QUESTION_COUNT,
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
            checkout_key: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Builds a config from any key/value source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).as_deref().and_then(normalize_value);
        let defaults = Self::default();

        Ok(Self {
            api_key: API_KEY_VARS.iter().find_map(|key| get(*key)),
            model: get(MODEL_VAR).unwrap_or(defaults.model),
            endpoint: get(ENDPOINT_VAR)
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or(defaults.endpoint),
            question_count: parse_positive(QUESTION_COUNT_VAR, get(QUESTION_COUNT_VAR))?
                .unwrap_or(defaults.question_count),
            seconds_per_question: parse_positive(
                SECONDS_PER_QUESTION_VAR,
                get(SECONDS_PER_QUESTION_VAR),
            )?
            .unwrap_or(defaults.seconds_per_question),
            checkout_key: get(CHECKOUT_KEY_VAR),
            request_timeout: parse_positive::<u64>(TIMEOUT_VAR, get(TIMEOUT_VAR))?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        })
    }

    /// Resolves the config for the current platform, falling back to defaults
    /// when a value is malformed.
    pub fn load() -> Self {
        match Self::from_lookup(platform_lookup) {
            Ok(config) => {
                if config.api_key.is_none() {
                    log::warn!("no API key configured; quiz generation will fail");
                }
                config
            }
            Err(err) => {
                log::error!("invalid configuration, using defaults: {err}");
                Self::default()
            }
        }
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_positive<T>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = value else {
        return Ok(None);
    };
    match raw.parse::<T>() {
        Ok(n) if n > T::default() => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(target_arch = "wasm32")]
fn platform_lookup(key: &str) -> Option<String> {
    from_build_env(key)
        .or_else(|| from_querystring(key))
        .or_else(|| from_meta(key))
        .or_else(|| from_local_storage(key))
}

#[cfg(target_arch = "wasm32")]
fn from_build_env(key: &str) -> Option<String> {
    let value = match key {
        "QUIZGENIUS_API_KEY" => option_env!("QUIZGENIUS_API_KEY"),
        "GEMINI_API_KEY" => option_env!("GEMINI_API_KEY"),
        "API_KEY" => option_env!("API_KEY"),
        "QUIZGENIUS_MODEL" => option_env!("QUIZGENIUS_MODEL"),
        "QUIZGENIUS_ENDPOINT" => option_env!("QUIZGENIUS_ENDPOINT"),
        "QUIZGENIUS_QUESTION_COUNT" => option_env!("QUIZGENIUS_QUESTION_COUNT"),
        "QUIZGENIUS_SECONDS_PER_QUESTION" => option_env!("QUIZGENIUS_SECONDS_PER_QUESTION"),
        "QUIZGENIUS_CHECKOUT_KEY" => option_env!("QUIZGENIUS_CHECKOUT_KEY"),
        "QUIZGENIUS_TIMEOUT_SECS" => option_env!("QUIZGENIUS_TIMEOUT_SECS"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(target_arch = "wasm32")]
fn from_querystring(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let query = search.strip_prefix('?').unwrap_or(search.as_str());
    let wanted = key.to_ascii_lowercase();

    for pair in query.split('&') {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if k == wanted {
            let decoded = js_sys::decode_uri_component(v).ok()?;
            return decoded.as_string();
        }
    }
    None
}

#[cfg(target_arch = "wasm32")]
fn from_meta(key: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let name = key.to_ascii_lowercase().replace('_', "-");
    let meta = document
        .query_selector(&format!("meta[name='{name}']"))
        .ok()??;
    meta.get_attribute("content")
}

#[cfg(target_arch = "wasm32")]
fn from_local_storage(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(&key.to_ascii_lowercase()).ok()?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_source_yields_defaults() {
        let config = AppConfig::from_lookup(|_| None).expect("defaults");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.question_count, 5);
        assert_eq!(config.seconds_per_question, 60);
    }

    #[test]
    fn api_key_falls_back_through_aliases() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", " abc "), ("API_KEY", "zzz")]))
                .expect("config");
        assert_eq!(config.api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("QUIZGENIUS_API_KEY", "   "),
            ("QUIZGENIUS_MODEL", ""),
        ]))
        .expect("config");
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("QUIZGENIUS_ENDPOINT", "http://localhost:9000/v1/")]))
                .expect("config");
        assert_eq!(config.endpoint, "http://localhost:9000/v1");
    }

    #[test]
    fn numeric_overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("QUIZGENIUS_QUESTION_COUNT", "3"),
            ("QUIZGENIUS_SECONDS_PER_QUESTION", "45"),
            ("QUIZGENIUS_TIMEOUT_SECS", "10"),
        ]))
        .expect("config");
        assert_eq!(config.question_count, 3);
        assert_eq!(config.seconds_per_question, 45);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn zero_or_garbage_counts_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("QUIZGENIUS_QUESTION_COUNT", "0")]))
            .expect_err("zero");
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: QUESTION_COUNT_VAR,
                value: "0".into()
            }
        );
        assert!(
            AppConfig::from_lookup(lookup_from(&[("QUIZGENIUS_SECONDS_PER_QUESTION", "soon")]))
                .is_err()
        );
    }
}
