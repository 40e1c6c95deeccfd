use crate::app_config::AppConfig;
use crate::types::{clamp_post_count, RenderMode};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let twitter_bearer_token = require("TWITTER_BEARER_TOKEN")?;
    let openai_api_key = require("OPENAI_API_KEY")?;

    let log_level = or_default("FEEDFLAMER_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("FEEDFLAMER_OUTPUT_DIR", "."));
    let roster_path = optional("FEEDFLAMER_ROSTER_PATH").map(PathBuf::from);

    let default_post_count = or_default("FEEDFLAMER_DEFAULT_POST_COUNT", "10")
        .parse::<i64>()
        .map(clamp_post_count)
        .map_err(|e| invalid("FEEDFLAMER_DEFAULT_POST_COUNT", e.to_string()))?;

    let openai_model = or_default("FEEDFLAMER_OPENAI_MODEL", "gpt-4");
    let max_tokens = parse_u32("FEEDFLAMER_MAX_TOKENS", "1500")?;
    if max_tokens == 0 {
        return Err(invalid("FEEDFLAMER_MAX_TOKENS", "must be at least 1".to_string()));
    }
    let temperature = parse_temperature(&or_default("FEEDFLAMER_TEMPERATURE", "0.8"))
        .map_err(|reason| invalid("FEEDFLAMER_TEMPERATURE", reason))?;

    let default_language = or_default("FEEDFLAMER_DEFAULT_LANGUAGE", "en");
    let slow_speech = parse_bool(&or_default("FEEDFLAMER_SLOW_SPEECH", "false"))
        .map_err(|reason| invalid("FEEDFLAMER_SLOW_SPEECH", reason))?;
    let render_mode = or_default("FEEDFLAMER_RENDER_MODE", "sequential")
        .parse::<RenderMode>()
        .map_err(|reason| invalid("FEEDFLAMER_RENDER_MODE", reason))?;
    let script_prefix = or_default("FEEDFLAMER_SCRIPT_PREFIX", "twitter_critique");

    let request_timeout_secs = parse_u64("FEEDFLAMER_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("FEEDFLAMER_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("FEEDFLAMER_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        twitter_bearer_token,
        openai_api_key,
        log_level,
        output_dir,
        roster_path,
        default_post_count,
        openai_model,
        max_tokens,
        temperature,
        default_language,
        slow_speech,
        render_mode,
        script_prefix,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        twitter_base_url: optional("FEEDFLAMER_TWITTER_BASE_URL"),
        openai_base_url: optional("FEEDFLAMER_OPENAI_BASE_URL"),
        tts_base_url: optional("FEEDFLAMER_TTS_BASE_URL"),
    })
}

/// Parse a sampling temperature in `[0.0, 2.0]`.
fn parse_temperature(s: &str) -> Result<f32, String> {
    let value = s.trim().parse::<f32>().map_err(|e| e.to_string())?;
    if (0.0..=2.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside 0.0..=2.0"))
    }
}

/// Parse a boolean flag. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!("'{other}' is not a boolean")),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
