use std::path::PathBuf;

use crate::types::RenderMode;

#[derive(Clone)]
pub struct AppConfig {
    pub twitter_bearer_token: String,
    pub openai_api_key: String,
    pub log_level: String,
    pub output_dir: PathBuf,
    pub roster_path: Option<PathBuf>,
    pub default_post_count: u8,
    pub openai_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub default_language: String,
    pub slow_speech: bool,
    pub render_mode: RenderMode,
    pub script_prefix: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub twitter_base_url: Option<String>,
    pub openai_base_url: Option<String>,
    pub tts_base_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("twitter_bearer_token", &"[redacted]")
            .field("openai_api_key", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("output_dir", &self.output_dir)
            .field("roster_path", &self.roster_path)
            .field("default_post_count", &self.default_post_count)
            .field("openai_model", &self.openai_model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("default_language", &self.default_language)
            .field("slow_speech", &self.slow_speech)
            .field("render_mode", &self.render_mode)
            .field("script_prefix", &self.script_prefix)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("twitter_base_url", &self.twitter_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .field("tts_base_url", &self.tts_base_url)
            .finish()
    }
}
