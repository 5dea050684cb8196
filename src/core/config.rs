use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

const DEFAULT_API_HOSTNAME: &str = "https://dashscope.aliyuncs.com";
const DEFAULT_COMPLETIONS_PATH: &str = "/compatible-mode/v1/chat/completions";
const DEFAULT_MODELS: [&str; 4] = [
    "qwen2.5-72b-instruct",
    "qwen2.5-math-72b-instruct",
    "qwen2.5-math-7b-instruct",
    "qwen2.5-coder-7b-instruct",
];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_hostname: String,
    pub completions_path: String,
    pub api_key: String,
    // Models offered by the UI. An empty list accepts any model id.
    pub models: Vec<String>,
    pub system_message: String,
    pub upstream_timeout: Duration,
    pub session_ttl: Duration,
    pub eviction_interval: Duration,
}

impl AppConfig {
    /// Build the config from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config using `lookup` to resolve each variable by
    /// name. Only the API key is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("DASHSCOPE_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Missing env var DASHSCOPE_API_KEY")?;
        let api_hostname =
            lookup("QWEN_CHAT_API_HOST").unwrap_or_else(|| DEFAULT_API_HOSTNAME.to_string());
        let completions_path = lookup("QWEN_CHAT_COMPLETIONS_PATH")
            .unwrap_or_else(|| DEFAULT_COMPLETIONS_PATH.to_string());
        let models = lookup("QWEN_CHAT_MODELS")
            .map(|v| parse_models(&v))
            .unwrap_or_else(|| DEFAULT_MODELS.iter().map(|m| m.to_string()).collect());
        let system_message = lookup("QWEN_CHAT_SYSTEM_MESSAGE")
            .unwrap_or_else(|| DEFAULT_SYSTEM_MESSAGE.to_string());
        let upstream_timeout = secs_or_default(&lookup, "QWEN_CHAT_UPSTREAM_TIMEOUT_SECS", 120)
            .and_then(|v| non_zero(v, "QWEN_CHAT_UPSTREAM_TIMEOUT_SECS"))?;
        let session_ttl = secs_or_default(&lookup, "QWEN_CHAT_SESSION_TTL_SECS", 60 * 30)?;
        let eviction_interval = secs_or_default(&lookup, "QWEN_CHAT_EVICTION_INTERVAL_SECS", 60)
            .and_then(|v| non_zero(v, "QWEN_CHAT_EVICTION_INTERVAL_SECS"))?;

        Ok(Self {
            api_hostname,
            completions_path,
            api_key,
            models,
            system_message,
            upstream_timeout,
            session_ttl,
            eviction_interval,
        })
    }

    /// Full URL of the upstream chat completions endpoint
    pub fn completions_url(&self) -> String {
        let path = self.completions_path.trim_start_matches('/');
        format!("{}/{}", self.api_hostname.trim_end_matches('/'), path)
    }

    pub fn is_model_allowed(&self, model: &str) -> bool {
        self.models.is_empty() || self.models.iter().any(|m| m == model)
    }

    pub fn default_model(&self) -> Option<&str> {
        self.models.first().map(String::as_str)
    }
}

fn parse_models(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

fn secs_or_default<F>(lookup: &F, name: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(Duration::from_secs(default));
    };
    let secs = value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid value for {}: {:?}", name, value))?;
    Ok(Duration::from_secs(secs))
}

// A zero tokio interval panics and a zero request timeout fails every call
fn non_zero(value: Duration, name: &str) -> Result<Duration> {
    if value.is_zero() {
        anyhow::bail!("{} must be greater than zero", name);
    }
    Ok(value)
}
