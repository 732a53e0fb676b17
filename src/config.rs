use crate::error::{Error, Result};
use std::time::Duration;

/// Deadline for page fetches and Translator calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Deadline for a chat completion; generating a full article takes minutes
pub const CHAT_REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

pub const DEFAULT_TARGET_LANGUAGE: &str = "pt-br";
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";
pub const DEFAULT_API_VERSION: &str = "2023-05-15";

/// Settings for the Azure Translator Text API (document pipeline)
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub endpoint: String,
    pub subscription_key: String,
    pub region: Option<String>,
    pub source_language: String,
    pub target_language: String,
    pub timeout: Duration,
}

impl TranslatorConfig {
    /// Resolve settings from CLI values, falling back to the environment.
    ///
    /// - AZURE_TRANSLATOR_KEY (required unless `--key` is given)
    /// - AZURE_TRANSLATOR_ENDPOINT (required unless `--endpoint` is given)
    /// - AZURE_TRANSLATOR_REGION (optional)
    pub fn resolve(
        endpoint: Option<String>,
        subscription_key: Option<String>,
        region: Option<String>,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self> {
        let subscription_key = flag_or_env(subscription_key, "AZURE_TRANSLATOR_KEY").ok_or_else(|| {
            Error::Configuration(
                "translator key not found. Set AZURE_TRANSLATOR_KEY or pass --key".to_string(),
            )
        })?;
        let endpoint = flag_or_env(endpoint, "AZURE_TRANSLATOR_ENDPOINT").ok_or_else(|| {
            Error::Configuration(
                "translator endpoint not found. Set AZURE_TRANSLATOR_ENDPOINT or pass --endpoint"
                    .to_string(),
            )
        })?;

        Ok(Self {
            endpoint,
            subscription_key,
            region: flag_or_env(region, "AZURE_TRANSLATOR_REGION"),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            timeout: REQUEST_TIMEOUT,
        })
    }
}

/// Settings for an Azure OpenAI chat-completion deployment (URL pipeline)
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub target_language: String,
    pub timeout: Duration,
}

impl ChatConfig {
    /// Resolve settings from CLI values, falling back to the environment.
    ///
    /// - AZURE_OPENAI_ENDPOINT, AZURE_OPENAI_KEY, AZURE_OPENAI_DEPLOYMENT (required)
    /// - AZURE_OPENAI_API_VERSION (defaults to 2023-05-15)
    pub fn resolve(
        endpoint: Option<String>,
        api_key: Option<String>,
        deployment: Option<String>,
        api_version: Option<String>,
        target_language: &str,
    ) -> Result<Self> {
        let endpoint = flag_or_env(endpoint, "AZURE_OPENAI_ENDPOINT");
        let api_key = flag_or_env(api_key, "AZURE_OPENAI_KEY");
        let deployment = flag_or_env(deployment, "AZURE_OPENAI_DEPLOYMENT");

        let mut missing = Vec::new();
        if endpoint.is_none() {
            missing.push("endpoint (AZURE_OPENAI_ENDPOINT or --endpoint)");
        }
        if api_key.is_none() {
            missing.push("key (AZURE_OPENAI_KEY or --key)");
        }
        if deployment.is_none() {
            missing.push("deployment (AZURE_OPENAI_DEPLOYMENT or --deployment)");
        }

        match (endpoint, api_key, deployment) {
            (Some(endpoint), Some(api_key), Some(deployment)) => Ok(Self {
                endpoint,
                api_key,
                deployment,
                api_version: flag_or_env(api_version, "AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                target_language: target_language.to_string(),
                timeout: CHAT_REQUEST_TIMEOUT,
            }),
            _ => Err(Error::Configuration(format!(
                "missing Azure OpenAI settings: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Prefer the explicit value, then the environment; blank values count as unset
fn flag_or_env(flag: Option<String>, var: &str) -> Option<String> {
    flag.or_else(|| std::env::var(var).ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
