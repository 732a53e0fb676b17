use crate::config::TranslatorConfig;
use crate::error::{Error, Result};
use crate::http::error_body;
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_VERSION: &str = "3.0";

/// One element of the Translator request body
#[derive(Debug, Serialize)]
struct TranslateInput<'a> {
    text: &'a str,
}

/// Response shape: `[ { "translations": [ { "text": "...", "to": "pt" } ] } ]`
#[derive(Debug, Deserialize)]
struct TranslateResult {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Translate a single string with the Azure Translator Text API.
///
/// Transport failures and non-2xx statuses map to [`Error::Network`], an
/// unexpected body to [`Error::Parsing`]. Neither is retried.
pub async fn translate_text(
    client: &reqwest::Client,
    config: &TranslatorConfig,
    text: &str,
) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let url = format!("{}/translate", config.endpoint.trim_end_matches('/'));
    let trace_id = uuid::Uuid::new_v4().to_string();
    debug!(
        "Translating {} chars to {} (trace id {})",
        text.chars().count(),
        config.target_language,
        trace_id
    );

    let mut request = client
        .post(&url)
        .query(&[
            ("api-version", API_VERSION),
            ("from", config.source_language.as_str()),
            ("to", config.target_language.as_str()),
        ])
        .header("Ocp-Apim-Subscription-Key", &config.subscription_key)
        .header("X-ClientTraceId", trace_id)
        .json(&[TranslateInput { text }]);

    if let Some(region) = &config.region {
        request = request.header("Ocp-Apim-Subscription-Region", region);
    }

    let response = request
        .send()
        .await
        .map_err(|e| Error::Network(format!("translation request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = error_body(response).await;
        return Err(Error::Network(format!(
            "Translator API error ({}): {}",
            status, body
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(format!("failed to read translation response: {}", e)))?;

    parse_translation(&body)
}

/// Pull the single translated string out of a Translator response body
fn parse_translation(body: &str) -> Result<String> {
    let results: Vec<TranslateResult> = serde_json::from_str(body)
        .map_err(|e| Error::Parsing(format!("malformed translation response: {}", e)))?;

    results
        .into_iter()
        .next()
        .and_then(|r| r.translations.into_iter().next())
        .map(|t| t.text)
        .ok_or_else(|| Error::Parsing("translation response contained no translations".to_string()))
}
