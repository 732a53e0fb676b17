use crate::config::ChatConfig;
use crate::error::{Error, Result};
use crate::http::error_body;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Azure OpenAI Chat Completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Assistant message; `content` is null when the service filtered the output
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

const SYSTEM_PROMPT: &str =
    "You are a text translator. Reply only with the translated content, formatted as Markdown.";

/// Build the user prompt carrying the target language and the full article
fn build_user_prompt(text: &str, target_language: &str) -> String {
    format!(
        "Translate the text below to {} and reply in Markdown.\n\n{}",
        target_language, text
    )
}

fn completions_url(config: &ChatConfig) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions",
        config.endpoint.trim_end_matches('/'),
        config.deployment
    )
}

/// Translate a whole article in one chat-completion call.
///
/// The assistant's reply is returned verbatim as Markdown. The article is
/// sent in a single request with no chunking, and failures are not retried.
/// The request deadline is `config.timeout`, not the client's default.
pub async fn translate_article(
    client: &reqwest::Client,
    config: &ChatConfig,
    text: &str,
) -> Result<String> {
    let request = ChatRequest {
        messages: vec![
            Message {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            Message {
                role: "user".to_string(),
                content: build_user_prompt(text, &config.target_language),
            },
        ],
    };

    debug!(
        "Sending {} chars to deployment {} (api-version {})",
        text.chars().count(),
        config.deployment,
        config.api_version
    );

    let response = client
        .post(completions_url(config))
        .timeout(config.timeout)
        .query(&[("api-version", config.api_version.as_str())])
        .header("api-key", &config.api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| Error::TranslationService(format!("failed to reach Azure OpenAI: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = error_body(response).await;
        return Err(Error::TranslationService(format!(
            "Azure OpenAI API error ({}): {}",
            status, body
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::TranslationService(format!("failed to read Azure OpenAI response: {}", e)))?;

    let chat_response: ChatResponse = serde_json::from_str(&body)
        .map_err(|e| Error::Parsing(format!("malformed chat completion response: {}", e)))?;

    chat_response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| {
            Error::TranslationService("chat completion response contained no content".to_string())
        })
}
