use crate::chat::translate_article;
use crate::config::ChatConfig;
use crate::error::{Error, Result};
use crate::extract::fetch_article_text;
use reqwest::Url;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fetch a web article, translate it to Markdown and write it to disk.
///
/// Returns the path written. The chat endpoint is never called when the page
/// yields no text, and nothing is written unless the translation succeeded.
pub async fn translate_url(
    client: &reqwest::Client,
    config: &ChatConfig,
    url: &str,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let parsed = parse_url(url)?;
    let out_path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(filename_for(&parsed, &config.target_language)),
    };

    let text = fetch_article_text(client, &parsed).await?;
    if text.is_empty() {
        return Err(Error::EmptyContent(url.to_string()));
    }

    info!("Sending text for translation (Azure OpenAI)");
    let translated = translate_article(client, config, &text).await?;

    std::fs::write(&out_path, translated)?;
    info!("Translation saved to {}", out_path.display());

    Ok(out_path)
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Derive `<host>_<path>_<lang>.md` from a URL.
///
/// A port is kept as `_<port>`, slashes in the path become underscores and
/// an empty path is named `index`.
pub fn filename_from_url(url: &str, target_language: &str) -> Result<String> {
    Ok(filename_for(&parse_url(url)?, target_language))
}

fn filename_for(url: &Url, target_language: &str) -> String {
    let mut host = url.host_str().unwrap_or_default().to_string();
    if let Some(port) = url.port() {
        host = format!("{}_{}", host, port);
    }

    let path = url.path().trim_matches('/').replace('/', "_");
    let path = if path.is_empty() { "index".to_string() } else { path };

    format!("{}_{}_{}.md", host, path, target_language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url_nested_path() {
        assert_eq!(
            filename_from_url("https://a.com/x/y", "pt-br").expect("valid"),
            "a.com_x_y_pt-br.md"
        );
    }

    #[test]
    fn test_filename_from_url_root_is_index() {
        assert_eq!(
            filename_from_url("https://example.com", "es").expect("valid"),
            "example.com_index_es.md"
        );
        assert_eq!(
            filename_from_url("https://example.com/", "es").expect("valid"),
            "example.com_index_es.md"
        );
    }

    #[test]
    fn test_filename_from_url_trailing_slash_trimmed() {
        assert_eq!(
            filename_from_url("https://blog.example.com/posts/rust/", "de").expect("valid"),
            "blog.example.com_posts_rust_de.md"
        );
    }

    #[test]
    fn test_filename_from_url_port_uses_underscore() {
        assert_eq!(
            filename_from_url("http://localhost:8080/article", "pt-br").expect("valid"),
            "localhost_8080_article_pt-br.md"
        );
    }

    #[test]
    fn test_filename_from_url_ignores_query_and_fragment() {
        assert_eq!(
            filename_from_url("https://a.com/news/item?id=7#top", "fr").expect("valid"),
            "a.com_news_item_fr.md"
        );
    }

    #[tokio::test]
    async fn test_translate_url_invalid_url_with_explicit_output() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let output = temp_dir.path().join("article.md");
        let config = ChatConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: "key".to_string(),
            deployment: "gpt-4o-mini".to_string(),
            api_version: crate::config::DEFAULT_API_VERSION.to_string(),
            target_language: "pt-br".to_string(),
            timeout: crate::config::CHAT_REQUEST_TIMEOUT,
        };
        let client = reqwest::Client::new();

        let err = translate_url(&client, &config, "not a url", Some(&output))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidUrl { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_filename_from_url_invalid() {
        let err = filename_from_url("not a url", "pt-br").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }
}
