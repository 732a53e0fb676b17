use crate::config::TranslatorConfig;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::translator::translate_text;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Translate every paragraph of `source` into a fresh document.
///
/// Blank paragraphs stay blank at the same index; the rest are trimmed,
/// translated one request at a time and kept verbatim. The first failure
/// aborts the whole document.
pub async fn translate_document(
    client: &reqwest::Client,
    config: &TranslatorConfig,
    source: &Document,
) -> Result<Document> {
    let total = source.len();
    let mut translated = Document::new();

    for (i, paragraph) in source.paragraphs().iter().enumerate() {
        let text = paragraph.trim();
        if text.is_empty() {
            translated.add_paragraph("");
            continue;
        }

        debug!("Translating paragraph {}/{}", i + 1, total);
        translated.add_paragraph(translate_text(client, config, text).await?);
    }

    Ok(translated)
}

/// Translate a `.docx` file and save the result.
///
/// Returns the path the translated document was written to. Nothing is
/// written unless every paragraph was translated.
pub async fn translate_document_file(
    client: &reqwest::Client,
    config: &TranslatorConfig,
    input: &Path,
    output: Option<&Path>,
) -> Result<PathBuf> {
    if !input.is_file() {
        return Err(Error::InputNotFound(format!(
            "file not found: {}",
            input.display()
        )));
    }

    let source = Document::open(input)?;
    info!(
        "Translating {} paragraphs from {} to {}",
        source.len(),
        input.display(),
        config.target_language
    );

    let translated = translate_document(client, config, &source).await?;

    let out_path = match output {
        Some(path) => path.to_path_buf(),
        None => derive_output_path(input, &config.target_language),
    };
    translated.save(&out_path)?;

    Ok(out_path)
}

/// Insert `_<target>` before the file extension: `report.docx` -> `report_pt-br.docx`
pub fn derive_output_path(input: &Path, target_language: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match input.extension() {
        Some(ext) => format!("{}_{}.{}", stem, target_language, ext.to_string_lossy()),
        None => format!("{}_{}", stem, target_language),
    };

    input.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REQUEST_TIMEOUT;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_test_config(endpoint: &str) -> TranslatorConfig {
        TranslatorConfig {
            endpoint: endpoint.to_string(),
            subscription_key: "test-translator-key".to_string(),
            region: None,
            source_language: "en".to_string(),
            target_language: "pt-br".to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    fn translator_response(text: &str) -> serde_json::Value {
        serde_json::json!([{ "translations": [{ "text": text, "to": "pt-br" }] }])
    }

    async fn mount_translation(server: &MockServer, source: &str, translated: &str) {
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(serde_json::json!([{ "text": source }])))
            .respond_with(ResponseTemplate::new(200).set_body_json(translator_response(translated)))
            .expect(1)
            .mount(server)
            .await;
    }

    // ==================== Output Path Tests ====================

    #[test]
    fn test_derive_output_path_inserts_language() {
        assert_eq!(
            derive_output_path(Path::new("report.docx"), "pt-br"),
            PathBuf::from("report_pt-br.docx")
        );
    }

    #[test]
    fn test_derive_output_path_keeps_directory() {
        assert_eq!(
            derive_output_path(Path::new("docs/q3/report.docx"), "es"),
            PathBuf::from("docs/q3/report_es.docx")
        );
    }

    #[test]
    fn test_derive_output_path_only_last_extension() {
        assert_eq!(
            derive_output_path(Path::new("archive.v2.docx"), "de"),
            PathBuf::from("archive.v2_de.docx")
        );
    }

    #[test]
    fn test_derive_output_path_without_extension() {
        assert_eq!(
            derive_output_path(Path::new("notes"), "fr"),
            PathBuf::from("notes_fr")
        );
    }

    // ==================== Paragraph Loop Tests ====================

    #[tokio::test]
    async fn test_translate_document_preserves_blank_positions() {
        let mock_server = MockServer::start().await;
        mount_translation(&mock_server, "Title", "Título").await;
        mount_translation(&mock_server, "Body", "Corpo").await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();
        let source = Document::from_paragraphs(["Title", "", "   ", "Body", "\t"]);

        let translated = translate_document(&client, &config, &source)
            .await
            .expect("Should succeed");

        assert_eq!(translated.paragraphs(), ["Título", "", "", "Corpo", ""]);
    }

    #[tokio::test]
    async fn test_translate_document_sends_trimmed_text() {
        let mock_server = MockServer::start().await;
        mount_translation(&mock_server, "padded text", "texto").await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();
        let source = Document::from_paragraphs(["   padded text \n"]);

        let translated = translate_document(&client, &config, &source)
            .await
            .expect("Should succeed");

        assert_eq!(translated.paragraphs(), ["texto"]);
    }

    #[tokio::test]
    async fn test_translate_document_keeps_response_verbatim() {
        let mock_server = MockServer::start().await;
        mount_translation(&mock_server, "Hi", "  Oi!  ").await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let translated = translate_document(&client, &config, &Document::from_paragraphs(["Hi"]))
            .await
            .expect("Should succeed");

        assert_eq!(translated.paragraphs(), ["  Oi!  "]);
    }

    #[tokio::test]
    async fn test_translate_document_one_call_per_paragraph() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translator_response("same")))
            .expect(3)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();
        // Duplicates are not deduplicated
        let source = Document::from_paragraphs(["repeat", "repeat", "", "repeat"]);

        let translated = translate_document(&client, &config, &source)
            .await
            .expect("Should succeed");

        assert_eq!(translated.len(), 4);
    }

    #[tokio::test]
    async fn test_translate_document_stops_at_first_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();
        let source = Document::from_paragraphs(["one", "two", "three"]);

        let err = translate_document(&client, &config, &source).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn test_translate_empty_document_makes_no_calls() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translator_response("x")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let translated = translate_document(&client, &config, &Document::new())
            .await
            .expect("Should succeed");
        assert!(translated.is_empty());
    }

    // ==================== File Pipeline Tests ====================

    #[tokio::test]
    async fn test_translate_document_file_missing_input() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = create_test_config("http://127.0.0.1:9");
        let client = reqwest::Client::new();

        let err = translate_document_file(
            &client,
            &config,
            &temp_dir.path().join("nope.docx"),
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[tokio::test]
    async fn test_translate_document_file_directory_input() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = create_test_config("http://127.0.0.1:9");
        let client = reqwest::Client::new();

        let err = translate_document_file(&client, &config, temp_dir.path(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[tokio::test]
    async fn test_translate_document_file_writes_explicit_output() {
        let mock_server = MockServer::start().await;
        mount_translation(&mock_server, "Hello", "Olá").await;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("in.docx");
        let output = temp_dir.path().join("custom.docx");
        Document::from_paragraphs(["Hello", ""]).save(&input).expect("save input");

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let written = translate_document_file(&client, &config, &input, Some(&output))
            .await
            .expect("Should succeed");

        assert_eq!(written, output);
        let result = Document::open(&output).expect("open output");
        assert_eq!(result.paragraphs(), ["Olá", ""]);
        assert!(!temp_dir.path().join("in_pt-br.docx").exists());
    }
}
