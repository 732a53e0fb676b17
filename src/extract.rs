//! Web page fetching and plain-text extraction.

use crate::error::{Error, Result};
use reqwest::Url;
use scraper::{Html, Node};
use tracing::{debug, info};

/// Elements whose content is never visible text
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Fetch a page and return its cleaned plain text.
///
/// An unreachable URL is [`Error::InputNotFound`]; any status other than
/// 200 is [`Error::Fetch`].
pub async fn fetch_article_text(client: &reqwest::Client, url: &Url) -> Result<String> {
    info!("Extracting text from {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| Error::InputNotFound(format!("cannot reach {}: {}", url, e)))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(Error::Fetch {
            url: url.to_string(),
            status,
        });
    }

    let html = response
        .text()
        .await
        .map_err(|e| Error::Network(format!("failed to read page body: {}", e)))?;
    debug!("Fetched {} bytes of HTML", html.len());

    Ok(clean_text(&html_to_text(&html)))
}

/// Extract the text of an HTML document.
///
/// Text inside `script`, `style` and `noscript` is dropped; the remaining
/// text nodes are joined with a single space. Entities are decoded by the
/// parser.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|ancestor| {
                    matches!(ancestor.value(), Node::Element(e) if HIDDEN_ELEMENTS.contains(&e.name()))
                });
                (!hidden).then(|| str::to_owned(text))
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace into one phrase per line.
///
/// Lines are trimmed, split on runs of two spaces, and empty pieces dropped.
pub fn clean_text(text: &str) -> String {
    text.split(is_line_break)
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
