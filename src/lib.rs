//! Translate `.docx` documents with Azure Translator and web articles with
//! Azure OpenAI.
//!
//! Two linear pipelines share the ambient modules:
//! - [`docx_translator`]: document in, one Translator call per paragraph, document out
//! - [`article`]: URL in, plain-text extraction, one chat completion, Markdown out

pub mod article;
pub mod chat;
pub mod config;
pub mod document;
pub mod docx_translator;
pub mod error;
pub mod extract;
pub mod http;
pub mod logging;
pub mod translator;

pub use error::{Error, Result};
