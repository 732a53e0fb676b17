//! Paragraph-level view of `.docx` documents.
//!
//! A `.docx` file is a ZIP package whose main part, `word/document.xml`,
//! holds the body as WordprocessingML. Only the body paragraphs' text is
//! read; formatting, tables and embedded objects are not carried over.

use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const DOCUMENT_PART: &str = "word/document.xml";
const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// An ordered sequence of plain-text paragraphs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    paragraphs: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.paragraphs.push(text.into());
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Load the body paragraphs of a `.docx` file
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            Error::InputNotFound(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_docx_bytes(&bytes)
    }

    pub fn from_docx_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut part = archive.by_name(DOCUMENT_PART)?;
        let mut xml = Vec::with_capacity(part.size() as usize);
        part.read_to_end(&mut xml)?;

        Ok(Self {
            paragraphs: parse_body_paragraphs(&xml)?,
        })
    }

    /// Write the document as a new `.docx` file
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_docx_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn to_docx_bytes(&self) -> Result<Vec<u8>> {
        let document_xml = write_document_xml(&self.paragraphs)?;
        let parts: [(&str, &[u8]); 3] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", ROOT_RELS.as_bytes()),
            (DOCUMENT_PART, &document_xml),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in parts {
            let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            zip.start_file(name, options)?;
            zip.write_all(data)?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

/// Local name of a WordprocessingML element, `None` for any other namespace.
///
/// Word writes the `w:` prefix, but other producers may bind the same
/// namespace to another prefix or make it the default.
fn wordml_name(ns: &ResolveResult, e: &BytesStart) -> Option<String> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) if *uri == WORDML_NS.as_bytes() => {
            Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned())
        }
        _ => None,
    }
}

fn is_named(name: Option<&Option<String>>, local: &str) -> bool {
    matches!(name, Some(Some(n)) if n == local)
}

fn attribute(e: &BytesStart, local: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// `path` is the element chain below the paragraph, ending at the run.
fn is_paragraph_run(path: &[Option<String>]) -> bool {
    match path {
        [r] => is_named(Some(r), "r"),
        [h, r] => is_named(Some(h), "hyperlink") && is_named(Some(r), "r"),
        _ => false,
    }
}

fn push_run_control(text: &mut String, name: &str, e: &BytesStart) {
    match name {
        "tab" | "ptab" => text.push('\t'),
        "cr" => text.push('\n'),
        "br" => {
            let kind = attribute(e, "type");
            if kind.as_deref().unwrap_or("textWrapping") == "textWrapping" {
                text.push('\n');
            }
        }
        _ => {}
    }
}

/// Collect the text of every paragraph that is a direct child of the body.
fn parse_body_paragraphs(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(false);

    // Local names of open elements; `None` outside the WordprocessingML namespace
    let mut stack: Vec<Option<String>> = Vec::new();
    // (stack index of the open body paragraph, its text so far)
    let mut current: Option<(usize, String)> = None;
    let mut paragraphs = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_resolved_event_into(&mut buf)? {
            (_, Event::Eof) => break,
            (ns, Event::Start(e)) => {
                let name = wordml_name(&ns, &e);
                if current.is_none()
                    && is_named(stack.last(), "body")
                    && name.as_deref() == Some("p")
                {
                    current = Some((stack.len(), String::new()));
                }
                stack.push(name);
            }
            (ns, Event::Empty(e)) => {
                let Some(name) = wordml_name(&ns, &e) else {
                    continue;
                };
                match current.as_mut() {
                    Some((depth, text)) => {
                        if is_paragraph_run(&stack[*depth + 1..]) {
                            push_run_control(text, &name, &e);
                        }
                    }
                    None => {
                        if is_named(stack.last(), "body") && name == "p" {
                            paragraphs.push(String::new());
                        }
                    }
                }
            }
            (_, Event::Text(t)) => {
                if let Some((depth, text)) = current.as_mut() {
                    let in_text_element = stack.len() >= *depth + 2 && is_named(stack.last(), "t");
                    if in_text_element && is_paragraph_run(&stack[*depth + 1..stack.len() - 1]) {
                        let decoded = t
                            .unescape()
                            .map_err(|e| Error::Document(format!("invalid text: {}", e)))?;
                        text.push_str(&decoded);
                    }
                }
            }
            (_, Event::End(_)) => {
                stack.pop();
                if matches!(&current, Some((depth, _)) if *depth == stack.len()) {
                    if let Some((_, text)) = current.take() {
                        paragraphs.push(text);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn write_document_xml(paragraphs: &[String]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WORDML_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for paragraph in paragraphs {
        if paragraph.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("w:p")))?;
            continue;
        }
        writer.write_event(Event::Start(BytesStart::new("w:p")))?;
        writer.write_event(Event::Start(BytesStart::new("w:r")))?;
        write_run_content(&mut writer, paragraph)?;
        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
        writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner())
}

/// Line breaks become `w:br` and tabs `w:tab`, everything else goes in `w:t`.
fn write_run_content(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<()> {
    let normalized = text.replace("\r\n", "\n");
    let mut chunk = String::new();

    for c in normalized.chars() {
        match c {
            '\n' | '\r' | '\t' => {
                write_text_element(writer, &chunk)?;
                chunk.clear();
                let control = if c == '\t' { "w:tab" } else { "w:br" };
                writer.write_event(Event::Empty(BytesStart::new(control)))?;
            }
            _ => chunk.push(c),
        }
    }
    write_text_element(writer, &chunk)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let mut start = BytesStart::new("w:t");
    start.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    Ok(())
}
