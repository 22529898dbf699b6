//! Document converter: text extraction from PDF and DOCX.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::media::Extension;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;

/// Converts documents to plain text.
pub struct DocumentConverter {
    config: ConverterConfig,
}

impl DocumentConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }
}

/// Extracts the text of every page, one page per block.
fn extract_pdf_text(path: &Path) -> Result<String, ConverterError> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| ConverterError::decode(format!("Invalid PDF: {}", e)))?;

    let pages: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|page_num| doc.extract_text(&[*page_num]).unwrap_or_default())
        .collect();

    Ok(pages.join("\n"))
}

/// Extracts paragraph text from a DOCX archive.
fn extract_docx_text(path: &Path) -> Result<String, ConverterError> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ConverterError::decode(format!("Invalid DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ConverterError::decode(format!("DOCX has no document body: {}", e)))?
        .read_to_string(&mut xml)?;

    docx_xml_to_text(&xml)
}

/// Flattens WordprocessingML into lines, one per paragraph.
fn docx_xml_to_text(xml: &str) -> Result<String, ConverterError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ConverterError::decode(format!("Malformed DOCX text: {}", e)))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConverterError::decode(format!(
                    "Malformed DOCX XML at {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n"))
}

#[async_trait]
impl Converter for DocumentConverter {
    fn name(&self) -> &str {
        "document"
    }

    async fn convert(
        &self,
        source: &Path,
        target_format: &Extension,
    ) -> Result<PathBuf, ConverterError> {
        let source_format = Extension::from_path(source).unwrap_or_else(|| Extension::new(""));

        let extract: fn(&Path) -> Result<String, ConverterError> =
            match (source_format.as_str(), target_format.as_str()) {
                ("pdf", "txt") => extract_pdf_text,
                ("docx", "txt") => extract_docx_text,
                _ => {
                    return Err(ConverterError::UnsupportedRoute {
                        source_format: source_format.to_string(),
                        target_format: target_format.to_string(),
                    })
                }
            };

        let output_path = self.config.prepare_output(source, target_format).await?;

        let source_owned = source.to_path_buf();
        let text = tokio::task::spawn_blocking(move || extract(&source_owned))
            .await
            .map_err(|e| {
                ConverterError::conversion_failed(format!("Extraction task failed: {}", e), None)
            })??;

        tokio::fs::write(&output_path, text.as_bytes()).await?;

        debug!(
            "Extracted {} bytes of text from {}",
            text.len(),
            source.display()
        );
        Ok(output_path)
    }

    fn supported_output_formats(&self) -> &[&str] {
        &["txt"]
    }
}
