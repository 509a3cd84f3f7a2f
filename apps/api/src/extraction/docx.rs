//! Plain-text extraction from Word (`.docx`) files.
//!
//! A docx is a zip archive; the body lives in `word/document.xml`. Text runs
//! (`<w:t>`) are concatenated, paragraphs end with a newline and `<w:tab/>` /
//! `<w:br/>` become a tab / newline. Formatting is dropped.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

const DOCUMENT_XML: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to read {DOCUMENT_XML}: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub fn extract_text(data: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_XML)?.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    debug!("Extracted {} chars from docx", text.len());
    Ok(text)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Builds a minimal docx holding `body` as the contents of `<w:body>`.
    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_XML, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_and_runs() {
        let data = docx_with_body(
            "<w:p><w:r><w:t>Asha </w:t></w:r><w:r><w:t>Rao</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Skills:</w:t><w:tab/><w:t>Rust &amp; Go</w:t></w:r></w:p>",
        );
        assert_eq!(extract_text(&data).unwrap(), "Asha Rao\nSkills:\tRust & Go\n");
    }

    #[test]
    fn test_non_text_elements_are_skipped() {
        let data = docx_with_body(
            "<w:p><w:pPr><w:pStyle w:val=\"Heading1\"/></w:pPr><w:r><w:t>Experience</w:t></w:r></w:p><w:p/>",
        );
        assert_eq!(extract_text(&data).unwrap(), "Experience\n\n");
    }

    #[test]
    fn test_corrupt_bytes_are_rejected() {
        assert!(matches!(
            extract_text(b"\xd0\xcf\x11\xe0 legacy doc"),
            Err(DocxError::Archive(_))
        ));
    }

    #[test]
    fn test_archive_without_body_is_rejected() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let data = writer.finish().unwrap().into_inner();
        assert!(extract_text(&data).is_err());
    }
}
