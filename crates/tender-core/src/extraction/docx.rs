//! Word document reader.
//!
//! A .docx file is a zip container; the body text lives in
//! `word/document.xml` as `<w:p>` paragraphs of `<w:t>` runs. Legacy binary
//! .doc files are not zip containers and fail to open.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::TenderError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the non-empty paragraphs of a .docx file, one per line.
pub fn read_docx_text(bytes: &[u8]) -> Result<String, TenderError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| docx_error(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| docx_error(format!("{DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    paragraphs_from_xml(&xml).map(|paragraphs| paragraphs.join("\n"))
}

/// Collect trimmed, non-empty paragraph texts from WordprocessingML.
fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, TenderError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:p" => current.clear(),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" => current.push(' '),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| docx_error(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    let paragraph = current.trim();
                    if !paragraph.is_empty() {
                        paragraphs.push(paragraph.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(docx_error(e.to_string())),
        }
    }

    Ok(paragraphs)
}

fn docx_error(reason: String) -> TenderError {
    TenderError::Document {
        kind: "docx",
        reason,
    }
}
