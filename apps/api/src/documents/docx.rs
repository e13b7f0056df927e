//! Plain-text extraction from Word (.docx) documents.
//!
//! A .docx file is a zip archive; the text lives in `word/document.xml`, with
//! optional `word/headerN.xml` / `word/footerN.xml` parts. Output order is
//! headers, body, footers. Within a part: `w:t` runs are copied, `w:tab` becomes
//! a tab, `w:br` / `w:cr` a newline, and each paragraph ends with a blank line.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::ZipArchive;

use crate::documents::extract::DocumentError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::UnsupportedFormat(format!("not a valid .docx archive: {e}")))?;

    let mut headers = Vec::new();
    let mut footers = Vec::new();
    let mut has_document = false;
    for name in archive.file_names() {
        if name == DOCUMENT_PART {
            has_document = true;
        } else if is_part(name, "header") {
            headers.push(name.to_string());
        } else if is_part(name, "footer") {
            footers.push(name.to_string());
        }
    }

    if !has_document {
        return Err(DocumentError::UnsupportedFormat(format!(
            "not a Word document: missing {DOCUMENT_PART}"
        )));
    }

    headers.sort();
    footers.sort();

    let mut text = String::new();
    let parts = headers
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(DOCUMENT_PART))
        .chain(footers.iter().map(String::as_str));
    for part in parts {
        let xml = read_part(&mut archive, part)?;
        text.push_str(&xml_to_text(&xml)?);
    }

    Ok(text.trim().to_string())
}

/// Matches `word/header1.xml`, `word/footer2.xml`, ...
fn is_part(name: &str, kind: &str) -> bool {
    name.strip_prefix("word/")
        .and_then(|rest| rest.strip_prefix(kind))
        .and_then(|rest| rest.strip_suffix(".xml"))
        .is_some_and(|n| n.chars().all(|c| c.is_ascii_digit()))
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<String, DocumentError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| DocumentError::UnsupportedFormat(format!("unreadable part {name}: {e}")))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::UnsupportedFormat(format!("unreadable part {name}: {e}")))?;
    Ok(xml)
}

fn xml_to_text(xml: &str) -> Result<String, DocumentError> {
    let malformed = |e: quick_xml::Error| {
        DocumentError::UnsupportedFormat(format!("malformed document XML: {e}"))
    };

    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;
    // Tab stops inside paragraph properties are layout, not content.
    let mut in_tab_stops = false;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = true,
                b"w:tabs" => in_tab_stops = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:tabs" => in_tab_stops = false,
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" if !in_tab_stops => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape().map_err(malformed)?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}


#[cfg(test)]
mod tests {
    use super::testing::{build_docx, build_zip};
    use super::*;

    const NS: &str = "xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"";

    #[test]
    fn test_paragraphs_are_separated_by_blank_lines() {
        let bytes = build_docx(&["Jane Doe", "Rust Engineer"]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "Jane Doe\n\nRust Engineer");
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let document = format!(
            "<w:document {NS}><w:body><w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
             <w:r><w:t>Skills:</w:t><w:tab/><w:t>Rust &amp; Go</w:t><w:br/><w:t>Kafka</w:t></w:r></w:p></w:body></w:document>"
        );
        let bytes = build_zip(&[("word/document.xml", &document)]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "Skills:\tRust & Go\nKafka");
    }

    #[test]
    fn test_headers_and_footers_wrap_the_body() {
        let part = |text: &str, root: &str| {
            format!("<w:{root} {NS}><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:{root}>")
        };
        let document = format!(
            "<w:document {NS}><w:body><w:p><w:r><w:t>Body</w:t></w:r></w:p></w:body></w:document>"
        );
        let bytes = build_zip(&[
            ("word/footer1.xml", &part("Footer", "ftr")),
            ("word/document.xml", &document),
            ("word/header1.xml", &part("Header", "hdr")),
            ("word/styles.xml", &part("Styles", "styles")),
        ]);

        assert_eq!(extract_docx_text(&bytes).unwrap(), "Header\n\nBody\n\nFooter");
    }

    #[test]
    fn test_zip_without_document_part_is_unsupported() {
        let bytes = build_zip(&[("xl/workbook.xml", "<workbook/>")]);
        let err = extract_docx_text(&bytes).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(ref m) if m.contains("word/document.xml")));
    }

    #[test]
    fn test_non_zip_bytes_are_unsupported() {
        let err = extract_docx_text(b"plain text pretending to be docx").unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_malformed_xml_is_unsupported() {
        let bytes = build_zip(&[("word/document.xml", "<w:document><w:body></w:p></w:document>")]);
        assert!(matches!(
            extract_docx_text(&bytes),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_part_name_matching() {
        assert!(is_part("word/header1.xml", "header"));
        assert!(is_part("word/footer12.xml", "footer"));
        assert!(!is_part("word/headerx.xml", "header"));
        assert!(!is_part("word/_rels/header1.xml.rels", "header"));
    }
}
