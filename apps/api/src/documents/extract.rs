//! Turns uploads into Document Text.

use thiserror::Error;
use tracing::debug;

use crate::documents::docx::extract_docx_text;
use crate::documents::upload::UploadedFile;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Extracts the plain text of a resume. Word (.docx) and PDF are recognised by
/// their magic bytes, not by file name.
pub fn extract_resume_text(upload: &dyn UploadedFile) -> Result<String, DocumentError> {
    let bytes = upload.read_bytes();
    debug!("Extracting resume '{}' ({} bytes)", upload.name(), bytes.len());

    if bytes.starts_with(ZIP_MAGIC) {
        extract_docx_text(&bytes)
    } else if bytes.starts_with(PDF_MAGIC) {
        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            DocumentError::UnsupportedFormat(format!("could not read PDF '{}': {e}", upload.name()))
        })?;
        Ok(text.trim().to_string())
    } else {
        Err(DocumentError::UnsupportedFormat(format!(
            "'{}' is not a Word (.docx) or PDF document",
            upload.name()
        )))
    }
}

/// Decodes a job description as strict UTF-8.
pub fn decode_job_description(upload: &dyn UploadedFile) -> Result<String, DocumentError> {
    let bytes = upload.read_bytes();

    String::from_utf8(bytes.to_vec()).map_err(|e| {
        DocumentError::Encoding(format!(
            "'{}' is not valid UTF-8 (invalid byte sequence at offset {})",
            upload.name(),
            e.utf8_error().valid_up_to()
        ))
    })
}

#[cfg(test)]
pub mod testing {
    //! Minimal single-page PDF builder for extraction tests.

    fn escape(line: &str) -> String {
        line.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// One Helvetica text line per entry, top to bottom. Cross-reference offsets
    /// are computed so the file parses without repair.
    pub fn build_pdf(lines: &[&str]) -> Vec<u8> {
        let mut content = String::from("BT\n/F1 12 Tf\n14 TL\n72 720 Td\n");
        for line in lines {
            content.push_str(&format!("({}) Tj T*\n", escape(line)));
        }
        content.push_str("ET");

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
        }

        let xref_offset = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.extend_from_slice(xref.as_bytes());
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        pdf
    }
}
