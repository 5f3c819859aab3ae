//! Document decoding — dispatches on file extension.

use thiserror::Error;

use crate::ingest::docx::extract_docx_text;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Could not read {kind} file: {reason}")]
    Corrupt { kind: DocumentKind, reason: String },
}

/// Formats the screener accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Resolves the kind from a file name's extension, case-insensitively.
    /// `.doc` is routed to the DOCX reader.
    pub fn from_file_name(file_name: &str) -> Result<Self, DecodeError> {
        // Suffix match on the whole name, so a bare ".txt" still counts.
        let lower = file_name.to_lowercase();
        let has = |suffixes: &[&str]| suffixes.iter().any(|s| lower.ends_with(*s));

        if has(&[".pdf"]) {
            Ok(Self::Pdf)
        } else if has(&[".docx", ".doc"]) {
            Ok(Self::Docx)
        } else if has(&[".txt", ".md"]) {
            Ok(Self::PlainText)
        } else {
            Err(DecodeError::UnsupportedType(file_name.to_string()))
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::PlainText => "text",
        };
        f.write_str(label)
    }
}

/// Turns uploaded bytes into plain text. CPU-bound for PDFs; callers on the
/// async runtime should run it inside `tokio::task::spawn_blocking`.
pub fn decode_document(file_name: &str, bytes: &[u8]) -> Result<String, DecodeError> {
    let kind = DocumentKind::from_file_name(file_name)?;
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            DecodeError::Corrupt {
                kind,
                reason: e.to_string(),
            }
        }),
        DocumentKind::Docx => extract_docx_text(bytes).map_err(|e| DecodeError::Corrupt {
            kind,
            reason: e.to_string(),
        }),
        DocumentKind::PlainText => Ok(decode_utf8_lossy(bytes)),
    }
}

/// UTF-8 decode that drops invalid sequences instead of substituting them.
fn decode_utf8_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
