use std::path::Path;
use tracing::debug;

use crate::error::{Result, SyncError};

pub struct PdfDecoder;

impl PdfDecoder {
    /// Extract the text layer of a PDF held in memory.
    pub fn decode(bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| SyncError::Decode("PDF parser aborted on malformed input".to_string()))?
            .map_err(|e| SyncError::Decode(e.to_string()))?;

        debug!("Decoded {} bytes of PDF into {} chars", bytes.len(), text.len());
        Self::ensure_text(text, "PDF")
    }

    /// Decode a local file: PDFs by content, anything else as UTF-8 text.
    pub fn decode_file(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)
            .map_err(|e| SyncError::Decode(format!("{}: {}", path.display(), e)))?;

        let is_pdf = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
            || bytes.starts_with(b"%PDF");
        if is_pdf {
            return Self::decode(&bytes);
        }

        let text = String::from_utf8(bytes)
            .map_err(|e| SyncError::Decode(format!("{}: {}", path.display(), e)))?;
        Self::ensure_text(text, &path.display().to_string())
    }

    /// Reject text with nothing but whitespace.
    pub fn ensure_text(text: String, origin: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(SyncError::InputEmpty(origin.to_string()));
        }
        Ok(text)
    }
}
