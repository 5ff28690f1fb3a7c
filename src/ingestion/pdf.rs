//! PDF text extraction

use crate::error::{Error, Result};

/// Extract plain text from an in-memory PDF payload.
///
/// `source` only labels errors; extraction itself is delegated to
/// `pdf-extract`.
pub fn extract_text(source: &str, data: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| Error::file_parse(source, e.to_string()))
}
