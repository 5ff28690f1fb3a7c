//! Source file parsing and text splitting

mod chunker;
mod pdf;
mod records;

pub use chunker::TextChunker;
pub use pdf::extract_text;
pub use records::parse_records;
