//! Raw record to index document transformation

use uuid::Uuid;

use crate::types::{IndexDocument, RawRecord};

/// Source of fresh chunk identifiers.
///
/// Production uses [`UuidSource`]; tests inject a fixed source to make
/// transformation deterministic.
pub trait IdSource: Send + Sync {
    /// Produce the next unique identifier
    fn next_id(&self) -> String;
}

/// Default identifier source generating v4 UUIDs
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Template synthesizing the chunk text from record fields.
///
/// `{field}` placeholders are replaced with the record's value for that
/// field, or the empty string when absent. Keeping the synthesis as data
/// lets dormant fields (categories, ratings, prices) be re-enabled
/// without code changes.
#[derive(Debug, Clone)]
pub struct ChunkTemplate {
    template: String,
}

impl ChunkTemplate {
    /// Create a template from a `{field}` placeholder string
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the template against a record
    pub fn render(&self, record: &RawRecord) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            match rest[open + 1..].find('}') {
                Some(close) => {
                    let field = &rest[open + 1..open + 1 + close];
                    if let Some(value) = record.get(field) {
                        out.push_str(value);
                    }
                    rest = &rest[open + close + 2..];
                }
                None => {
                    // Unmatched brace, keep it literally
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);

        out
    }
}

impl Default for ChunkTemplate {
    /// Only the title field currently participates in the chunk text
    fn default() -> Self {
        Self::new("{name}. ")
    }
}

/// Maps one raw record into a normalized index document
pub struct DocumentTransformer {
    template: ChunkTemplate,
    ids: Box<dyn IdSource>,
}

impl DocumentTransformer {
    /// Create a transformer with the given chunk template and UUID ids
    pub fn new(template: ChunkTemplate) -> Self {
        Self {
            template,
            ids: Box::new(UuidSource),
        }
    }

    /// Replace the identifier source
    pub fn with_id_source(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Transform a record. Absent fields default to the empty string;
    /// the embedding vector is attached later by the driver.
    pub fn transform(&self, record: &RawRecord) -> IndexDocument {
        IndexDocument {
            chunk_id: self.ids.next_id(),
            parent_id: field(record, "parent_id"),
            title: None,
            main_category: Some(field(record, "main_category")),
            sub_category: Some(field(record, "sub_category")),
            chunk: self.template.render(record),
            text_vector: Vec::new(),
        }
    }
}

fn field(record: &RawRecord, name: &str) -> String {
    record.get(name).cloned().unwrap_or_default()
}
