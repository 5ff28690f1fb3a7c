//! Record and document types for the ingestion pipeline

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One raw source record: an untyped mapping of field name to string value.
/// Lives for a single pipeline iteration.
pub type RawRecord = HashMap<String, String>;

/// A document shaped for the search index schema.
///
/// Created by the transformer with an empty `text_vector`; the driver
/// attaches the embedding before the document joins a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexDocument {
    /// Freshly generated unique identifier for this chunk
    pub chunk_id: String,
    /// Identifier of the source record's parent (may be empty)
    pub parent_id: String,
    /// Source title, set for report chunks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Top-level category, set for product records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category: Option<String>,
    /// Second-level category, set for product records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Synthesized text chunk that gets embedded
    pub chunk: String,
    /// Embedding vector for `chunk`
    pub text_vector: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let doc = IndexDocument {
            chunk_id: "c1".to_string(),
            parent_id: String::new(),
            title: None,
            main_category: None,
            sub_category: None,
            chunk: "text".to_string(),
            text_vector: vec![0.5, 0.25],
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("title").is_none());
        assert!(json.get("main_category").is_none());
        assert_eq!(json["chunk_id"], "c1");
        assert_eq!(json["text_vector"].as_array().unwrap().len(), 2);
    }
}
