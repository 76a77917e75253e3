//! Serde model of the PhiloLogic concordance response.
//!
//! The response schema is an external contract owned by the service. Every
//! field defaults here, so a hit with missing metadata degrades to empty
//! output columns instead of failing the run; a body whose top-level shape
//! does not match at all surfaces as a decode error in the client.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    /// Total number of hits for the query, independent of the paging window.
    #[serde(default)]
    pub results_length: u64,
    #[serde(default)]
    pub results: Vec<Hit>,
}

/// One concordance hit: a cited passage whose context marks the matched
/// tokens with highlight spans.
#[derive(Debug, Default, Deserialize)]
pub struct Hit {
    /// Context of the hit as an HTML fragment.
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub metadata_fields: HashMap<String, Value>,
    /// Positional path of the hit (document id first).
    #[serde(default)]
    pub philo_id: Vec<Value>,
    /// Citation trail, document level first, then div levels.
    #[serde(default)]
    pub citation: Vec<Citation>,
    /// Navigation hrefs keyed by object level ("para", "line", "doc").
    #[serde(default)]
    pub citation_links: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Citation {
    #[serde(default)]
    pub object_type: String,
    #[serde(default)]
    pub label: Value,
    #[serde(default)]
    pub href: String,
}

/// Render a loosely typed scalar field as a trimmed string.
///
/// The service is inconsistent about whether ids and labels are JSON
/// strings or numbers; anything else is treated as absent.
pub fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

impl Hit {
    /// A metadata field as a string, or empty when absent or non-scalar.
    pub fn metadata_str(&self, key: &str) -> String {
        self.metadata_fields
            .get(key)
            .map(scalar_string)
            .unwrap_or_default()
    }
}
