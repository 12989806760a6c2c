//! Design customization model.
//!
//! Branding carries colors, logo URL, background settings, and card style
//! parameters. The core treats the whole object as opaque JSON beyond the
//! shallow merge on save; the rendering layer owns the key vocabulary.

use serde::{Deserialize, Serialize};

/// A tenant's design customization, keyed by opaque setting name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Branding {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl Branding {
    /// Shallow-merge incoming fields over the stored ones.
    ///
    /// Keys omitted by the caller keep their stored value — partial updates
    /// never reset settings to defaults. A caller that intends a reset must
    /// send the complete object.
    pub fn merge(&mut self, incoming: Branding) {
        for (key, value) in incoming.fields {
            self.fields.insert(key, value);
        }
    }

    /// Look up a single setting.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
