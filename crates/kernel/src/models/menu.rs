//! Menu content model and validation.
//!
//! A menu is the owner-edited tree of sections and items. Section and item
//! ids are assigned by the editing UI; the core only requires that they are
//! non-empty and unique within one menu. Field names stay camelCase on the
//! wire for compatibility with existing stored records.

use std::collections::HashSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::localized::{LocalizedText, null_as_empty};

/// A tenant's full menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A titled group of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: LocalizedText,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: LocalizedText,

    /// Opaque image URL from the upload service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default)]
    pub items: Vec<Item>,
}

/// A single menu entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: LocalizedText,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: LocalizedText,

    pub price: f64,

    /// Opaque image URL from the upload service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl Menu {
    /// Validate the menu payload before it is merged into the store.
    ///
    /// Section ids must be non-empty and unique within the menu; item ids
    /// must be non-empty and unique across all sections; prices must be
    /// finite and non-negative. Nothing is applied when validation fails.
    pub fn validate(&self) -> Result<()> {
        let mut section_ids = HashSet::new();
        let mut item_ids = HashSet::new();

        for section in &self.sections {
            if section.id.is_empty() {
                anyhow::bail!("section id must not be empty");
            }
            if !section_ids.insert(section.id.as_str()) {
                anyhow::bail!("duplicate section id '{}'", section.id);
            }

            for item in &section.items {
                if item.id.is_empty() {
                    anyhow::bail!("item id must not be empty in section '{}'", section.id);
                }
                if !item_ids.insert(item.id.as_str()) {
                    anyhow::bail!("duplicate item id '{}'", item.id);
                }
                if !item.price.is_finite() {
                    anyhow::bail!("item '{}' price must be a number", item.id);
                }
                if item.price < 0.0 {
                    anyhow::bail!("item '{}' price must not be negative", item.id);
                }
            }
        }

        Ok(())
    }

    /// Normalize every localized field to the language-map form.
    ///
    /// Applied on save so legacy bare strings are stored under the default
    /// language from then on. Idempotent.
    pub fn normalize(mut self, default_lang: &str) -> Self {
        for section in &mut self.sections {
            section.title = std::mem::take(&mut section.title).normalize(default_lang);
            section.description = std::mem::take(&mut section.description).normalize(default_lang);
            for item in &mut section.items {
                item.title = std::mem::take(&mut item.title).normalize(default_lang);
                item.description = std::mem::take(&mut item.description).normalize(default_lang);
            }
        }
        self
    }
}
