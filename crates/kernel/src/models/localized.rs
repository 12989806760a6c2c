//! Localized text values.
//!
//! Menu text is stored either as a bare string (records predating
//! multi-language support) or as a map of language code → text. The sum
//! type keeps both wire shapes parseable while giving one exhaustive
//! resolution path instead of runtime shape-sniffing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A text value that may carry translations.
///
/// Serialized untagged: legacy records hold a bare JSON string, newer
/// records hold an object keyed by language code. Map keys are not
/// required to be exhaustive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// Bare string from a legacy record.
    Legacy(String),
    /// Language code → text.
    Localized(BTreeMap<String, String>),
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self::Legacy(String::new())
    }
}

/// Deserialize a possibly-null localized field.
///
/// Old records store JSON `null` for text the owner never touched; it maps
/// to the empty legacy value, which resolves to `""`.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<LocalizedText, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<LocalizedText>::deserialize(deserializer)?.unwrap_or_default())
}

impl LocalizedText {
    /// Wrap a legacy bare string under the default language.
    ///
    /// Already-localized values pass through unchanged, so normalizing
    /// twice is a no-op.
    pub fn normalize(self, default_lang: &str) -> Self {
        match self {
            Self::Legacy(text) => {
                let mut map = BTreeMap::new();
                map.insert(default_lang.to_string(), text);
                Self::Localized(map)
            }
            localized @ Self::Localized(_) => localized,
        }
    }

    /// Resolve the display string for a preferred language.
    ///
    /// Legacy strings pass through unchanged. Localized values try the
    /// preferred language, then the default, then the first populated
    /// entry in key order, then `""`. An empty entry never shadows a
    /// populated one.
    pub fn resolve(&self, preferred: &str, default_lang: &str) -> &str {
        match self {
            Self::Legacy(text) => text,
            Self::Localized(map) => {
                for lang in [preferred, default_lang] {
                    if let Some(text) = map.get(lang)
                        && !text.is_empty()
                    {
                        return text;
                    }
                }
                map.values()
                    .find(|text| !text.is_empty())
                    .map(String::as_str)
                    .unwrap_or("")
            }
        }
    }

    /// True when no language entry holds any text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Legacy(text) => text.is_empty(),
            Self::Localized(map) => map.values().all(|text| text.is_empty()),
        }
    }
}
