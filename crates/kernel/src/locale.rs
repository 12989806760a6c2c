//! Language preference and display resolution for the read path.
//!
//! The public page asks for a menu in one language; this module picks that
//! language (`?lang=` query → Accept-Language header → site default) and
//! flattens every localized field to a plain display string.

use serde::Serialize;

use crate::models::localized::LocalizedText;
use crate::models::menu::Menu;

/// Pick the preferred display language for a public read.
///
/// An explicit `?lang=` query wins; otherwise the highest-quality
/// Accept-Language entry (primary subtag) is used; otherwise the default.
/// The result is advisory — resolution falls back per field, so an unknown
/// language here degrades gracefully instead of failing.
pub fn preferred_language(
    query_lang: Option<&str>,
    accept_language: Option<&str>,
    default_lang: &str,
) -> String {
    if let Some(lang) = query_lang {
        let lang = lang.trim().to_lowercase();
        if !lang.is_empty() {
            return lang;
        }
    }

    if let Some(header) = accept_language
        && let Some((lang, _quality)) = parse_accept_language(header).into_iter().next()
    {
        // Primary subtag: "en-US" → "en"
        if let Some(primary) = lang.split('-').next()
            && !primary.is_empty()
        {
            return primary.to_string();
        }
    }

    default_lang.to_string()
}

/// Parse an Accept-Language header value into (language, quality) pairs,
/// sorted by quality descending (stable sort preserves original order for
/// ties).
fn parse_accept_language(header: &str) -> Vec<(String, f32)> {
    let mut langs: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }

            let mut segments = part.split(';');
            let lang = segments.next()?.trim().to_lowercase();
            if lang.is_empty() || lang == "*" {
                return None;
            }

            let quality = segments
                .find_map(|s| {
                    let s = s.trim();
                    s.strip_prefix("q=")
                        .and_then(|q| q.trim().parse::<f32>().ok())
                })
                .unwrap_or(1.0)
                .clamp(0.0, 1.0); // RFC 7231 §5.3.1: quality values are 0.000–1.000

            Some((lang, quality))
        })
        .collect();

    langs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    langs
}

/// A menu flattened to plain strings for one display language.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayMenu {
    pub sections: Vec<DisplaySection>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySection {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub items: Vec<DisplayItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_available: bool,
}

/// Resolve every localized field of a menu for one preferred language.
pub fn resolve_menu(menu: &Menu, preferred: &str, default_lang: &str) -> DisplayMenu {
    let resolve = |text: &LocalizedText| text.resolve(preferred, default_lang).to_string();

    DisplayMenu {
        sections: menu
            .sections
            .iter()
            .map(|section| DisplaySection {
                id: section.id.clone(),
                title: resolve(&section.title),
                description: resolve(&section.description),
                image: section.image.clone(),
                items: section
                    .items
                    .iter()
                    .map(|item| DisplayItem {
                        id: item.id.clone(),
                        title: resolve(&item.title),
                        description: resolve(&item.description),
                        price: item.price,
                        image: item.image.clone(),
                        is_available: item.is_available,
                    })
                    .collect(),
            })
            .collect(),
    }
}
