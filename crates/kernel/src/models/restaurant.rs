//! Restaurant tenant record.
//!
//! One record per owner, keyed publicly by slug. The record carries the
//! profile fields, the publication status, and the nested menu and branding
//! documents. Field names stay camelCase on the wire for compatibility with
//! existing stored records.

use serde::{Deserialize, Serialize};

use crate::models::branding::Branding;
use crate::models::menu::Menu;

/// Opaque tenant principal supplied by the auth seam.
///
/// The core never interprets the value; it only uses it as the owner index
/// key and for excluding the requester from uniqueness checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication state of a tenant's menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestaurantStatus {
    /// Visible to the owner (dashboard) and authorized preview only.
    Draft,
    /// Visible to anonymous public readers.
    Active,
}

impl RestaurantStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for RestaurantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// A restaurant tenant record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    pub owner_id: OwnerId,

    /// URL-safe unique public identifier, derived from `name`.
    pub slug: String,

    /// Free-text display name as the owner typed it.
    pub name: String,

    pub status: RestaurantStatus,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub phone: String,

    /// Free-text opening hours.
    #[serde(default)]
    pub hours: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub menu: Menu,

    #[serde(default)]
    pub branding: Branding,

    /// Unix timestamp when the record was created.
    pub created: i64,

    /// Unix timestamp of the last write.
    pub changed: i64,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl RestaurantRecord {
    /// Create a fresh Draft record with an empty menu.
    pub fn draft(owner_id: OwnerId, name: impl Into<String>, slug: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            owner_id,
            slug: slug.into(),
            name: name.into(),
            status: RestaurantStatus::Draft,
            address: String::new(),
            phone: String::new(),
            hours: String::new(),
            currency: default_currency(),
            menu: Menu::default(),
            branding: Branding::default(),
            created: now,
            changed: now,
        }
    }
}

/// Input for saving restaurant settings from the dashboard.
///
/// `name` is required and drives the rename; the profile fields replace the
/// stored values only when provided.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettings {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub currency: Option<String>,
}

/// Input for a publication status change.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusChange {
    pub status: RestaurantStatus,
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn draft_record_starts_empty_and_unpublished() {
        let record = RestaurantRecord::draft(OwnerId::new("owner-1"), "Lezzet", "lezzet");
        assert_eq!(record.status, RestaurantStatus::Draft);
        assert!(!record.status.is_active());
        assert!(record.menu.sections.is_empty());
        assert!(record.branding.is_empty());
        assert_eq!(record.created, record.changed);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&RestaurantStatus::Active).unwrap();
        assert_eq!(json, r#""active""#);
        let parsed: RestaurantStatus = serde_json::from_str(r#""draft""#).unwrap();
        assert_eq!(parsed, RestaurantStatus::Draft);
    }

    #[test]
    fn record_round_trips_with_camel_case_fields() {
        let record = RestaurantRecord::draft(OwnerId::new("owner-1"), "Lezzet", "lezzet");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("ownerId"), "got: {json}");

        let parsed: RestaurantRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn missing_profile_fields_default() {
        let parsed: RestaurantRecord = serde_json::from_str(
            r#"{
                "ownerId": "owner-1",
                "slug": "lezzet",
                "name": "Lezzet",
                "status": "draft",
                "created": 0,
                "changed": 0
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.address, "");
        assert_eq!(parsed.currency, "EUR");
        assert!(parsed.menu.sections.is_empty());
    }
}
