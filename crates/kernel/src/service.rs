//! Menu data facade.
//!
//! Composes the slug generator, tenant store, publication gate, and
//! localized-text resolution into the caller-facing operations: three read
//! entry points (dashboard, public, preview) and the dashboard writes.
//! Routes stay thin; every invariant is enforced here or in the store.

use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::locale::{DisplayMenu, resolve_menu};
use crate::models::branding::Branding;
use crate::models::menu::Menu;
use crate::models::restaurant::{
    OwnerId, RestaurantRecord, RestaurantSettings, RestaurantStatus,
};
use crate::publication::{ReadChannel, check_visibility, transition};
use crate::slug::slugify;
use crate::store::TenantStore;

/// Name given to a lazily created record before the owner picks one.
const PLACEHOLDER_NAME: &str = "New Restaurant";

/// Profile fields of a record, without the nested menu and branding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfile {
    pub slug: String,
    pub name: String,
    pub status: RestaurantStatus,
    pub address: String,
    pub phone: String,
    pub hours: String,
    pub currency: String,
}

impl From<&RestaurantRecord> for RestaurantProfile {
    fn from(record: &RestaurantRecord) -> Self {
        Self {
            slug: record.slug.clone(),
            name: record.name.clone(),
            status: record.status,
            address: record.address.clone(),
            phone: record.phone.clone(),
            hours: record.hours.clone(),
            currency: record.currency.clone(),
        }
    }
}

/// Everything the owner dashboard needs in one load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub restaurant: RestaurantProfile,
    pub menu: Menu,
    pub branding: Branding,
    pub is_active: bool,
    /// Where the public menu is (or will be) served; the QR layer encodes
    /// this URL.
    pub public_url: String,
}

/// The public/preview read payload, resolved for one display language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicView {
    pub restaurant: RestaurantProfile,
    pub menu: DisplayMenu,
    pub branding: Branding,
    pub language: String,
}

/// The menu data facade.
pub struct MenuService {
    store: TenantStore,
    default_language: String,
    site_url: String,
}

impl MenuService {
    pub fn new(store: TenantStore, default_language: String, site_url: String) -> Self {
        Self {
            store,
            default_language,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    fn public_url(&self, slug: &str) -> String {
        format!("{}/menu/{}", self.site_url, slug)
    }

    fn dashboard_view(&self, record: RestaurantRecord) -> DashboardView {
        DashboardView {
            restaurant: RestaurantProfile::from(&record),
            is_active: record.status.is_active(),
            public_url: self.public_url(&record.slug),
            menu: record.menu,
            branding: record.branding,
        }
    }

    fn public_view(&self, record: RestaurantRecord, preferred: &str) -> PublicView {
        PublicView {
            restaurant: RestaurantProfile::from(&record),
            menu: resolve_menu(&record.menu, preferred, &self.default_language),
            branding: record.branding,
            language: preferred.to_string(),
        }
    }

    /// Load the owner's record, creating a Draft lazily on first access.
    pub async fn load_dashboard(&self, owner: &OwnerId) -> AppResult<DashboardView> {
        let record = self.record_for(owner).await?;
        Ok(self.dashboard_view(record))
    }

    /// Anonymous public read: Active records only.
    pub async fn load_public(&self, slug: &str, preferred: &str) -> AppResult<PublicView> {
        let record = check_visibility(self.store.get_by_slug(slug).await, ReadChannel::Public)?;
        Ok(self.public_view(record, preferred))
    }

    /// Authorized preview: bypasses the status gate, but only for the
    /// owner's own slug. Unknown and foreign slugs are indistinguishable,
    /// so drafts never leak across tenants.
    pub async fn load_preview(
        &self,
        owner: &OwnerId,
        slug: &str,
        preferred: &str,
    ) -> AppResult<PublicView> {
        let looked_up = self
            .store
            .get_by_slug(slug)
            .await
            .filter(|record| record.owner_id == *owner);
        let record = check_visibility(looked_up, ReadChannel::Preview)?;
        Ok(self.public_view(record, preferred))
    }

    /// Replace the owner's menu content.
    ///
    /// Validates before touching the store — nothing is partially applied —
    /// and normalizes every localized field under the default language.
    /// Returns the menu as stored.
    pub async fn save_menu_content(&self, owner: &OwnerId, menu: Menu) -> AppResult<Menu> {
        menu.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut record = self.record_for(owner).await?;
        record.menu = menu.normalize(&self.default_language);
        record.changed = chrono::Utc::now().timestamp();

        let saved = record.menu.clone();
        self.store.put(record).await?;
        Ok(saved)
    }

    /// Shallow-merge design customization into the stored branding.
    ///
    /// Fields omitted by the caller are not reset; a reset requires sending
    /// the complete object. Returns the merged branding.
    pub async fn save_design_customization(
        &self,
        owner: &OwnerId,
        branding: Branding,
    ) -> AppResult<Branding> {
        let mut record = self.record_for(owner).await?;
        record.branding.merge(branding);
        record.changed = chrono::Utc::now().timestamp();

        let merged = record.branding.clone();
        self.store.put(record).await?;
        Ok(merged)
    }

    /// Activate or deactivate the menu. Idempotent: requesting the current
    /// status skips the write entirely.
    pub async fn update_menu_status(
        &self,
        owner: &OwnerId,
        target: RestaurantStatus,
    ) -> AppResult<RestaurantStatus> {
        let mut record = self.record_for(owner).await?;

        let Some(next) = transition(record.status, target) else {
            return Ok(record.status);
        };

        record.status = next;
        record.changed = chrono::Utc::now().timestamp();
        let slug = record.slug.clone();
        self.store.put(record).await?;

        info!(slug = %slug, status = %next, "menu status changed");
        Ok(next)
    }

    /// Save the restaurant settings, renaming the tenant when the name
    /// changed.
    ///
    /// The uniqueness check runs immediately before the write; the store's
    /// own slug conflict check remains the final authority under
    /// concurrent writers.
    pub async fn save_restaurant_settings(
        &self,
        owner: &OwnerId,
        settings: RestaurantSettings,
    ) -> AppResult<DashboardView> {
        let name = settings.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("restaurant name must not be empty".to_string()));
        }

        let new_slug = slugify(&name);
        if new_slug.is_empty() {
            return Err(AppError::Validation(
                "restaurant name must contain at least one letter or digit".to_string(),
            ));
        }

        if !self.is_name_unique(&name, owner).await {
            return Err(AppError::NameConflict);
        }

        let mut record = self.record_for(owner).await?;
        let old_slug = record.slug.clone();

        record.name = name;
        if let Some(address) = settings.address {
            record.address = address;
        }
        if let Some(phone) = settings.phone {
            record.phone = phone;
        }
        if let Some(hours) = settings.hours {
            record.hours = hours;
        }
        if let Some(currency) = settings.currency {
            record.currency = currency;
        }
        record.changed = chrono::Utc::now().timestamp();

        let record = if new_slug == old_slug {
            self.store.put(record.clone()).await?;
            record
        } else {
            let mut renamed = record;
            renamed.slug = new_slug.clone();
            self.store.rename(&old_slug, &new_slug, renamed.clone()).await?;
            renamed
        };

        Ok(self.dashboard_view(record))
    }

    /// Check a candidate name against all tenants, excluding the
    /// requester's own record. Case- and whitespace-insensitive.
    ///
    /// Advisory only — not safe against concurrent writers. Callers
    /// validate immediately before a write and treat the write's own
    /// conflict check as the final authority.
    pub async fn is_name_unique(&self, name: &str, exclude_owner: &OwnerId) -> bool {
        let normalized = name.trim().to_lowercase();
        self.store
            .list_all()
            .await
            .iter()
            .filter(|record| record.owner_id != *exclude_owner)
            .all(|record| record.name.trim().to_lowercase() != normalized)
    }

    /// Look up the owner's record, creating a Draft lazily on first access.
    ///
    /// The fresh record gets a placeholder name and an owner-derived slug
    /// (numeric suffix on collision) so it is addressable before the owner
    /// picks a real name.
    async fn record_for(&self, owner: &OwnerId) -> AppResult<RestaurantRecord> {
        if let Some(record) = self.store.get_by_owner(owner).await {
            return Ok(record);
        }

        let base = slugify(&format!("restaurant-{owner}"));
        let mut slug = base.clone();
        for i in 2..100 {
            if self.store.get_by_slug(&slug).await.is_none() {
                break;
            }
            slug = format!("{base}-{i}");
        }

        let record = RestaurantRecord::draft(owner.clone(), PLACEHOLDER_NAME, slug);
        self.store.put(record.clone()).await?;

        info!(owner = %owner, slug = %record.slug, "tenant record created");
        Ok(record)
    }
}

impl std::fmt::Debug for MenuService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuService")
            .field("default_language", &self.default_language)
            .finish()
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::localized::LocalizedText;
    use crate::models::menu::{Item, Section};
    use crate::store::{MemoryBackend, TenantStore};
    use std::sync::Arc;

    async fn service() -> MenuService {
        let store = TenantStore::open(Arc::new(MemoryBackend::new())).await.unwrap();
        MenuService::new(store, "en".to_string(), "https://carta.example".to_string())
    }

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id)
    }

    fn settings(name: &str) -> RestaurantSettings {
        RestaurantSettings {
            name: name.to_string(),
            address: None,
            phone: None,
            hours: None,
            currency: None,
        }
    }

    fn two_section_menu() -> Menu {
        let item = |id: &str| Item {
            id: id.to_string(),
            title: LocalizedText::Legacy(format!("Item {id}")),
            description: LocalizedText::default(),
            price: 5.0,
            image: None,
            is_available: true,
        };
        Menu {
            sections: vec![
                Section {
                    id: "s1".to_string(),
                    title: LocalizedText::Legacy("Starters".to_string()),
                    description: LocalizedText::default(),
                    image: None,
                    items: vec![item("i1")],
                },
                Section {
                    id: "s2".to_string(),
                    title: LocalizedText::Legacy("Mains".to_string()),
                    description: LocalizedText::default(),
                    image: None,
                    items: vec![item("i2")],
                },
            ],
        }
    }

    #[tokio::test]
    async fn dashboard_lazily_creates_draft() {
        let service = service().await;
        let view = service.load_dashboard(&owner("owner-1")).await.unwrap();

        assert_eq!(view.restaurant.status, RestaurantStatus::Draft);
        assert!(!view.is_active);
        assert!(view.menu.sections.is_empty());
        assert!(view.public_url.starts_with("https://carta.example/menu/"));

        // Second load returns the same record, no duplicate
        let again = service.load_dashboard(&owner("owner-1")).await.unwrap();
        assert_eq!(again.restaurant.slug, view.restaurant.slug);
    }

    #[tokio::test]
    async fn uniqueness_excludes_the_requester() {
        let service = service().await;
        service
            .save_restaurant_settings(&owner("owner-1"), settings("Lezzet"))
            .await
            .unwrap();

        assert!(service.is_name_unique("Lezzet", &owner("owner-1")).await);
        assert!(!service.is_name_unique("Lezzet", &owner("owner-2")).await);
        assert!(!service.is_name_unique("  lezzet ", &owner("owner-2")).await);
    }

    #[tokio::test]
    async fn name_conflict_is_case_insensitive_across_diacritics() {
        let service = service().await;
        service
            .save_restaurant_settings(&owner("owner-a"), settings("Ocakbaşı"))
            .await
            .unwrap();

        let view = service.load_dashboard(&owner("owner-a")).await.unwrap();
        assert_eq!(view.restaurant.slug, "ocakbasi");

        let err = service
            .save_restaurant_settings(&owner("owner-b"), settings("ocakbaşı"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NameConflict));
    }

    #[tokio::test]
    async fn rename_preserves_menu_and_branding() {
        let service = service().await;
        let o = owner("owner-1");
        service.save_restaurant_settings(&o, settings("Lezzet")).await.unwrap();
        service.save_menu_content(&o, two_section_menu()).await.unwrap();
        let branding: Branding =
            serde_json::from_value(serde_json::json!({"primaryColor": "#aa0000"})).unwrap();
        service.save_design_customization(&o, branding.clone()).await.unwrap();

        let view = service.save_restaurant_settings(&o, settings("Ocakbaşı")).await.unwrap();
        assert_eq!(view.restaurant.slug, "ocakbasi");
        assert_eq!(view.menu.sections.len(), 2);
        assert_eq!(view.branding, branding);

        // Renaming back and forth keeps content intact
        let view = service.save_restaurant_settings(&o, settings("Lezzet")).await.unwrap();
        assert_eq!(view.restaurant.slug, "lezzet");
        assert_eq!(view.menu.sections.len(), 2);
    }

    #[tokio::test]
    async fn case_only_rename_keeps_the_slug() {
        let service = service().await;
        let o = owner("owner-1");
        service.save_restaurant_settings(&o, settings("Lezzet")).await.unwrap();
        let view = service.save_restaurant_settings(&o, settings("LEZZET")).await.unwrap();
        assert_eq!(view.restaurant.slug, "lezzet");
        assert_eq!(view.restaurant.name, "LEZZET");
    }

    #[tokio::test]
    async fn unsluggable_name_is_rejected() {
        let service = service().await;
        let err = service
            .save_restaurant_settings(&owner("owner-1"), settings("!!!"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service
            .save_restaurant_settings(&owner("owner-1"), settings("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn publish_then_public_read_returns_both_sections() {
        let service = service().await;
        let o = owner("owner-1");
        service.save_restaurant_settings(&o, settings("Lezzet")).await.unwrap();
        service.save_menu_content(&o, two_section_menu()).await.unwrap();
        service.update_menu_status(&o, RestaurantStatus::Active).await.unwrap();

        let view = service.load_public("lezzet", "en").await.unwrap();
        assert_eq!(view.menu.sections.len(), 2);
        assert_eq!(view.menu.sections[0].title, "Starters");
        assert_eq!(view.menu.sections[1].title, "Mains");
    }

    #[tokio::test]
    async fn draft_menu_is_gated_for_public_but_not_preview() {
        let service = service().await;
        let o = owner("owner-1");
        service.save_restaurant_settings(&o, settings("Lezzet")).await.unwrap();
        service.save_menu_content(&o, two_section_menu()).await.unwrap();

        let err = service.load_public("lezzet", "en").await.unwrap_err();
        assert!(matches!(err, AppError::MenuUnavailable));

        let preview = service.load_preview(&o, "lezzet", "en").await.unwrap();
        assert_eq!(preview.menu.sections.len(), 2);
    }

    #[tokio::test]
    async fn preview_hides_foreign_and_unknown_slugs() {
        let service = service().await;
        service
            .save_restaurant_settings(&owner("owner-1"), settings("Lezzet"))
            .await
            .unwrap();

        let err = service
            .load_preview(&owner("owner-2"), "lezzet", "en")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RestaurantNotFound));

        let err = service
            .load_preview(&owner("owner-2"), "no-such-slug", "en")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RestaurantNotFound));
    }

    #[tokio::test]
    async fn status_updates_are_idempotent() {
        let service = service().await;
        let o = owner("owner-1");
        service.load_dashboard(&o).await.unwrap();

        let status = service.update_menu_status(&o, RestaurantStatus::Active).await.unwrap();
        assert_eq!(status, RestaurantStatus::Active);
        let status = service.update_menu_status(&o, RestaurantStatus::Active).await.unwrap();
        assert_eq!(status, RestaurantStatus::Active);

        let status = service.update_menu_status(&o, RestaurantStatus::Draft).await.unwrap();
        assert_eq!(status, RestaurantStatus::Draft);
    }

    #[tokio::test]
    async fn save_menu_normalizes_legacy_text() {
        let service = service().await;
        let o = owner("owner-1");
        let saved = service.save_menu_content(&o, two_section_menu()).await.unwrap();
        assert!(matches!(saved.sections[0].title, LocalizedText::Localized(_)));

        let view = service.load_dashboard(&o).await.unwrap();
        assert_eq!(view.menu, saved);
    }

    #[tokio::test]
    async fn invalid_menu_is_not_applied() {
        let service = service().await;
        let o = owner("owner-1");
        service.save_menu_content(&o, two_section_menu()).await.unwrap();

        let mut bad = two_section_menu();
        bad.sections[1].items[0].price = -1.0;
        let err = service.save_menu_content(&o, bad).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Stored menu unchanged
        let view = service.load_dashboard(&o).await.unwrap();
        assert_eq!(view.menu.sections[1].items[0].price, 5.0);
    }

    #[tokio::test]
    async fn lazy_create_slugs_do_not_collide() {
        let store = TenantStore::open(Arc::new(MemoryBackend::new())).await.unwrap();
        let service =
            MenuService::new(store, "en".to_string(), "https://carta.example".to_string());

        // Both ids slugify to the same base
        let a = service.load_dashboard(&owner("çorba")).await.unwrap();
        let b = service.load_dashboard(&owner("corba")).await.unwrap();
        assert_ne!(a.restaurant.slug, b.restaurant.slug);
    }
}
