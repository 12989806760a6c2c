//! Domain models.

pub mod branding;
pub mod localized;
pub mod menu;
pub mod restaurant;

pub use branding::Branding;
pub use localized::LocalizedText;
pub use menu::{Item, Menu, Section};
pub use restaurant::{
    OwnerId, RestaurantRecord, RestaurantSettings, RestaurantStatus, StatusChange,
};
