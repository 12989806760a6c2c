//! HTTP route handlers.

pub mod dashboard;
pub mod health;
pub mod public_menu;
