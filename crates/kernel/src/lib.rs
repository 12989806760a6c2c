//! Carta Kernel Library
//!
//! The tenant identity & menu-state resolution core of the Carta menu
//! publishing platform, plus its HTTP surface. The main entry point for
//! running the server is the `carta` binary.

pub mod auth;
pub mod config;
pub mod error;
pub mod locale;
pub mod middleware;
pub mod models;
pub mod publication;
pub mod routes;
pub mod service;
pub mod slug;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
