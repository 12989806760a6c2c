//! HTTP middleware components.

pub mod owner_auth;

pub use owner_auth::{OwnerAuth, require_owner};
