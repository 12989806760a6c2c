//! Owner identity seam.
//!
//! The core trusts that the caller has already authenticated; this trait
//! only turns an opaque bearer token into the owner it stands for. Session
//! issuance, password handling, and token lifecycle all live outside this
//! repository.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::restaurant::OwnerId;

/// Resolves opaque bearer tokens to owner identities.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve a token, or `None` if it authenticates nobody.
    async fn resolve(&self, token: &str) -> Option<OwnerId>;
}

/// Fixed token table, loaded from configuration.
///
/// Stands in for a real session service; good enough for deployments where
/// tokens are provisioned out of band, and for tests.
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    tokens: HashMap<String, OwnerId>,
}

impl StaticTokenProvider {
    pub fn new(tokens: HashMap<String, OwnerId>) -> Self {
        Self { tokens }
    }

    /// Parse a `token:owner,token:owner` spec from configuration.
    ///
    /// Entries must be non-empty on both sides; blank segments are skipped
    /// so trailing commas are harmless.
    pub fn from_spec(spec: &str) -> Result<Self> {
        let mut tokens = HashMap::new();
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((token, owner)) = entry.split_once(':') else {
                anyhow::bail!("invalid OWNER_TOKENS entry '{entry}': expected token:owner");
            };
            let (token, owner) = (token.trim(), owner.trim());
            if token.is_empty() || owner.is_empty() {
                anyhow::bail!("invalid OWNER_TOKENS entry '{entry}': empty token or owner");
            }
            tokens.insert(token.to_string(), OwnerId::new(owner));
        }
        Ok(Self { tokens })
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn resolve(&self, token: &str) -> Option<OwnerId> {
        self.tokens.get(token).cloned()
    }
}
