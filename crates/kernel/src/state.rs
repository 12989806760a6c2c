//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::auth::{AuthProvider, StaticTokenProvider};
use crate::config::Config;
use crate::service::MenuService;
use crate::store::{FileBackend, StorageBackend, TenantStore};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Menu data facade; owns the tenant store.
    menus: MenuService,

    /// Owner identity seam for the dashboard and preview routes.
    auth: Arc<dyn AuthProvider>,
}

impl AppState {
    /// Initialize production state: file-backed store, static token table.
    pub async fn new(config: &Config) -> Result<Self> {
        let backend = Arc::new(FileBackend::new(config.data_file.clone()));
        let auth = Arc::new(
            StaticTokenProvider::from_spec(&config.owner_tokens)
                .context("failed to parse OWNER_TOKENS")?,
        );
        Self::with_backend(config, backend, auth).await
    }

    /// Initialize state over injected seams.
    ///
    /// Tests pass an in-memory backend and their own token table here; the
    /// rest of the stack is the real one.
    pub async fn with_backend(
        config: &Config,
        backend: Arc<dyn StorageBackend>,
        auth: Arc<dyn AuthProvider>,
    ) -> Result<Self> {
        let store = TenantStore::open(backend)
            .await
            .context("failed to open tenant store")?;
        let menus = MenuService::new(
            store,
            config.default_language.clone(),
            config.site_url.clone(),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { menus, auth }),
        })
    }

    pub fn menus(&self) -> &MenuService {
        &self.inner.menus
    }

    pub fn auth(&self) -> &dyn AuthProvider {
        self.inner.auth.as_ref()
    }
}
