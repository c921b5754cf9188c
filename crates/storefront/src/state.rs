//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::Latency;
use crate::services::auth::AuthService;
use crate::services::catalog::{CatalogData, CatalogError, CatalogService};
use crate::services::chat::ChatService;
use crate::services::checkout::CheckoutService;
use crate::storage::DeviceStorage;
use crate::stores::{CartStore, SearchHistoryStore, SessionStore, ThemeStore, WishlistStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the mock backend services and the
/// persisted stores, all loaded once at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    latency: Latency,
    catalog: CatalogService,
    chat: ChatService,
    cart: CartStore,
    wishlist: WishlistStore,
    session: SessionStore,
    theme: ThemeStore,
    history: SearchHistoryStore,
}

impl AppState {
    /// Load state with file-backed device storage under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the catalog cannot be read or parsed.
    pub async fn load(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let storage = DeviceStorage::file(config.data_dir.clone());
        Self::load_with_storage(config, storage).await
    }

    /// Load state over the given storage backend.
    ///
    /// Uses the catalog at `config.catalog_path` when set, the embedded one
    /// otherwise. Every store is restored from `storage`.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the catalog cannot be read or parsed.
    pub async fn load_with_storage(
        config: &StorefrontConfig,
        storage: DeviceStorage,
    ) -> Result<Self, CatalogError> {
        let data = match &config.catalog_path {
            Some(path) => CatalogData::from_path(path).await?,
            None => CatalogData::embedded()?,
        };
        tracing::info!(
            categories = data.categories.len(),
            products = data.products.len(),
            "Catalog loaded"
        );

        let latency = Latency::new(config.simulate_latency);
        let (cart, wishlist, session, theme, history) = tokio::join!(
            CartStore::load(storage.clone()),
            WishlistStore::load(storage.clone()),
            SessionStore::load(storage.clone()),
            ThemeStore::load(storage.clone()),
            SearchHistoryStore::load(storage.clone()),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                catalog: CatalogService::new(data, latency),
                chat: ChatService::new(latency),
                latency,
                cart,
                wishlist,
                session,
                theme,
                history,
            }),
        })
    }

    #[must_use]
    pub fn latency(&self) -> Latency {
        self.inner.latency
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    #[must_use]
    pub fn chat(&self) -> &ChatService {
        &self.inner.chat
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeStore {
        &self.inner.theme
    }

    #[must_use]
    pub fn history(&self) -> &SearchHistoryStore {
        &self.inner.history
    }

    /// Authentication over the session store.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.session(), self.latency())
    }

    /// Checkout over the cart and catalog.
    #[must_use]
    pub fn checkout(&self) -> CheckoutService<'_> {
        CheckoutService::new(self.cart(), self.catalog(), self.latency())
    }
}
