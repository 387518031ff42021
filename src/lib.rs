//! Price tracker SDK for Rust.
//!
//! Provides a typed client for a price-tracking backend: search catalog
//! products, track them as favorites, read their price history, and manage
//! price alerts. On top of the raw operations sit the client-side rules that
//! keep views consistent with the backend: product identity reconciliation,
//! favorites query composition, and load sequencing.
//!
//! # Quick start
//!
//! ```no_run
//! use price_tracker_sdk::{PriceTrackerSdk, ProductKey, Resolution};
//!
//! let sdk = PriceTrackerSdk::builder()
//!     .base_url("http://localhost:8000/api")
//!     .build()
//!     .unwrap();
//!
//! // Browse the catalog
//! let products = sdk.external().search(Some("electronics")).unwrap();
//!
//! // Work out whether a catalog product is already tracked
//! match sdk.resolve(ProductKey::External(products[0].id)).unwrap() {
//!     Resolution::Tracked(tracked) => println!("tracked as {}", tracked.favorite.id),
//!     Resolution::Trackable(product) => println!("{} can be tracked", product.title),
//!     Resolution::NotFound => println!("gone"),
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod backend;
pub mod config;
pub mod connection;
pub mod error;
pub mod format;
pub mod list_query;
pub mod models;
pub mod notify;
pub mod queries;
pub mod reconcile;
pub mod route;
pub mod views;

#[cfg(feature = "async")]
pub use async_client::AsyncPriceTrackerSdk;
pub use backend::Backend;
pub use config::Settings;
pub use connection::Connection;
pub use error::{PriceTrackerError, Result};
pub use list_query::{FavoritesQuery, SortKey, SortOption, SortOrder};
pub use notify::{ConsoleNotifier, Level, LogNotifier, Notifier};
pub use reconcile::{FavoritedSet, ProductKey, ProductRef, Resolution};
pub use route::Route;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use models::{
    ExternalProduct, FavoriteProduct, FavoriteUpdate, FavoritesPage, PriceAlert,
    PriceHistoryPoint, Statistics,
};

// ---------------------------------------------------------------------------
// PriceTrackerSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PriceTrackerSdk`] instance.
///
/// Use [`PriceTrackerSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PriceTrackerSdkBuilder::build) to create the SDK.
pub struct PriceTrackerSdkBuilder {
    settings: Settings,
    timeout: Option<Duration>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl Default for PriceTrackerSdkBuilder {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            timeout: None,
            notifier: None,
        }
    }
}

impl PriceTrackerSdkBuilder {
    /// Start from loaded [`Settings`]. Later builder calls override them.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the backend base URL, including the `/api` prefix.
    ///
    /// Defaults to [`config::DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.settings.base_url = url.into();
        self
    }

    /// Set a request timeout. Without one the settings value, then the
    /// transport default, applies. Sub-second precision is kept.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Where failures and action outcomes are reported.
    ///
    /// Defaults to [`LogNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Result<PriceTrackerSdk> {
        if self.settings.base_url.trim().is_empty() {
            return Err(PriceTrackerError::InvalidArgument(
                "base URL must not be empty".to_string(),
            ));
        }
        let timeout = self.timeout.or_else(|| self.settings.timeout());
        if matches!(timeout, Some(t) if t.is_zero()) {
            return Err(PriceTrackerError::InvalidArgument(
                "timeout must be greater than zero".to_string(),
            ));
        }
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));
        let conn = Connection::new(&self.settings.base_url, timeout, notifier)?;
        Ok(PriceTrackerSdk { conn })
    }
}

// ---------------------------------------------------------------------------
// PriceTrackerSdk
// ---------------------------------------------------------------------------

/// The main entry point for the price tracker SDK.
///
/// Wraps a [`Connection`] and exposes per-resource query interfaces as
/// lightweight borrowing wrappers. Implements [`Backend`], so it can drive
/// the [`views`] directly.
#[derive(Debug)]
pub struct PriceTrackerSdk {
    conn: Connection,
}

impl PriceTrackerSdk {
    pub fn builder() -> PriceTrackerSdkBuilder {
        PriceTrackerSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the external catalog query interface.
    pub fn external(&self) -> queries::ExternalQuery<'_> {
        queries::ExternalQuery::new(&self.conn)
    }

    /// Access the favorites query interface (tracked products and history).
    pub fn favorites(&self) -> queries::FavoriteQuery<'_> {
        queries::FavoriteQuery::new(&self.conn)
    }

    pub fn alerts(&self) -> queries::AlertQuery<'_> {
        queries::AlertQuery::new(&self.conn)
    }

    pub fn statistics(&self) -> queries::StatisticsQuery<'_> {
        queries::StatisticsQuery::new(&self.conn)
    }

    // -- Reconciliation ----------------------------------------------------

    /// Resolve a detail route parameter. See [`reconcile::resolve`].
    pub fn resolve(&self, key: ProductKey) -> Result<Resolution> {
        reconcile::resolve(self, key)
    }

    /// External ids of every favorite.
    pub fn favorited_set(&self) -> Result<FavoritedSet> {
        FavoritedSet::load(self)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Backend for PriceTrackerSdk {
    fn search_products(&self, category: Option<&str>) -> Result<Vec<ExternalProduct>> {
        self.external().search(category)
    }

    fn external_product(&self, external_id: i64) -> Result<ExternalProduct> {
        self.external().get(external_id)
    }

    fn categories(&self) -> Result<Vec<String>> {
        self.external().categories()
    }

    fn list_favorites(&self, query: &FavoritesQuery) -> Result<FavoritesPage> {
        self.favorites().list(query)
    }

    fn add_favorite(&self, external_id: i64) -> Result<FavoriteProduct> {
        self.favorites().add(external_id)
    }

    fn remove_favorite(&self, id: i64) -> Result<()> {
        self.favorites().remove(id)
    }

    fn update_favorite(&self, id: i64, update: &FavoriteUpdate) -> Result<FavoriteProduct> {
        self.favorites().update(id, update)
    }

    fn favorite(&self, id: i64) -> Result<Option<FavoriteProduct>> {
        self.favorites().get(id)
    }

    fn favorite_by_external_id(&self, external_id: i64) -> Option<FavoriteProduct> {
        self.favorites().by_external_id(external_id)
    }

    fn price_history(&self, id: i64) -> Result<Vec<PriceHistoryPoint>> {
        self.favorites().history(id)
    }

    fn alerts(&self, id: i64) -> Result<Vec<PriceAlert>> {
        PriceTrackerSdk::alerts(self).list(id)
    }

    fn create_alert(&self, id: i64, target_price: f64) -> Result<PriceAlert> {
        PriceTrackerSdk::alerts(self).create(id, target_price)
    }

    fn delete_alert(&self, id: i64, alert_id: i64) -> Result<()> {
        PriceTrackerSdk::alerts(self).delete(id, alert_id)
    }

    fn statistics(&self) -> Result<Statistics> {
        PriceTrackerSdk::statistics(self).snapshot()
    }

    fn notifier(&self) -> &dyn Notifier {
        self.conn.notifier()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PriceTrackerSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PriceTrackerSdk(base_url={})", self.conn.base_url())
    }
}
