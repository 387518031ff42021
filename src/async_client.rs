//! Async wrapper around [`PriceTrackerSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use price_tracker_sdk::{AsyncPriceTrackerSdk, FavoritesQuery};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncPriceTrackerSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let products = sdk.run(|s| s.external().search(None)).await.unwrap();
//!
//!     let page = sdk.list_favorites(FavoritesQuery::new()).await.unwrap();
//!
//!     sdk.close().await.unwrap();
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::error::{PriceTrackerError, Result};
use crate::list_query::FavoritesQuery;
use crate::models::{FavoriteProduct, FavoritesPage, Statistics};
use crate::notify::Notifier;
use crate::reconcile::{ProductKey, Resolution};
use crate::PriceTrackerSdk;

fn join_error(e: tokio::task::JoinError) -> PriceTrackerError {
    PriceTrackerError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncPriceTrackerSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPriceTrackerSdk`] instance.
#[derive(Default)]
pub struct AsyncPriceTrackerSdkBuilder {
    settings: Option<Settings>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AsyncPriceTrackerSdkBuilder {
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the async SDK.
    ///
    /// The HTTP client is constructed on the blocking thread pool since the
    /// blocking client must not be created inside an async context.
    pub async fn build(self) -> Result<AsyncPriceTrackerSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = PriceTrackerSdk::builder();
            if let Some(settings) = self.settings {
                builder = builder.settings(settings);
            }
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(notifier) = self.notifier {
                builder = builder.notifier(notifier);
            }
            Ok(AsyncPriceTrackerSdk {
                inner: Arc::new(builder.build()?),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncPriceTrackerSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`PriceTrackerSdk`].
///
/// The underlying SDK is shared across blocking tasks; it holds no interior
/// mutability, so no lock is needed. Call [`close()`](Self::close) before the
/// runtime shuts down: the blocking HTTP client must not be dropped on an
/// async worker thread.
pub struct AsyncPriceTrackerSdk {
    inner: Arc<PriceTrackerSdk>,
}

impl AsyncPriceTrackerSdk {
    pub fn builder() -> AsyncPriceTrackerSdkBuilder {
        AsyncPriceTrackerSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use price_tracker_sdk::AsyncPriceTrackerSdk;
    /// # async fn example() -> price_tracker_sdk::Result<()> {
    /// # let sdk = AsyncPriceTrackerSdk::builder().build().await?;
    /// let categories = sdk.run(|s| s.external().categories()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PriceTrackerSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(join_error)?
    }

    pub async fn resolve(&self, key: ProductKey) -> Result<Resolution> {
        self.run(move |s| s.resolve(key)).await
    }

    pub async fn list_favorites(&self, query: FavoritesQuery) -> Result<FavoritesPage> {
        self.run(move |s| s.favorites().list(&query)).await
    }

    pub async fn favorite(&self, id: i64) -> Result<Option<FavoriteProduct>> {
        self.run(move |s| s.favorites().get(id)).await
    }

    pub async fn statistics(&self) -> Result<Statistics> {
        self.run(|s| s.statistics().snapshot()).await
    }

    /// Release the SDK on the blocking thread pool.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(join_error)
    }
}
