//! Shared test fixtures for the price tracker integration tests.
//!
//! Provides an in-memory [`FakeBackend`] for view and reconciliation tests, a
//! [`RecordingNotifier`] that captures notifications, and [`serve`], which
//! runs an axum router on an ephemeral port for connection tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{mpsc, Mutex};

use chrono::NaiveDateTime;
use price_tracker_sdk::models::timestamp;
use price_tracker_sdk::models::{
    ExternalProduct, FavoriteProduct, FavoriteUpdate, FavoritesPage, PriceAlert,
    PriceHistoryPoint, Statistics,
};
use price_tracker_sdk::{Backend, FavoritesQuery, Level, Notifier, PriceTrackerError, Result};

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingNotifier {
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.with_level(Level::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.with_level(Level::Success)
    }

    fn with_level(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: Level, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

pub fn ts(raw: &str) -> NaiveDateTime {
    timestamp::parse(raw).unwrap()
}

pub fn external(id: i64, title: &str, price: f64, category: &str) -> ExternalProduct {
    ExternalProduct {
        id,
        title: title.to_string(),
        price,
        category: category.to_string(),
        image: Some(format!("https://img.example/{id}.png")),
        description: Some(format!("{title} description")),
    }
}

pub fn favorite(id: i64, external_id: i64, name: &str, price: f64) -> FavoriteProduct {
    FavoriteProduct {
        id,
        external_id: Some(external_id),
        name: name.to_string(),
        category: Some("electronics".to_string()),
        image_url: None,
        original_price: Some(price),
        current_price: Some(price),
        variation: Some(0.0),
        created_at: None,
    }
}

pub fn point(price: f64, at: &str) -> PriceHistoryPoint {
    PriceHistoryPoint {
        id: None,
        price,
        recorded_at: ts(at),
    }
}

pub fn alert(id: i64, target_price: f64, active: bool) -> PriceAlert {
    PriceAlert {
        id,
        product_id: None,
        target_price,
        active,
        notified: false,
        created_at: None,
    }
}

// ---------------------------------------------------------------------------
// FakeBackend
// ---------------------------------------------------------------------------

/// In-memory backend. Every call is recorded as `"operation"` or
/// `"operation:id"`; operations named in `failing` answer with a 500.
#[derive(Default)]
pub struct FakeBackend {
    pub catalog: Mutex<Vec<ExternalProduct>>,
    pub favorites: Mutex<Vec<FavoriteProduct>>,
    pub history: Mutex<HashMap<i64, Vec<PriceHistoryPoint>>>,
    pub alerts: Mutex<HashMap<i64, Vec<PriceAlert>>>,
    pub statistics: Mutex<Option<Statistics>>,
    pub failing: Mutex<HashSet<&'static str>>,
    pub calls: Mutex<Vec<String>>,
    pub queries: Mutex<Vec<FavoritesQuery>>,
    pub notifier: RecordingNotifier,
    next_id: AtomicI64,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.next_id.store(1, Ordering::SeqCst);
        backend
    }

    pub fn with_catalog(self, products: Vec<ExternalProduct>) -> Self {
        *self.catalog.lock().unwrap() = products;
        self
    }

    pub fn with_favorites(self, favorites: Vec<FavoriteProduct>) -> Self {
        let max_id = favorites.iter().map(|f| f.id).max().unwrap_or(0);
        *self.favorites.lock().unwrap() = favorites;
        self.next_id.store(max_id + 1, Ordering::SeqCst);
        self
    }

    pub fn with_history(self, id: i64, points: Vec<PriceHistoryPoint>) -> Self {
        self.history.lock().unwrap().insert(id, points);
        self
    }

    pub fn with_alerts(self, id: i64, alerts: Vec<PriceAlert>) -> Self {
        self.alerts.lock().unwrap().insert(id, alerts);
        self
    }

    pub fn with_statistics(self, stats: Statistics) -> Self {
        *self.statistics.lock().unwrap() = Some(stats);
        self
    }

    /// Id the next created favorite receives.
    pub fn next_favorite_id(self, id: i64) -> Self {
        self.next_id.store(id, Ordering::SeqCst);
        self
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.as_str() == operation || c.starts_with(&format!("{operation}:")))
            .count()
    }

    pub fn queries(&self) -> Vec<FavoritesQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<FavoritesQuery> {
        self.queries().last().cloned()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
        self.queries.lock().unwrap().clear();
    }

    fn record(&self, operation: &'static str, id: Option<i64>) -> Result<()> {
        let call = match id {
            Some(id) => format!("{operation}:{id}"),
            None => operation.to_string(),
        };
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(PriceTrackerError::Api {
                status: 500,
                message: format!("{operation} failed"),
            });
        }
        Ok(())
    }
}

fn not_found(what: &str) -> PriceTrackerError {
    PriceTrackerError::NotFound(format!("{what} not found"))
}

impl Backend for FakeBackend {
    fn search_products(&self, category: Option<&str>) -> Result<Vec<ExternalProduct>> {
        self.record("search_products", None)?;
        Ok(self
            .catalog
            .lock()
            .unwrap()
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .cloned()
            .collect())
    }

    fn external_product(&self, external_id: i64) -> Result<ExternalProduct> {
        self.record("external_product", Some(external_id))?;
        self.catalog
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == external_id)
            .cloned()
            .ok_or_else(|| not_found("Product"))
    }

    fn categories(&self) -> Result<Vec<String>> {
        self.record("categories", None)?;
        let mut categories: Vec<String> = self
            .catalog
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    fn list_favorites(&self, query: &FavoritesQuery) -> Result<FavoritesPage> {
        self.queries.lock().unwrap().push(query.clone());
        self.record("list_favorites", None)?;

        let matching: Vec<FavoriteProduct> = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|f| {
                query
                    .category
                    .as_ref()
                    .map_or(true, |c| f.category.as_ref() == Some(c))
            })
            .filter(|f| {
                let price = f.display_price().unwrap_or(0.0);
                query.min_price.map_or(true, |min| price >= min)
                    && query.max_price.map_or(true, |max| price <= max)
            })
            .cloned()
            .collect();

        let limit = query.limit.max(1) as usize;
        let total = matching.len();
        let pages = total.div_ceil(limit) as u32;
        let items = matching
            .into_iter()
            .skip((query.page as usize - 1) * limit)
            .take(limit)
            .collect();

        Ok(FavoritesPage {
            items,
            total: total as u64,
            pages,
        })
    }

    fn add_favorite(&self, external_id: i64) -> Result<FavoriteProduct> {
        self.record("add_favorite", Some(external_id))?;
        if self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .any(|f| f.external_id == Some(external_id))
        {
            return Err(PriceTrackerError::Api {
                status: 400,
                message: "Product already tracked".to_string(),
            });
        }
        let product = self
            .catalog
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == external_id)
            .cloned()
            .ok_or_else(|| not_found("Product"))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = favorite(id, external_id, &product.title, product.price);
        created.category = Some(product.category);
        self.favorites.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn remove_favorite(&self, id: i64) -> Result<()> {
        self.record("remove_favorite", Some(id))?;
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|f| f.id != id);
        if favorites.len() == before {
            return Err(not_found("Favorite"));
        }
        Ok(())
    }

    fn update_favorite(&self, id: i64, update: &FavoriteUpdate) -> Result<FavoriteProduct> {
        self.record("update_favorite", Some(id))?;
        let mut favorites = self.favorites.lock().unwrap();
        let favorite = favorites
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| not_found("Favorite"))?;
        if let Some(name) = &update.name {
            favorite.name = name.clone();
        }
        if let Some(category) = &update.category {
            favorite.category = Some(category.clone());
        }
        if let Some(price) = update.current_price {
            favorite.current_price = Some(price);
        }
        Ok(favorite.clone())
    }

    fn favorite(&self, id: i64) -> Result<Option<FavoriteProduct>> {
        self.record("favorite", Some(id))?;
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned())
    }

    fn price_history(&self, id: i64) -> Result<Vec<PriceHistoryPoint>> {
        self.record("price_history", Some(id))?;
        Ok(self
            .history
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    fn alerts(&self, id: i64) -> Result<Vec<PriceAlert>> {
        self.record("alerts", Some(id))?;
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    fn create_alert(&self, id: i64, target_price: f64) -> Result<PriceAlert> {
        self.record("create_alert", Some(id))?;
        let mut alerts = self.alerts.lock().unwrap();
        let list = alerts.entry(id).or_default();
        let alert_id = list.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let mut created = alert(alert_id, target_price, true);
        created.product_id = Some(id);
        list.push(created.clone());
        Ok(created)
    }

    fn delete_alert(&self, id: i64, alert_id: i64) -> Result<()> {
        self.record("delete_alert", Some(id))?;
        let mut alerts = self.alerts.lock().unwrap();
        let list = alerts.entry(id).or_default();
        let before = list.len();
        list.retain(|a| a.id != alert_id);
        if list.len() == before {
            return Err(not_found("Alert"));
        }
        Ok(())
    }

    fn statistics(&self) -> Result<Statistics> {
        self.record("statistics", None)?;
        self.statistics
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| not_found("Statistics"))
    }

    fn notifier(&self) -> &dyn Notifier {
        &self.notifier
    }
}

// ---------------------------------------------------------------------------
// HTTP fake
// ---------------------------------------------------------------------------

/// Serve `app` on 127.0.0.1 with an ephemeral port from a background thread.
///
/// Returns the base URL including the `/api` prefix; routes in `app` must
/// carry the prefix too.
pub fn serve(app: axum::Router) -> String {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    format!("http://{addr}/api")
}
