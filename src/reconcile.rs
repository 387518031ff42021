//! Product identity reconciliation.
//!
//! A product reaches the client either as a catalog entry (external id only)
//! or as a tracked favorite (internal id plus the external id it came from).
//! [`ProductRef`] tags which one a value is, once, where it enters the client.
//! [`resolve`] turns a route parameter into one of three outcomes: tracked,
//! trackable, or not found.

use std::collections::HashSet;
use std::thread::{self, ScopedJoinHandle};

use tracing::debug;

use crate::backend::Backend;
use crate::config::FAVORITED_SET_PAGE_SIZE;
use crate::error::Result;
use crate::format::Trend;
use crate::list_query::FavoritesQuery;
use crate::models::{
    current_alert_price, sort_chronologically, ExternalProduct, FavoriteProduct, PriceAlert,
    PriceHistoryPoint,
};
use crate::route::Route;

// ---------------------------------------------------------------------------
// ProductKey
// ---------------------------------------------------------------------------

/// The product a detail route points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKey {
    Internal(i64),
    External(i64),
}

impl ProductKey {
    pub fn from_route(route: &Route) -> Option<Self> {
        match route {
            Route::Product(id) => Some(ProductKey::Internal(*id)),
            Route::ExternalProduct(id) => Some(ProductKey::External(*id)),
            _ => None,
        }
    }

    pub fn route(self) -> Route {
        match self {
            ProductKey::Internal(id) => Route::Product(id),
            ProductKey::External(id) => Route::ExternalProduct(id),
        }
    }
}

// ---------------------------------------------------------------------------
// ProductRef
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ProductRef {
    Tracked(FavoriteProduct),
    Untracked(ExternalProduct),
}

/// What a product card or detail header may offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductActions {
    pub can_add: bool,
    pub already_favorite: bool,
    pub view_details: Route,
}

impl ProductRef {
    /// Id the list renders this product under.
    pub fn key(&self) -> i64 {
        match self {
            ProductRef::Tracked(f) => f.id,
            ProductRef::Untracked(p) => p.id,
        }
    }

    pub fn external_id(&self) -> Option<i64> {
        match self {
            ProductRef::Tracked(f) => f.external_id,
            ProductRef::Untracked(p) => Some(p.id),
        }
    }

    /// Id to send to add-favorite. Favorites without an external id fall
    /// back to their own id.
    pub fn tracking_id(&self) -> i64 {
        match self {
            ProductRef::Tracked(f) => f.external_id.unwrap_or(f.id),
            ProductRef::Untracked(p) => p.id,
        }
    }

    pub fn details_route(&self) -> Route {
        match self {
            ProductRef::Tracked(f) => Route::Product(f.id),
            ProductRef::Untracked(p) => Route::ExternalProduct(p.id),
        }
    }

    pub fn is_tracked(&self) -> bool {
        matches!(self, ProductRef::Tracked(_))
    }

    /// Actions given whether the caller already knows the product is favorited.
    pub fn actions(&self, favorited: bool) -> ProductActions {
        let already_favorite = favorited || self.is_tracked();
        ProductActions {
            can_add: !already_favorite,
            already_favorite,
            view_details: self.details_route(),
        }
    }

    pub fn details(&self) -> ProductDetails {
        let merged = match self {
            ProductRef::Tracked(f) => ProductDetails::merge(None, Some(f)),
            ProductRef::Untracked(p) => ProductDetails::merge(Some(p), None),
        };
        merged.unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// ProductDetails
// ---------------------------------------------------------------------------

/// Display fields drawn from both projections of a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDetails {
    pub id: Option<i64>,
    pub external_id: Option<i64>,
    pub name: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub original_price: Option<f64>,
    pub current_price: Option<f64>,
    pub variation: Option<f64>,
}

impl ProductDetails {
    /// Merge the catalog and favorite projections. Favorite fields win; the
    /// catalog fills whatever the favorite lacks. `None` when both are absent.
    pub fn merge(
        external: Option<&ExternalProduct>,
        favorite: Option<&FavoriteProduct>,
    ) -> Option<Self> {
        if external.is_none() && favorite.is_none() {
            return None;
        }
        let ext_category = external
            .map(|e| e.category.clone())
            .filter(|c| !c.is_empty());

        Some(Self {
            id: favorite.map(|f| f.id),
            external_id: favorite
                .and_then(|f| f.external_id)
                .or(external.map(|e| e.id)),
            name: favorite
                .map(|f| f.name.clone())
                .or_else(|| external.map(|e| e.title.clone()))
                .unwrap_or_default(),
            category: favorite.and_then(|f| f.category.clone()).or(ext_category),
            image_url: favorite
                .and_then(|f| f.image_url.clone())
                .or_else(|| external.and_then(|e| e.image.clone())),
            description: external.and_then(|e| e.description.clone()),
            original_price: favorite
                .and_then(|f| f.original_price)
                .or(external.map(|e| e.price)),
            current_price: favorite.and_then(|f| f.current_price),
            variation: favorite.and_then(|f| f.variation),
        })
    }

    pub fn display_price(&self) -> Option<f64> {
        self.current_price.or(self.original_price)
    }

    pub fn trend(&self) -> Trend {
        Trend::from_variation(self.variation)
    }

    pub fn is_tracked(&self) -> bool {
        self.id.is_some()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// A favorite with everything its detail view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedProduct {
    pub favorite: FavoriteProduct,
    pub external: Option<ExternalProduct>,
    /// Oldest first.
    pub history: Vec<PriceHistoryPoint>,
    pub alerts: Vec<PriceAlert>,
}

impl TrackedProduct {
    pub fn new(
        favorite: FavoriteProduct,
        external: Option<ExternalProduct>,
        mut history: Vec<PriceHistoryPoint>,
        alerts: Vec<PriceAlert>,
    ) -> Self {
        sort_chronologically(&mut history);
        Self {
            favorite,
            external,
            history,
            alerts,
        }
    }

    pub fn details(&self) -> ProductDetails {
        ProductDetails::merge(self.external.as_ref(), Some(&self.favorite)).unwrap_or_default()
    }

    pub fn alert_price(&self) -> Option<f64> {
        current_alert_price(&self.alerts)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Tracked(TrackedProduct),
    Trackable(ExternalProduct),
    NotFound,
}

impl Resolution {
    pub fn product_ref(&self) -> Option<ProductRef> {
        match self {
            Resolution::Tracked(t) => Some(ProductRef::Tracked(t.favorite.clone())),
            Resolution::Trackable(p) => Some(ProductRef::Untracked(p.clone())),
            Resolution::NotFound => None,
        }
    }

    pub fn details(&self) -> Option<ProductDetails> {
        match self {
            Resolution::Tracked(t) => Some(t.details()),
            Resolution::Trackable(p) => ProductDetails::merge(Some(p), None),
            Resolution::NotFound => None,
        }
    }
}

/// Resolve a route parameter to a tracked, trackable or missing product.
///
/// Independent requests run concurrently. If any request a tracked product
/// needs fails, the whole resolution fails. Absence is never an error.
pub fn resolve<B: Backend + ?Sized>(backend: &B, key: ProductKey) -> Result<Resolution> {
    match key {
        ProductKey::Internal(id) => {
            let (favorite, history, alerts) = thread::scope(|s| {
                let history = s.spawn(|| backend.price_history(id));
                let alerts = s.spawn(|| backend.alerts(id));
                let favorite = backend.favorite(id);
                (favorite, join(history), join(alerts))
            });
            match favorite? {
                Some(favorite) => Ok(Resolution::Tracked(TrackedProduct::new(
                    favorite, None, history?, alerts?,
                ))),
                None => {
                    debug!(id, "no favorite with this id");
                    Ok(Resolution::NotFound)
                }
            }
        }
        ProductKey::External(external_id) => {
            let (product, probed) = thread::scope(|s| {
                let probe = s.spawn(|| backend.favorite_by_external_id(external_id));
                let product = backend.external_product(external_id);
                (product, join(probe))
            });

            if let Some(favorite) = probed {
                debug!(external_id, id = favorite.id, "external product is already tracked");
                let (history, alerts) = load_tracking(backend, favorite.id)?;
                return Ok(Resolution::Tracked(TrackedProduct::new(
                    favorite,
                    product.ok(),
                    history,
                    alerts,
                )));
            }

            match product {
                Ok(product) => Ok(Resolution::Trackable(product)),
                Err(e) if e.is_expected_absence() => Ok(Resolution::NotFound),
                Err(e) => Err(e),
            }
        }
    }
}

fn load_tracking<B: Backend + ?Sized>(
    backend: &B,
    id: i64,
) -> Result<(Vec<PriceHistoryPoint>, Vec<PriceAlert>)> {
    let (history, alerts) = thread::scope(|s| {
        let alerts = s.spawn(|| backend.alerts(id));
        (backend.price_history(id), join(alerts))
    });
    Ok((history?, alerts?))
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

/// Start tracking `external_id` and return the route of the new favorite.
///
/// The route uses the id the backend assigned, which is unrelated to the
/// external id.
pub fn add_to_favorites<B: Backend + ?Sized>(backend: &B, external_id: i64) -> Result<Route> {
    let created = backend.add_favorite(external_id)?;
    debug!(external_id, id = created.id, "favorite created");
    Ok(Route::Product(created.id))
}

// ---------------------------------------------------------------------------
// FavoritedSet
// ---------------------------------------------------------------------------

/// External ids of every favorite, gathered by walking all listing pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritedSet {
    ids: HashSet<i64>,
}

impl FavoritedSet {
    pub fn load<B: Backend + ?Sized>(backend: &B) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut query = FavoritesQuery::new();
        query.limit(FAVORITED_SET_PAGE_SIZE);
        let mut page = 1;

        loop {
            query.page(page);
            let response = backend.list_favorites(&query)?;
            let fetched = response.items.len();
            ids.extend(response.items.iter().filter_map(|f| f.external_id));
            if fetched == 0 || page >= response.pages {
                break;
            }
            page += 1;
        }

        debug!(count = ids.len(), pages = page, "favorited set loaded");
        Ok(Self { ids })
    }

    pub fn contains(&self, external_id: i64) -> bool {
        self.ids.contains(&external_id)
    }

    pub fn insert(&mut self, external_id: i64) {
        self.ids.insert(external_id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
