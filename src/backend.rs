//! The backend operations views depend on.
//!
//! [`PriceTrackerSdk`](crate::PriceTrackerSdk) implements [`Backend`] over
//! HTTP. Views take any implementation, which keeps them independent of the
//! transport.

use crate::error::Result;
use crate::list_query::FavoritesQuery;
use crate::models::{
    ExternalProduct, FavoriteProduct, FavoriteUpdate, FavoritesPage, PriceAlert,
    PriceHistoryPoint, Statistics,
};
use crate::notify::Notifier;
use crate::queries::favorites::scan_for_external_id;

pub trait Backend: Sync {
    fn search_products(&self, category: Option<&str>) -> Result<Vec<ExternalProduct>>;

    fn external_product(&self, external_id: i64) -> Result<ExternalProduct>;

    fn categories(&self) -> Result<Vec<String>>;

    fn list_favorites(&self, query: &FavoritesQuery) -> Result<FavoritesPage>;

    fn add_favorite(&self, external_id: i64) -> Result<FavoriteProduct>;

    fn remove_favorite(&self, id: i64) -> Result<()>;

    fn update_favorite(&self, id: i64, update: &FavoriteUpdate) -> Result<FavoriteProduct>;

    /// `Ok(None)` when the backend reports the favorite as absent.
    fn favorite(&self, id: i64) -> Result<Option<FavoriteProduct>>;

    /// Bounded probe: first page of favorites only, `None` on any failure.
    fn favorite_by_external_id(&self, external_id: i64) -> Option<FavoriteProduct> {
        scan_for_external_id(|q| self.list_favorites(q), external_id)
    }

    fn price_history(&self, id: i64) -> Result<Vec<PriceHistoryPoint>>;

    fn alerts(&self, id: i64) -> Result<Vec<PriceAlert>>;

    fn create_alert(&self, id: i64, target_price: f64) -> Result<PriceAlert>;

    fn delete_alert(&self, id: i64, alert_id: i64) -> Result<()>;

    fn statistics(&self) -> Result<Statistics>;

    /// Where views report the outcome of user actions.
    fn notifier(&self) -> &dyn Notifier;
}
