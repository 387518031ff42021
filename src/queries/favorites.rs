//! Tracked product queries (`/produtos`).

use serde::Serialize;
use tracing::warn;

use crate::config::FAVORITE_SCAN_LIMIT;
use crate::connection::Connection;
use crate::error::{PriceTrackerError, Result};
use crate::list_query::FavoritesQuery;
use crate::models::{FavoriteProduct, FavoriteUpdate, FavoritesPage, PriceHistoryPoint};

#[derive(Serialize)]
struct AddFavoriteBody {
    external_id: i64,
}

/// Query interface for favorites and their price history.
pub struct FavoriteQuery<'a> {
    conn: &'a Connection,
}

impl<'a> FavoriteQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self, query: &FavoritesQuery) -> Result<FavoritesPage> {
        self.conn.get("/produtos", &query.to_pairs())
    }

    /// Start tracking a catalog product. Returns the new favorite with its
    /// backend-assigned id.
    pub fn add(&self, external_id: i64) -> Result<FavoriteProduct> {
        self.conn
            .post("/produtos", Some(&AddFavoriteBody { external_id }))
    }

    pub fn remove(&self, id: i64) -> Result<()> {
        self.conn.delete(&format!("/produtos/{id}"))
    }

    pub fn update(&self, id: i64, update: &FavoriteUpdate) -> Result<FavoriteProduct> {
        self.conn.put(&format!("/produtos/{id}"), update)
    }

    /// Fetch a favorite by internal id. Absence is `Ok(None)`, not an error.
    pub fn get(&self, id: i64) -> Result<Option<FavoriteProduct>> {
        match self.conn.get(&format!("/produtos/{id}"), &[]) {
            Ok(product) => Ok(Some(product)),
            Err(PriceTrackerError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Find the favorite tracked from `external_id`.
    ///
    /// Scans only the first [`FAVORITE_SCAN_LIMIT`] favorites, so a store with
    /// more can miss a match. Any failure also yields `None`, which makes
    /// "not a favorite" indistinguishable from "could not check".
    pub fn by_external_id(&self, external_id: i64) -> Option<FavoriteProduct> {
        scan_for_external_id(|q| self.list(q), external_id)
    }

    pub fn is_favorite(&self, external_id: i64) -> bool {
        self.by_external_id(external_id).is_some()
    }

    pub fn history(&self, id: i64) -> Result<Vec<PriceHistoryPoint>> {
        self.conn.get(&format!("/produtos/{id}/historico"), &[])
    }
}

/// One listing call of [`FAVORITE_SCAN_LIMIT`] items, scanned for `external_id`.
pub(crate) fn scan_for_external_id<F>(list: F, external_id: i64) -> Option<FavoriteProduct>
where
    F: FnOnce(&FavoritesQuery) -> Result<FavoritesPage>,
{
    let mut query = FavoritesQuery::new();
    query.limit(FAVORITE_SCAN_LIMIT);
    match list(&query) {
        Ok(page) => page
            .items
            .into_iter()
            .find(|f| f.external_id == Some(external_id)),
        Err(e) => {
            warn!(external_id, error = %e, "favorite lookup by external id failed");
            None
        }
    }
}
