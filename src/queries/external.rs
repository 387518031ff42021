//! Upstream catalog queries (`/external/...`).

use crate::connection::Connection;
use crate::error::Result;
use crate::models::{ExternalProduct, FavoriteProduct};

/// Query interface for the external product catalog.
pub struct ExternalQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ExternalQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// List catalog products, optionally restricted to one category.
    ///
    /// An empty category is treated as no filter.
    pub fn search(&self, category: Option<&str>) -> Result<Vec<ExternalProduct>> {
        let query: Vec<(&str, String)> = category
            .filter(|c| !c.is_empty())
            .map(|c| vec![("category", c.to_string())])
            .unwrap_or_default();
        self.conn.get("/external/produtos", &query)
    }

    /// Fetch one catalog product. A missing product is a `NotFound` error.
    pub fn get(&self, external_id: i64) -> Result<ExternalProduct> {
        self.conn
            .get(&format!("/external/produtos/{external_id}"), &[])
    }

    pub fn categories(&self) -> Result<Vec<String>> {
        self.conn.get("/external/categorias", &[])
    }

    /// Ask the backend to start tracking a catalog product directly.
    pub fn track(&self, external_id: i64) -> Result<FavoriteProduct> {
        self.conn
            .post::<(), _>(&format!("/external/produtos/{external_id}/track"), None)
    }
}
