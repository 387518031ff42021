//! Favorites listing query construction.
//!
//! [`FavoritesQuery`] holds every parameter of `GET /produtos` and renders
//! them as query-string pairs. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use price_tracker_sdk::{FavoritesQuery, SortKey, SortOrder};
//! let pairs = FavoritesQuery::new()
//!     .category("electronics")
//!     .min_price(10.0)
//!     .sort(SortKey::Price, SortOrder::Asc)
//!     .page(2)
//!     .to_pairs();
//! ```

use std::fmt;
use std::str::FromStr;

use crate::config::FAVORITES_PAGE_SIZE;
use crate::error::PriceTrackerError;

// ---------------------------------------------------------------------------
// Sort vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAt,
    Price,
    Name,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::Price => "preco",
            SortKey::Name => "nome",
        }
    }
}

impl FromStr for SortKey {
    type Err = PriceTrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(SortKey::CreatedAt),
            "preco" => Ok(SortKey::Price),
            "nome" => Ok(SortKey::Name),
            other => Err(PriceTrackerError::InvalidArgument(format!(
                "Unknown sort key: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = PriceTrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(PriceTrackerError::InvalidArgument(format!(
                "Unknown sort order: {other}"
            ))),
        }
    }
}

/// Sort key and direction, written together as `"{key}_{order}"`
/// (e.g. `created_at_desc`, `preco_asc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOption {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::new(SortKey::CreatedAt, SortOrder::Desc),
        SortOption::new(SortKey::CreatedAt, SortOrder::Asc),
        SortOption::new(SortKey::Price, SortOrder::Asc),
        SortOption::new(SortKey::Price, SortOrder::Desc),
        SortOption::new(SortKey::Name, SortOrder::Asc),
        SortOption::new(SortKey::Name, SortOrder::Desc),
    ];

    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn label(self) -> &'static str {
        match (self.key, self.order) {
            (SortKey::CreatedAt, SortOrder::Desc) => "Newest",
            (SortKey::CreatedAt, SortOrder::Asc) => "Oldest",
            (SortKey::Price, SortOrder::Asc) => "Price: low to high",
            (SortKey::Price, SortOrder::Desc) => "Price: high to low",
            (SortKey::Name, SortOrder::Asc) => "Name: A-Z",
            (SortKey::Name, SortOrder::Desc) => "Name: Z-A",
        }
    }
}

impl FromStr for SortOption {
    type Err = PriceTrackerError;

    // The key itself may contain underscores, so split on the last one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, order) = s.rsplit_once('_').ok_or_else(|| {
            PriceTrackerError::InvalidArgument(format!("Invalid sort option: {s}"))
        })?;
        Ok(Self::new(key.parse()?, order.parse()?))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.key.as_str(), self.order.as_str())
    }
}

// ---------------------------------------------------------------------------
// FavoritesQuery
// ---------------------------------------------------------------------------

/// Parameters of one favorites listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesQuery {
    pub page: u32,
    pub limit: u32,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortOption,
}

impl Default for FavoritesQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: FAVORITES_PAGE_SIZE,
            category: None,
            min_price: None,
            max_price: None,
            sort: SortOption::default(),
        }
    }
}

impl FavoritesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&mut self, page: u32) -> &mut Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(&mut self, limit: u32) -> &mut Self {
        self.limit = limit;
        self
    }

    /// Filter by category. An empty string clears the filter.
    pub fn category(&mut self, category: &str) -> &mut Self {
        self.category = Some(category.to_string()).filter(|c| !c.is_empty());
        self
    }

    pub fn min_price(&mut self, price: f64) -> &mut Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(&mut self, price: f64) -> &mut Self {
        self.max_price = Some(price);
        self
    }

    pub fn sort(&mut self, key: SortKey, order: SortOrder) -> &mut Self {
        self.sort = SortOption::new(key, order);
        self
    }

    /// Render the query-string pairs in the order the backend documents them.
    ///
    /// Optional filters are only included when set.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sort_by", self.sort.key.as_str().to_string()),
            ("order", self.sort.order.as_str().to_string()),
        ];
        if let Some(category) = &self.category {
            pairs.push(("categoria", category.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("preco_min", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("preco_max", max.to_string()));
        }
        pairs
    }
}
