//! Navigable routes and their parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::PriceTrackerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` - search and browse the catalog.
    Home,
    /// `/favoritos` - tracked products with filters and pagination.
    Favorites,
    /// `/produto/{id}` - tracked product by internal id.
    Product(i64),
    /// `/produto/external/{external_id}` - catalog product not yet tracked.
    ExternalProduct(i64),
    /// `/dashboard` - aggregate statistics.
    Dashboard,
    /// Anything else.
    NotFound(String),
}

impl Route {
    /// Parse a path. Unknown paths and malformed ids map to [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["favoritos"] => Route::Favorites,
            ["dashboard"] => Route::Dashboard,
            ["produto", "external", id] => id
                .parse()
                .map(Route::ExternalProduct)
                .unwrap_or_else(|_| Route::NotFound(path.to_string())),
            ["produto", id] => id
                .parse()
                .map(Route::Product)
                .unwrap_or_else(|_| Route::NotFound(path.to_string())),
            _ => Route::NotFound(path.to_string()),
        }
    }
}

impl FromStr for Route {
    type Err = PriceTrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Route::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Favorites => write!(f, "/favoritos"),
            Route::Product(id) => write!(f, "/produto/{id}"),
            Route::ExternalProduct(id) => write!(f, "/produto/external/{id}"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::NotFound(path) => write!(f, "{path}"),
        }
    }
}
