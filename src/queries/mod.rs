//! Query interfaces for the price-tracking backend.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes one method per
//! backend operation, returning typed models.

pub mod alerts;
pub mod external;
pub mod favorites;
pub mod statistics;

pub use alerts::AlertQuery;
pub use external::ExternalQuery;
pub use favorites::FavoriteQuery;
pub use statistics::StatisticsQuery;
