//! Per-page view state.
//!
//! Each view owns the state of one page: it loads on open, re-loads when its
//! inputs change, and turns failures into notifications instead of returning
//! them. Loads are stamped with a [`LoadTicket`]; a result is applied only if
//! no newer load was issued in the meantime.

pub mod dashboard;
pub mod detail;
pub mod favorites;
pub mod home;

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

pub use dashboard::{DashboardView, StatCard};
pub use detail::{parse_target_price, PriceChart, ProductDetailView};
pub use favorites::{parse_price_filter, FavoritesComposer, FavoritesView, Pagination};
pub use home::HomeView;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Empty,
    Failed(String),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> LoadState<Vec<T>> {
    /// `Empty` for an empty list, `Ready` otherwise.
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Ready(items)
        }
    }
}

/// Identifies one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Monotonic load counter for one view.
#[derive(Debug, Default)]
pub struct LoadSequence {
    latest: AtomicU64,
}

impl LoadSequence {
    pub fn issue(&self) -> LoadTicket {
        LoadTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Whether a finished load may be applied. Logs the ones that may not.
    pub(crate) fn accept(&self, ticket: LoadTicket, view: &str) -> bool {
        let current = self.is_current(ticket);
        if !current {
            debug!(view, ?ticket, "discarding stale load result");
        }
        current
    }
}
