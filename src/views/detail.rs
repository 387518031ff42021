//! Product detail page: a tracked favorite with history and alerts, or a
//! catalog product that can still be tracked.

use tracing::warn;

use crate::backend::Backend;
use crate::error::{PriceTrackerError, Result};
use crate::format::{format_date, Trend};
use crate::models::{PriceAlert, PriceHistoryPoint};
use crate::reconcile::{self, ProductKey, Resolution};
use crate::route::Route;

use super::{LoadSequence, LoadState, LoadTicket};

pub const TARGET_PRICE_INVALID: &str = "Target price must be greater than zero";
pub const PRODUCT_NOT_TRACKED: &str = "Product is not tracked";

/// Validate alert form input before anything is sent.
pub fn parse_target_price(input: &str) -> Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(PriceTrackerError::Validation(TARGET_PRICE_INVALID.to_string())),
    }
}

// ---------------------------------------------------------------------------
// PriceChart
// ---------------------------------------------------------------------------

/// Chart series for a price history, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChart {
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
    /// Rising when the last price is at or above the first.
    pub trend: Trend,
    /// Horizontal target line, from the first active alert.
    pub alert_price: Option<f64>,
}

impl PriceChart {
    /// `None` when there is no history to draw.
    pub fn from_history(history: &[PriceHistoryPoint], alert_price: Option<f64>) -> Option<Self> {
        let mut points = history.to_vec();
        points.sort_by_key(|p| p.recorded_at);
        let first = points.first()?.price;
        let last = points.last()?.price;
        Some(Self {
            labels: points.iter().map(|p| format_date(&p.recorded_at)).collect(),
            prices: points.iter().map(|p| p.price).collect(),
            trend: Trend::between(first, last),
            alert_price,
        })
    }
}

// ---------------------------------------------------------------------------
// ProductDetailView
// ---------------------------------------------------------------------------

pub struct ProductDetailView<'a, B: Backend + ?Sized> {
    backend: &'a B,
    key: ProductKey,
    state: LoadState<Resolution>,
    alert_error: Option<String>,
    sequence: LoadSequence,
}

impl<'a, B: Backend + ?Sized> ProductDetailView<'a, B> {
    pub fn open(backend: &'a B, key: ProductKey) -> Self {
        let mut view = Self {
            backend,
            key,
            state: LoadState::Loading,
            alert_error: None,
            sequence: LoadSequence::default(),
        };
        view.reload();
        view
    }

    pub fn key(&self) -> ProductKey {
        self.key
    }

    pub fn state(&self) -> &LoadState<Resolution> {
        &self.state
    }

    /// Local message from the last alert form submission, if it failed.
    pub fn alert_error(&self) -> Option<&str> {
        self.alert_error.as_deref()
    }

    pub fn chart(&self) -> Option<PriceChart> {
        match self.state.ready()? {
            Resolution::Tracked(t) => PriceChart::from_history(&t.history, t.alert_price()),
            _ => None,
        }
    }

    pub fn alerts(&self) -> &[PriceAlert] {
        match self.state.ready() {
            Some(Resolution::Tracked(t)) => t.alerts.as_slice(),
            _ => &[],
        }
    }

    fn tracked_id(&self) -> Option<i64> {
        match self.state.ready()? {
            Resolution::Tracked(t) => Some(t.favorite.id),
            _ => None,
        }
    }

    // -- Intents -----------------------------------------------------------

    /// Track the catalog product shown. Returns the route of the new
    /// favorite; the caller navigates there.
    pub fn add_to_favorites(&mut self) -> Option<Route> {
        let external_id = match self.state.ready()? {
            Resolution::Trackable(product) => product.id,
            _ => return None,
        };
        match reconcile::add_to_favorites(self.backend, external_id) {
            Ok(route) => {
                self.backend
                    .notifier()
                    .success("Product added to favorites");
                Some(route)
            }
            Err(e) => {
                warn!(external_id, error = %e, "add favorite failed");
                self.backend.notifier().error("Could not add to favorites");
                None
            }
        }
    }

    /// Create an alert from form input. Invalid input is rejected locally
    /// without a request.
    pub fn create_alert(&mut self, input: &str) -> Result<PriceAlert> {
        self.alert_error = None;
        let target_price = match parse_target_price(input) {
            Ok(price) => price,
            Err(e) => {
                self.alert_error = Some(TARGET_PRICE_INVALID.to_string());
                return Err(e);
            }
        };
        let Some(id) = self.tracked_id() else {
            self.alert_error = Some(PRODUCT_NOT_TRACKED.to_string());
            return Err(PriceTrackerError::InvalidArgument(
                PRODUCT_NOT_TRACKED.to_string(),
            ));
        };

        match self.backend.create_alert(id, target_price) {
            Ok(alert) => {
                self.backend.notifier().success("Alert created");
                self.reload();
                Ok(alert)
            }
            Err(e) => {
                warn!(id, error = %e, "create alert failed");
                self.backend.notifier().error("Could not create alert");
                self.alert_error = Some("Could not create alert".to_string());
                Err(e)
            }
        }
    }

    pub fn delete_alert(&mut self, alert_id: i64) -> bool {
        let Some(id) = self.tracked_id() else {
            return false;
        };
        match self.backend.delete_alert(id, alert_id) {
            Ok(()) => {
                self.backend.notifier().success("Alert removed");
                self.reload();
                true
            }
            Err(e) => {
                warn!(id, alert_id, error = %e, "delete alert failed");
                self.backend.notifier().error("Could not remove alert");
                false
            }
        }
    }

    // -- Loading -----------------------------------------------------------

    pub fn reload(&mut self) {
        let ticket = self.begin_load();
        let result = reconcile::resolve(self.backend, self.key);
        self.finish_load(ticket, result);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.state = LoadState::Loading;
        self.sequence.issue()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Resolution>) {
        if !self.sequence.accept(ticket, "product detail") {
            return;
        }
        self.state = match result {
            Ok(resolution) => LoadState::Ready(resolution),
            Err(e) => {
                warn!(key = ?self.key, error = %e, "product load failed");
                self.backend
                    .notifier()
                    .error("Could not load product data");
                LoadState::Failed(e.to_string())
            }
        };
    }
}
