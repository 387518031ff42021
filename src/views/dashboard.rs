//! Dashboard page: aggregate statistics.

use tracing::warn;

use crate::backend::Backend;
use crate::format::{format_percent, format_price, NOT_AVAILABLE};
use crate::models::Statistics;

use super::{LoadSequence, LoadState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: Option<String>,
}

impl StatCard {
    fn new(title: &'static str, value: String, subtitle: Option<String>) -> Self {
        Self {
            title,
            value,
            subtitle,
        }
    }
}

pub struct DashboardView<'a, B: Backend + ?Sized> {
    backend: &'a B,
    state: LoadState<Statistics>,
    sequence: LoadSequence,
}

impl<'a, B: Backend + ?Sized> DashboardView<'a, B> {
    pub fn open(backend: &'a B) -> Self {
        let mut view = Self {
            backend,
            state: LoadState::Loading,
            sequence: LoadSequence::default(),
        };
        view.reload();
        view
    }

    pub fn state(&self) -> &LoadState<Statistics> {
        &self.state
    }

    pub fn reload(&mut self) {
        self.state = LoadState::Loading;
        let ticket = self.sequence.issue();
        let result = self.backend.statistics();
        if !self.sequence.accept(ticket, "dashboard") {
            return;
        }
        self.state = match result {
            Ok(stats) => LoadState::Ready(stats),
            Err(e) => {
                warn!(error = %e, "statistics load failed");
                self.backend.notifier().error("Could not load statistics");
                LoadState::Failed(e.to_string())
            }
        };
    }

    /// Cards in display order; empty unless statistics are loaded.
    pub fn cards(&self) -> Vec<StatCard> {
        self.state.ready().map(stat_cards).unwrap_or_default()
    }
}

pub fn stat_cards(stats: &Statistics) -> Vec<StatCard> {
    let na = || NOT_AVAILABLE.to_string();
    vec![
        StatCard::new("Total products", stats.total_products.to_string(), None),
        StatCard::new(
            "Biggest rise",
            stats
                .biggest_rise
                .as_ref()
                .map(|m| format_percent(m.variation))
                .unwrap_or_else(na),
            stats.biggest_rise.as_ref().map(|m| m.name.clone()),
        ),
        StatCard::new(
            "Biggest drop",
            stats
                .biggest_drop
                .as_ref()
                .map(|m| format_percent(m.variation))
                .unwrap_or_else(na),
            stats.biggest_drop.as_ref().map(|m| m.name.clone()),
        ),
        StatCard::new(
            "Most expensive",
            stats
                .most_expensive
                .as_ref()
                .map(|p| format_price(p.price))
                .unwrap_or_else(na),
            stats.most_expensive.as_ref().map(|p| p.name.clone()),
        ),
        StatCard::new(
            "Cheapest",
            stats
                .cheapest
                .as_ref()
                .map(|p| format_price(p.price))
                .unwrap_or_else(na),
            stats.cheapest.as_ref().map(|p| p.name.clone()),
        ),
        StatCard::new(
            "Active alerts",
            stats.active_alerts.to_string(),
            Some(format!("{} triggered today", stats.alerts_triggered_today)),
        ),
    ]
}
