use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryPoint {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "data_consulta", with = "timestamp")]
    pub recorded_at: NaiveDateTime,
}

/// Sort history points oldest first, whatever order the server used.
pub fn sort_chronologically(points: &mut [PriceHistoryPoint]) {
    points.sort_by_key(|p| p.recorded_at);
}
