use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: i64,
    #[serde(rename = "produto_id", default)]
    pub product_id: Option<i64>,
    #[serde(rename = "preco_alvo")]
    pub target_price: f64,
    #[serde(rename = "ativo", default)]
    pub active: bool,
    #[serde(rename = "notificado", default)]
    pub notified: bool,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<NaiveDateTime>,
}

impl PriceAlert {
    pub fn status_label(&self) -> String {
        format!(
            "{} - {}",
            if self.active { "Active" } else { "Inactive" },
            if self.notified { "Notified" } else { "Pending" }
        )
    }
}

/// Target price of the first active alert, in server order.
pub fn current_alert_price(alerts: &[PriceAlert]) -> Option<f64> {
    alerts.iter().find(|a| a.active).map(|a| a.target_price)
}
