//! Price alert queries (`/produtos/{id}/alertas`).

use serde::Serialize;

use crate::connection::Connection;
use crate::error::Result;
use crate::models::PriceAlert;

#[derive(Serialize)]
struct CreateAlertBody {
    preco_alvo: f64,
}

pub struct AlertQuery<'a> {
    conn: &'a Connection,
}

impl<'a> AlertQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self, product_id: i64) -> Result<Vec<PriceAlert>> {
        self.conn
            .get(&format!("/produtos/{product_id}/alertas"), &[])
    }

    pub fn create(&self, product_id: i64, target_price: f64) -> Result<PriceAlert> {
        self.conn.post(
            &format!("/produtos/{product_id}/alertas"),
            Some(&CreateAlertBody {
                preco_alvo: target_price,
            }),
        )
    }

    pub fn delete(&self, product_id: i64, alert_id: i64) -> Result<()> {
        self.conn
            .delete(&format!("/produtos/{product_id}/alertas/{alert_id}"))
    }
}
