//! Aggregate statistics (`/produtos/estatisticas`).

use crate::connection::Connection;
use crate::error::Result;
use crate::models::Statistics;

pub struct StatisticsQuery<'a> {
    conn: &'a Connection,
}

impl<'a> StatisticsQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch a fresh snapshot. Nothing is cached.
    pub fn snapshot(&self) -> Result<Statistics> {
        self.conn.get("/produtos/estatisticas", &[])
    }
}
