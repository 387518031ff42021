use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{lenient_id, timestamp};

// ---------------------------------------------------------------------------
// ExternalProduct - catalog product, not necessarily tracked
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProduct {
    pub id: i64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// FavoriteProduct - product the backend is tracking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteProduct {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_id::deserialize")]
    pub external_id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "imagem_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "preco_original", default)]
    pub original_price: Option<f64>,
    #[serde(rename = "preco_atual", default)]
    pub current_price: Option<f64>,
    #[serde(rename = "variacao_percentual", default)]
    pub variation: Option<f64>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<NaiveDateTime>,
}

impl FavoriteProduct {
    /// Price to show: current when known, otherwise the original.
    pub fn display_price(&self) -> Option<f64> {
        self.current_price.or(self.original_price)
    }

    /// Whether the original price should be shown struck through.
    pub fn price_changed(&self) -> bool {
        match (self.original_price, self.current_price) {
            (Some(original), Some(current)) => original != current,
            _ => false,
        }
    }
}

/// Partial update body for `PUT /produtos/{id}`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteUpdate {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "imagem_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "preco_atual", skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}

// ---------------------------------------------------------------------------
// FavoritesPage - one page of the favorites listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesPage {
    #[serde(default)]
    pub items: Vec<FavoriteProduct>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
}
