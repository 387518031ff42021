use serde::{Deserialize, Serialize};

/// Product with the largest price move in one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "variacao")]
    pub variation: f64,
}

/// Product at a price extreme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedProduct {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "total_produtos", default)]
    pub total_products: u64,
    #[serde(rename = "produto_maior_alta", default)]
    pub biggest_rise: Option<Mover>,
    #[serde(rename = "produto_maior_baixa", default)]
    pub biggest_drop: Option<Mover>,
    #[serde(rename = "produto_mais_caro", default)]
    pub most_expensive: Option<PricedProduct>,
    #[serde(rename = "produto_mais_barato", default)]
    pub cheapest: Option<PricedProduct>,
    #[serde(rename = "total_alertas_ativos", default)]
    pub active_alerts: u64,
    #[serde(rename = "total_alertas_disparados_hoje", default)]
    pub alerts_triggered_today: u64,
}
