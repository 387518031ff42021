//! Display helpers for prices, dates and price variation.
//!
//! All functions are total: any input produces a deterministic string.

use chrono::NaiveDateTime;

pub const NOT_AVAILABLE: &str = "N/A";

/// Two-decimal dollar amount with thousands separators.
///
/// `1234.5` -> `$1,234.50`, `-3.5` -> `-$3.50`. Non-finite input yields `N/A`.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let is_zero = whole.bytes().all(|b| b == b'0') && cents == "00";
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

pub fn format_price_opt(value: Option<f64>) -> String {
    value
        .map(format_price)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Calendar date only, `dd/mm/yyyy`. Used for history labels.
pub fn format_date(value: &NaiveDateTime) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Day, month and time, `dd/mm HH:MM`.
pub fn format_date_time(value: &NaiveDateTime) -> String {
    value.format("%d/%m %H:%M").to_string()
}

/// Magnitude of a percentage, `-4.256` -> `4.26%`. The sign is carried by [`Trend`].
pub fn format_variation(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.2}%", value.abs())
}

/// Signed percentage, `-4.256` -> `-4.26%`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{value:.2}%")
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Presentation colors. A rising price is the unfavorable direction when
/// tracking prices, so it gets the alert color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendColor {
    Alert,
    Good,
}

impl TrendColor {
    pub fn name(self) -> &'static str {
        match self {
            TrendColor::Alert => "red",
            TrendColor::Good => "green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Neutral,
    Rising,
    Falling,
}

impl Trend {
    /// Classify a percentage variation by sign. Missing, zero and NaN are neutral.
    pub fn from_variation(variation: Option<f64>) -> Self {
        match variation {
            Some(v) if v > 0.0 => Trend::Rising,
            Some(v) if v < 0.0 => Trend::Falling,
            _ => Trend::Neutral,
        }
    }

    /// Direction of a series from its first to its last price. Flat counts as rising.
    pub fn between(first: f64, last: f64) -> Self {
        if last >= first {
            Trend::Rising
        } else {
            Trend::Falling
        }
    }

    pub fn color(self) -> Option<TrendColor> {
        match self {
            Trend::Neutral => None,
            Trend::Rising => Some(TrendColor::Alert),
            Trend::Falling => Some(TrendColor::Good),
        }
    }

    pub fn glyph(self) -> Option<char> {
        match self {
            Trend::Neutral => None,
            Trend::Rising => Some('↑'),
            Trend::Falling => Some('↓'),
        }
    }
}

/// Badge text such as `↑ 5.00%`, or `None` when there is no variation to show.
pub fn variation_badge(variation: Option<f64>) -> Option<String> {
    let value = variation?;
    let text = format_variation(value);
    Some(match Trend::from_variation(variation).glyph() {
        Some(glyph) => format!("{glyph} {text}"),
        None => text,
    })
}
