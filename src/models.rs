// src/models.rs
use serde::{Serialize, Deserialize};

/// Point-in-time record of the mortgage rates shown on the site.
///
/// `is_live` is false exactly when `source` is the fallback origin; the
/// frontend uses it to render an "estimated rate" badge instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub thirty_year_rate: f64,
    pub fifteen_year_rate: f64,
    pub source: String,
    /// ISO-8601; the provider's reported time for live data, the time of
    /// construction for fallback data.
    pub last_updated: String,
    pub is_live: bool,
}

/// One row of the Texas county property-tax table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyTaxRate {
    pub key: String,
    pub name: String,
    /// Combined average property-tax rate, percent of assessed value per year.
    pub rate: f64,
}

#[derive(Debug, Serialize)]
pub struct MortgageQuote {
    pub principal: f64,
    pub term_years: u32,
    pub rate_used: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
    /// Where `rate_used` came from: the query itself or the rate feed.
    pub rate_source: String,
    pub is_live_rate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<CountyTax>,
}

#[derive(Debug, Serialize)]
pub struct CountyTax {
    pub name: String,
    pub rate: f64,
    pub monthly_property_tax: f64,
}
