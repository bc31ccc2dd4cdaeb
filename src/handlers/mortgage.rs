// src/handlers/mortgage.rs
use warp::reply::Json;
use warp::Rejection;
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;

use super::error::ApiError;
use crate::models::{CountyTax, MortgageQuote};
use crate::services::amortization;
use crate::services::counties::CountyTaxTable;
use crate::services::rates::RateProvider;

#[derive(Debug, Deserialize)]
pub struct MortgageQuery {
    pub principal: f64,
    pub term_years: u32,
    /// Annual rate in percent; when absent the current rate feed supplies it.
    pub rate: Option<f64>,
    /// Optional Texas county slug for a property-tax estimate.
    pub county: Option<String>,
}

pub async fn get_mortgage_quote(
    query: MortgageQuery,
    provider: Arc<RateProvider>,
    counties: Arc<CountyTaxTable>,
) -> Result<Json, Rejection> {
    info!(
        "Handling mortgage quote: principal={} term_years={}",
        query.principal, query.term_years
    );

    let (rate_used, rate_source, is_live_rate) = match query.rate {
        Some(rate) => (rate, "query".to_string(), true),
        None => {
            let snapshot = provider.fetch_rates(Utc::now()).await;
            // 15-year product for short terms, 30-year for everything else.
            let rate = if query.term_years >= 20 {
                snapshot.thirty_year_rate
            } else {
                snapshot.fifteen_year_rate
            };
            (rate, snapshot.source, snapshot.is_live)
        }
    };

    let monthly_payment = amortization::monthly_payment(query.principal, rate_used, query.term_years)
        .map_err(|e| {
            error!("Rejected mortgage quote input: {}", e);
            warp::reject::custom(ApiError::bad_request(e.to_string()))
        })?;
    let total_interest = amortization::total_interest(query.principal, monthly_payment, query.term_years);

    let county = match query.county.as_deref() {
        Some(key) => {
            let row = counties.get(key).ok_or_else(|| {
                warp::reject::custom(ApiError::bad_request(format!("unknown county: {}", key)))
            })?;
            Some(CountyTax {
                name: row.name.clone(),
                rate: row.rate,
                monthly_property_tax: query.principal * row.rate / 100.0 / 12.0,
            })
        }
        None => None,
    };

    let quote = MortgageQuote {
        principal: query.principal,
        term_years: query.term_years,
        rate_used,
        monthly_payment,
        total_interest,
        rate_source,
        is_live_rate,
        county,
    };

    Ok(warp::reply::json(&quote))
}
