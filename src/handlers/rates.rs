// src/handlers/rates.rs
use warp::reply::Json;
use warp::Rejection;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::services::rates::RateProvider;

/// Current mortgage rates. Never fails: a fetch problem surfaces as the
/// fallback snapshot with `is_live = false`, and the frontend shows the
/// rate as estimated.
pub async fn get_rates(provider: Arc<RateProvider>) -> Result<Json, Rejection> {
    info!("Handling request to get mortgage rates.");
    let snapshot = provider.fetch_rates(Utc::now()).await;
    Ok(warp::reply::json(&snapshot))
}
