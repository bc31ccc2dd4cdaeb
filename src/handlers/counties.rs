// src/handlers/counties.rs
use warp::reply::Json;
use warp::Rejection;
use log::info;
use std::sync::Arc;

use crate::services::counties::CountyTaxTable;

pub async fn list_counties(counties: Arc<CountyTaxTable>) -> Result<Json, Rejection> {
    info!("Handling request to list county tax rates.");
    Ok(warp::reply::json(&counties.all()))
}

pub async fn get_county(key: String, counties: Arc<CountyTaxTable>) -> Result<Json, Rejection> {
    info!("Handling request for county tax rate: {}", key);
    match counties.get(&key) {
        Some(row) => Ok(warp::reply::json(row)),
        None => Err(warp::reject::not_found()),
    }
}
