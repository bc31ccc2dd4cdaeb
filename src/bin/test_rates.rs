// src/bin/test_rates.rs
use chrono::Utc;
use realty_rates_api::services::formatting::format_percent;
use realty_rates_api::services::rates::RateProvider;
use realty_rates_api::BoxError;

#[tokio::main]
async fn main() -> std::result::Result<(), BoxError> {
    env_logger::init();

    let url = std::env::var("RATES_API_URL")
        .unwrap_or_else(|_| "http://localhost:8788/api/mortgage-rates".to_string());
    let provider = RateProvider::new(&url)?;

    let snapshot = provider.fetch_rates(Utc::now()).await;
    println!("30y fixed: {}", format_percent(snapshot.thirty_year_rate));
    println!("15y fixed: {}", format_percent(snapshot.fifteen_year_rate));
    println!("source:    {} (live: {})", snapshot.source, snapshot.is_live);
    println!("updated:   {}", snapshot.last_updated);
    Ok(())
}
