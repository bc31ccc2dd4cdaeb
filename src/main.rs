use dotenv::dotenv;
use env_logger;
use log::{info, warn};
use warp::Filter;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use realty_rates_api::routes;
use realty_rates_api::services::counties::CountyTaxTable;
use realty_rates_api::services::rates::RateProvider;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    // Get port from Heroku environment, default to 3030
    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });

    let port: u16 = port_str.parse().expect("PORT must be a number");
    info!("Using PORT: {}", port);

    let rates_url = env::var("RATES_API_URL").unwrap_or_else(|_| {
        warn!("$RATES_API_URL not set, defaulting to local functions dev server");
        "http://localhost:8788/api/mortgage-rates".to_string()
    });
    info!("Using rates endpoint: {}", rates_url);

    let provider = RateProvider::new(&rates_url).expect("failed to build HTTP client");

    let counties = match env::var("COUNTY_RATES_CSV") {
        Ok(path) => {
            info!("Loading county tax rates from {}", path);
            CountyTaxTable::from_path(&path).expect("failed to load county tax CSV")
        }
        Err(_) => {
            info!("$COUNTY_RATES_CSV not set, using built-in table");
            CountyTaxTable::builtin().expect("built-in county tax CSV is valid")
        }
    };

    // Bind to 0.0.0.0 for Heroku
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    // Set up routes
    let api = routes::routes(Arc::new(provider), Arc::new(counties)).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api)
        .run(addr)
        .await;
}
