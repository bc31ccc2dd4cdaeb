// src/services/rates.rs
use std::fmt;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use log::{error, info};
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::models::RateSnapshot;
use crate::services::cache::RateCache;

/// Rates used when the remote endpoint cannot be reached or understood.
pub const FALLBACK_THIRTY_YEAR: f64 = 6.5;
pub const FALLBACK_FIFTEEN_YEAR: f64 = 5.9;
pub const FALLBACK_SOURCE: &str = "Fallback (offline)";

const FETCH_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// Why a fetch attempt failed. Callers of `fetch_rates` never see these;
/// they exist so logs and tests can tell the causes apart.
#[derive(Debug)]
pub enum FetchError {
    /// The request never completed (DNS, connect, timeout).
    Transport(reqwest::Error),
    /// The endpoint answered with a non-success status.
    Protocol(StatusCode),
    /// The body parsed but did not match the expected shape.
    Schema(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "transport error: {}", e),
            FetchError::Protocol(status) => write!(f, "unexpected status: {}", status),
            FetchError::Schema(msg) => write!(f, "malformed rates response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

// Expected wire shape:
// {"rates": {"thirtyYear": {"rate": n}, "fifteenYear": {"rate": n}},
//  "source": "...", "lastUpdated": "...", "error": bool?}
#[derive(Deserialize)]
struct RemoteRates {
    rates: RemoteRateTable,
    source: String,
    #[serde(rename = "lastUpdated")]
    last_updated: String,
    #[serde(default)]
    error: bool,
}

#[derive(Deserialize)]
struct RemoteRateTable {
    #[serde(rename = "thirtyYear")]
    thirty_year: RemoteRate,
    #[serde(rename = "fifteenYear")]
    fifteen_year: RemoteRate,
}

#[derive(Deserialize)]
struct RemoteRate {
    rate: f64,
}

/// Fetches mortgage rates from the configured endpoint, caching the result
/// for an hour and degrading to fixed fallback values on any failure.
///
/// The cache slot is shared mutable state; the mutex is held across the
/// whole stale-path fetch so two concurrent requesters cannot race to
/// overwrite each other's snapshot.
pub struct RateProvider {
    client: reqwest::Client,
    endpoint: String,
    cache: Mutex<RateCache>,
}

impl RateProvider {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(RateProvider {
            client,
            endpoint: endpoint.into(),
            cache: Mutex::new(RateCache::new()),
        })
    }

    /// Replace the cache, mainly to shorten the TTL in tests.
    pub fn with_cache(mut self, cache: RateCache) -> Self {
        self.cache = Mutex::new(cache);
        self
    }

    /// Produce a current snapshot. Never fails: every error path is absorbed
    /// into the fallback snapshot, which is cached like a live one. That
    /// means a failure suppresses retries for the full TTL even if the
    /// network recovers sooner; the site prefers a quiet hour of estimated
    /// rates over hammering a flaky endpoint.
    pub async fn fetch_rates(&self, now: DateTime<Utc>) -> RateSnapshot {
        let mut cache = self.cache.lock().await;

        if cache.is_fresh(now) {
            if let Some(snapshot) = cache.get() {
                info!("Serving mortgage rates from cache (source: {})", snapshot.source);
                return snapshot.clone();
            }
        }

        info!("Rate cache stale or empty, fetching from {}", self.endpoint);
        let snapshot = match self.fetch_remote().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Mortgage rate fetch failed, using fallback values: {}", e);
                fallback_snapshot(now)
            }
        };

        cache.put(snapshot.clone(), now);
        snapshot
    }

    async fn fetch_remote(&self) -> Result<RateSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol(status));
        }

        let body: RemoteRates = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Schema(e.to_string())
            } else {
                FetchError::Transport(e)
            }
        })?;

        // The endpoint can flag its own degraded state on a 200 response.
        if body.error {
            info!("Rates endpoint reports degraded data (source: {})", body.source);
        }

        Ok(RateSnapshot {
            thirty_year_rate: body.rates.thirty_year.rate,
            fifteen_year_rate: body.rates.fifteen_year.rate,
            source: body.source,
            last_updated: body.last_updated,
            is_live: !body.error,
        })
    }
}

/// Fixed snapshot used whenever the endpoint is unavailable.
pub fn fallback_snapshot(now: DateTime<Utc>) -> RateSnapshot {
    RateSnapshot {
        thirty_year_rate: FALLBACK_THIRTY_YEAR,
        fifteen_year_rate: FALLBACK_FIFTEEN_YEAR,
        source: FALLBACK_SOURCE.to_string(),
        last_updated: now.to_rfc3339(),
        is_live: false,
    }
}
