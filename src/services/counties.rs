// src/services/counties.rs
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Reader;
use log::info;

use crate::models::CountyTaxRate;

// Shipped copy of the table, used when no CSV path is configured.
const BUILTIN_CSV: &str = include_str!("../../data/tx_county_tax_rates.csv");

/// Texas county property-tax rates, keyed by a lowercase county slug.
///
/// The table is static reference data maintained outside this crate; it is
/// loaded once at startup and never refreshed while running.
pub struct CountyTaxTable {
    rates: HashMap<String, CountyTaxRate>,
}

impl CountyTaxTable {
    /// Parse a `key,name,rate` CSV.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut rdr = Reader::from_reader(reader);
        let mut rates = HashMap::new();

        for record in rdr.deserialize() {
            let row: CountyTaxRate = record.context("bad row in county tax CSV")?;
            rates.insert(row.key.clone(), row);
        }

        info!("Loaded {} county tax rates", rates.len());
        Ok(CountyTaxTable { rates })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("cannot open county tax CSV at {}", path.display()))?;
        Self::from_reader(file)
    }

    /// The compiled-in copy of the table.
    pub fn builtin() -> Result<Self> {
        Self::from_reader(BUILTIN_CSV.as_bytes())
    }

    /// Look up a county by slug; matching is case-insensitive.
    pub fn get(&self, key: &str) -> Option<&CountyTaxRate> {
        self.rates.get(key.trim().to_lowercase().as_str())
    }

    /// All counties, sorted by slug for stable API output.
    pub fn all(&self) -> Vec<&CountyTaxRate> {
        let mut rows: Vec<&CountyTaxRate> = self.rates.values().collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        rows
    }
}
