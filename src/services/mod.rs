// src/services/mod.rs
pub mod amortization;
pub mod cache;
pub mod counties;
pub mod formatting;
pub mod rates;
