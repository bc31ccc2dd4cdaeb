// src/handlers/mod.rs
pub mod counties;
pub mod error;
pub mod mortgage;
pub mod rates;
