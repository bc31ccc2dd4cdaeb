// src/services/formatting.rs
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use regex::Regex;

// Compiled once; the calculator page parses on every keystroke.
fn currency_strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[$,\s]").expect("currency strip pattern is valid"))
}

/// Render a dollar amount the way the site displays money: thousands
/// separators, two decimals, sign ahead of the dollar sign.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let negative = amount < 0.0 && cents > 0;
    let whole = group_thousands(cents / 100);
    format!("{}${}.{:02}", if negative { "-" } else { "" }, whole, cents % 100)
}

/// Parse user-entered money, tolerating `$`, commas, and stray whitespace.
pub fn parse_currency(input: &str) -> Result<f64> {
    let cleaned = currency_strip_re().replace_all(input, "");
    if cleaned.is_empty() {
        bail!("empty currency input");
    }
    let value: f64 = cleaned
        .parse()
        .with_context(|| format!("not a currency amount: {:?}", input))?;
    if !value.is_finite() {
        bail!("not a currency amount: {:?}", input);
    }
    Ok(value)
}

/// Render an annual rate as the site shows it, e.g. `6.50%`.
pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate)
}

/// Parse user-entered percentages, tolerating a trailing `%` and whitespace.
pub fn parse_percent(input: &str) -> Result<f64> {
    let cleaned = input.trim().trim_end_matches('%').trim();
    if cleaned.is_empty() {
        bail!("empty percentage input");
    }
    let value: f64 = cleaned
        .parse()
        .with_context(|| format!("not a percentage: {:?}", input))?;
    if !value.is_finite() {
        bail!("not a percentage: {:?}", input);
    }
    Ok(value)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
