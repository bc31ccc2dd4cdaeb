// src/bin/test_amortization.rs
use realty_rates_api::services::amortization::{monthly_payment, total_interest};
use realty_rates_api::services::formatting::{format_currency, format_percent};
use realty_rates_api::BoxError;

fn main() -> std::result::Result<(), BoxError> {
    let principal = 200_000.0;
    let rate = 6.5;
    let years = 30;

    let payment = monthly_payment(principal, rate, years)?;
    let interest = total_interest(principal, payment, years);

    println!(
        "{} at {} over {} years:",
        format_currency(principal),
        format_percent(rate),
        years
    );
    println!("monthly payment: {}", format_currency(payment));
    println!("total interest:  {}", format_currency(interest));
    Ok(())
}
