// src/services/amortization.rs
use std::fmt;

/// Rejected input for the payment formula. The reference behavior was to
/// let NaN/Infinity flow out of the math; surfacing a typed error instead
/// keeps bad numbers off the page.
#[derive(Debug, Clone, PartialEq)]
pub enum AmortizationError {
    NonPositivePrincipal(f64),
    NegativeRate(f64),
    ZeroTerm,
}

impl fmt::Display for AmortizationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AmortizationError::NonPositivePrincipal(p) => {
                write!(f, "principal must be a positive amount, got {}", p)
            }
            AmortizationError::NegativeRate(r) => {
                write!(f, "annual rate must be zero or positive, got {}", r)
            }
            AmortizationError::ZeroTerm => write!(f, "term must be at least one year"),
        }
    }
}

impl std::error::Error for AmortizationError {}

/// Monthly payment on a fixed-rate loan via the standard annuity formula,
/// with a straight-line branch for zero-interest loans.
pub fn monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> Result<f64, AmortizationError> {
    if !(principal > 0.0 && principal.is_finite()) {
        return Err(AmortizationError::NonPositivePrincipal(principal));
    }
    if !(annual_rate_percent >= 0.0 && annual_rate_percent.is_finite()) {
        return Err(AmortizationError::NegativeRate(annual_rate_percent));
    }
    if term_years == 0 {
        return Err(AmortizationError::ZeroTerm);
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    // f64 months: a u32 month product would overflow for very long terms
    let num_payments = f64::from(term_years) * 12.0;

    if monthly_rate == 0.0 {
        return Ok(principal / num_payments);
    }

    // Annuity formula in its discounted form, principal * r / (1 - (1+r)^-n).
    // The (1+r)^n form overflows to infinity for very long terms and turns
    // the quotient into NaN; this form converges to principal * r instead.
    let discount = (1.0 + monthly_rate).powf(-num_payments);
    Ok(principal * monthly_rate / (1.0 - discount))
}

/// Total interest paid over the life of the loan, derived from the payment.
/// Exact given the `monthly_payment` computed above; not independently
/// validated.
pub fn total_interest(principal: f64, monthly_payment: f64, term_years: u32) -> f64 {
    monthly_payment * f64::from(term_years) * 12.0 - principal
}
