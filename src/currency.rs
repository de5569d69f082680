//! Currency symbols, display formatting, and fail-safe conversion.
//!
//! Conversion and rate lookups never surface an error: a failing provider is
//! logged and replaced with the original amount or an empty rate table, so
//! display code always has something to render.

use crate::currency_provider::{CurrencyProvider, ProviderError, RateTable};
use tracing::warn;

/// Symbol used when no currency code is given.
pub const DEFAULT_SYMBOL: &str = "$";

fn known_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code.to_ascii_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CAD" => "C$",
        "AUD" => "A$",
        "CHF" => "Fr",
        "CNY" => "¥",
        "INR" => "₹",
        "BRL" => "R$",
        "MXN" => "Mex$",
        "ZAR" => "R",
        _ => return None,
    };
    Some(symbol)
}

/// Resolves a currency code to its display symbol.
///
/// Codes are matched case-insensitively. A missing or empty code resolves to
/// [`DEFAULT_SYMBOL`]; an unrecognized code acts as its own symbol.
pub fn symbol_for(code: Option<&str>) -> String {
    match code {
        Some(code) if !code.is_empty() => known_symbol(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string()),
        _ => DEFAULT_SYMBOL.to_string(),
    }
}

/// Formats an amount for display: symbol, then the value with exactly two
/// fraction digits and thousands separators (`$1,234.50`).
///
/// A missing or non-finite amount renders as zero; the sign sits between the
/// symbol and the digits (`XYZ-5.00`). An empty `code` behaves like a missing
/// one.
pub fn format_amount(amount: Option<f64>, code: &str) -> String {
    let symbol = symbol_for(if code.is_empty() { None } else { Some(code) });
    let amount = amount.filter(|a| a.is_finite()).unwrap_or(0.0);
    format!("{symbol}{}", group_thousands(amount))
}

fn group_thousands(amount: f64) -> String {
    let rendered = format!("{amount:.2}");
    // "{:.2}" always yields sign, integer digits, '.', two digits.
    let (number, fraction) = match rendered.split_once('.') {
        Some(parts) => parts,
        None => (rendered.as_str(), "00"),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}.{fraction}")
}

/// Outcome of a conversion request.
///
/// The fallback branch carries the original amount alongside the reason, so
/// callers can always display a number without inspecting the failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Converted(f64),
    Fallback { amount: f64, reason: ProviderError },
}

impl Conversion {
    /// The amount to display, converted or not.
    pub fn amount(&self) -> f64 {
        match self {
            Conversion::Converted(amount) => *amount,
            Conversion::Fallback { amount, .. } => *amount,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Conversion::Fallback { .. })
    }
}

/// Converts `amount` from one currency to another via the provider.
///
/// Equal source and target currencies (compared case-insensitively) resolve
/// immediately without touching the network. A provider failure is logged and
/// the original amount is kept.
pub async fn convert(
    provider: &dyn CurrencyProvider,
    amount: f64,
    from: &str,
    to: &str,
) -> Conversion {
    if from.eq_ignore_ascii_case(to) {
        return Conversion::Converted(amount);
    }

    match provider.convert(amount, from, to).await {
        Ok(converted) => Conversion::Converted(converted),
        Err(reason) => {
            warn!("Currency conversion failed from {from} to {to}: {reason}");
            Conversion::Fallback { amount, reason }
        }
    }
}

/// Fetches the full exchange rate table from the provider.
///
/// An unavailable provider yields an empty table; callers must treat that as
/// "rates unavailable" rather than indexing into it.
pub async fn fetch_rates(provider: &dyn CurrencyProvider) -> RateTable {
    match provider.rates().await {
        Ok(rates) => rates,
        Err(reason) => {
            warn!("Failed to fetch exchange rates: {reason}");
            RateTable::new()
        }
    }
}
