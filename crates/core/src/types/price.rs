//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are carried in the currency's standard unit (e.g., rupees or
/// dollars, not the smallest subunit) as the backend serializes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }

    /// Format for display (e.g., "₹1,299.00" without the grouping).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// Supported settlement currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Display symbol for this currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }
}
