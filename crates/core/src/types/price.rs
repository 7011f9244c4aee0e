//! Type-safe price representation using decimal arithmetic.
//!
//! Payable amounts come from the household-data service together with a
//! culture name (the original deployment was Danish, so `da-DK` is the
//! common case). Formatting follows the culture's decimal separator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Culture used to format a price for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCulture {
    /// Danish (comma decimal separator, trailing "kr.").
    #[default]
    DaDk,
    /// US English (dot decimal separator, leading "$").
    EnUs,
    /// British English (dot decimal separator, leading "£").
    EnGb,
}

impl CurrencyCulture {
    /// Parse a culture name such as `da-DK`. Unknown names fall back to
    /// Danish, matching the service's default culture.
    #[must_use]
    pub fn from_culture_name(name: &str) -> Self {
        match name {
            "en-US" => Self::EnUs,
            "en-GB" => Self::EnGb,
            _ => Self::DaDk,
        }
    }

    /// Culture name in BCP 47 form.
    #[must_use]
    pub const fn culture_name(self) -> &'static str {
        match self {
            Self::DaDk => "da-DK",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
        }
    }
}

/// A payable amount with its formatting culture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// Culture used when formatting for display.
    pub culture: CurrencyCulture,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, culture: CurrencyCulture) -> Self {
        Self { amount, culture }
    }

    /// Whether the amount is zero or negative, i.e. nothing to charge.
    #[must_use]
    pub fn is_free_of_cost(&self) -> bool {
        self.amount <= Decimal::ZERO
    }

    /// Format the amount for display in the price's culture.
    ///
    /// Formatting happens at read time; the stored amount is never changed.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = format!("{:.2}", self.amount);
        match self.culture {
            CurrencyCulture::DaDk => format!("{} kr.", rounded.replace('.', ",")),
            CurrencyCulture::EnUs => format!("${rounded}"),
            CurrencyCulture::EnGb => format!("£{rounded}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn dec(value: f64) -> Decimal {
        Decimal::from_f64(value).unwrap()
    }

    #[test]
    fn test_is_free_of_cost_zero() {
        assert!(Price::new(Decimal::ZERO, CurrencyCulture::DaDk).is_free_of_cost());
    }

    #[test]
    fn test_is_free_of_cost_negative() {
        assert!(Price::new(dec(-1.0), CurrencyCulture::DaDk).is_free_of_cost());
    }

    #[test]
    fn test_is_free_of_cost_positive() {
        assert!(!Price::new(dec(0.01), CurrencyCulture::DaDk).is_free_of_cost());
    }

    #[test]
    fn test_display_danish_uses_comma() {
        let price = Price::new(dec(149.5), CurrencyCulture::DaDk);
        assert_eq!(price.display(), "149,50 kr.");
    }

    #[test]
    fn test_display_us_uses_dot() {
        let price = Price::new(dec(149.5), CurrencyCulture::EnUs);
        assert_eq!(price.display(), "$149.50");
    }

    #[test]
    fn test_culture_name_round_trip() {
        for culture in [
            CurrencyCulture::DaDk,
            CurrencyCulture::EnUs,
            CurrencyCulture::EnGb,
        ] {
            assert_eq!(
                CurrencyCulture::from_culture_name(culture.culture_name()),
                culture
            );
        }
    }

    #[test]
    fn test_unknown_culture_falls_back_to_danish() {
        assert_eq!(
            CurrencyCulture::from_culture_name("fr-FR"),
            CurrencyCulture::DaDk
        );
    }
}
