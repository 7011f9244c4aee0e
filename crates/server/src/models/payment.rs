//! Membership model.
//!
//! Billing and description texts may carry `[Price]` and `[Name]` tokens.
//! Substitution happens at read time through the display accessors; the
//! stored text is never rewritten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reduce_food_waste_core::Price;

/// Substitute `[Price]` and `[Name]` tokens in a text.
fn substitute_tokens(text: &str, name: &str, price: &Price) -> String {
    text.replace("[Price]", &price.display())
        .replace("[Name]", name)
}

/// A membership a household member holds or can purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipModel {
    /// Membership name (e.g. "Basic", "Premium").
    pub name: String,
    /// Description text, possibly carrying `[Price]`/`[Name]` tokens.
    pub description: Option<String>,
    /// Billing text, possibly carrying `[Price]`/`[Name]` tokens.
    pub billing_information: Option<String>,
    /// Membership price.
    pub price: Price,
    /// When the membership expires, if it is time-limited.
    pub expire_time: Option<DateTime<Utc>>,
}

impl MembershipModel {
    /// Whether there is nothing to charge for this membership.
    #[must_use]
    pub fn is_free_of_cost(&self) -> bool {
        self.price.is_free_of_cost()
    }

    /// Description text with tokens substituted.
    #[must_use]
    pub fn description_display(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(|text| substitute_tokens(text, &self.name, &self.price))
    }

    /// Billing text with tokens substituted.
    #[must_use]
    pub fn billing_information_display(&self) -> Option<String> {
        self.billing_information
            .as_deref()
            .map(|text| substitute_tokens(text, &self.name, &self.price))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reduce_food_waste_core::CurrencyCulture;
    use rust_decimal::Decimal;

    fn membership(amount: i64) -> MembershipModel {
        MembershipModel {
            name: "Premium".to_string(),
            description: Some("The [Name] membership costs [Price].".to_string()),
            billing_information: Some("Billed [Price] monthly.".to_string()),
            price: Price::new(Decimal::new(amount, 2), CurrencyCulture::DaDk),
            expire_time: None,
        }
    }

    #[test]
    fn test_is_free_of_cost() {
        assert!(membership(0).is_free_of_cost());
        assert!(!membership(9900).is_free_of_cost());
    }

    #[test]
    fn test_description_substitutes_tokens_at_read_time() {
        let model = membership(9900);
        assert_eq!(
            model.description_display().unwrap(),
            "The Premium membership costs 99,00 kr.."
        );
        // Stored text keeps its tokens
        assert_eq!(
            model.description.unwrap(),
            "The [Name] membership costs [Price]."
        );
    }

    #[test]
    fn test_billing_information_substitutes_price() {
        let model = membership(9900);
        assert_eq!(
            model.billing_information_display().unwrap(),
            "Billed 99,00 kr. monthly."
        );
    }

    #[test]
    fn test_membership_without_billing_text() {
        let mut model = membership(0);
        model.billing_information = None;
        assert!(model.billing_information_display().is_none());
    }
}
