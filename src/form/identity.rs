//! Field identities that rules are keyed by

use super::field::Field;
use std::fmt;

/// Identity of a field as far as rule lookup is concerned.
///
/// Known domain fields get their own variant; anything else (extra form
/// variants, validation groups) is carried as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldIdentity {
    PaymentMethod,
    CatalogItem,
    Quantity,
    UnitPrice,
    Discount,
    Weight,
    PurchasePrice,
    LaborCost,
    StoneCost,
    OtherCost,
    SellingPrice,
    MarginType,
    MarginValue,
    AmountPaid,
    Custom(String),
}

const KNOWN: &[(&str, FieldIdentity)] = &[
    ("payment_method", FieldIdentity::PaymentMethod),
    ("product", FieldIdentity::CatalogItem),
    ("quantity", FieldIdentity::Quantity),
    ("unit_price", FieldIdentity::UnitPrice),
    ("discount", FieldIdentity::Discount),
    ("weight", FieldIdentity::Weight),
    ("purchase_price", FieldIdentity::PurchasePrice),
    ("labor_cost", FieldIdentity::LaborCost),
    ("stone_cost", FieldIdentity::StoneCost),
    ("other_cost", FieldIdentity::OtherCost),
    ("selling_price", FieldIdentity::SellingPrice),
    ("margin_type", FieldIdentity::MarginType),
    ("margin_value", FieldIdentity::MarginValue),
    ("amount_paid", FieldIdentity::AmountPaid),
];

impl FieldIdentity {
    /// Map a declared name or group tag to an identity
    pub fn parse(raw: &str) -> Self {
        KNOWN
            .iter()
            .find(|(name, _)| *name == raw)
            .map(|(_, identity)| identity.clone())
            .unwrap_or_else(|| FieldIdentity::Custom(raw.to_string()))
    }

    /// Name of the field this identity addresses when used as a write target
    pub fn field_name(&self) -> &str {
        match self {
            FieldIdentity::Custom(name) => name,
            known => KNOWN
                .iter()
                .find(|(_, identity)| identity == known)
                .map(|(name, _)| *name)
                .unwrap_or(""),
        }
    }
}

impl fmt::Display for FieldIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Resolve the identity a rule table knows this field by: declared name
/// first, then the group tag. `None` when neither has a rule.
pub fn resolve_identity(
    field: &Field,
    is_registered: impl Fn(&FieldIdentity) -> bool,
) -> Option<FieldIdentity> {
    let by_name = FieldIdentity::parse(&field.name);
    if is_registered(&by_name) {
        return Some(by_name);
    }
    field
        .group
        .as_deref()
        .map(FieldIdentity::parse)
        .filter(|identity| is_registered(identity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!(FieldIdentity::parse("product"), FieldIdentity::CatalogItem);
        assert_eq!(FieldIdentity::parse("amount_paid"), FieldIdentity::AmountPaid);
    }

    #[test]
    fn test_parse_unknown_is_custom() {
        assert_eq!(
            FieldIdentity::parse("client_name"),
            FieldIdentity::Custom("client_name".to_string())
        );
    }

    #[test]
    fn test_field_name_round_trips_every_known_identity() {
        for (name, identity) in KNOWN {
            assert_eq!(identity.field_name(), *name);
        }
    }

    #[test]
    fn test_resolve_prefers_name() {
        let field = Field::number("quantity", "Qty").in_group("amount");
        let resolved = resolve_identity(&field, |_| true);
        assert_eq!(resolved, Some(FieldIdentity::Quantity));
    }

    #[test]
    fn test_resolve_falls_back_to_group() {
        let field = Field::number("labor_cost", "Labor").in_group("amount");
        let amount = FieldIdentity::Custom("amount".to_string());
        let resolved = resolve_identity(&field, |identity| *identity == amount);
        assert_eq!(resolved, Some(amount.clone()));
    }

    #[test]
    fn test_resolve_unregistered_is_none() {
        let field = Field::text("notes", "Notes").in_group("free_text");
        assert_eq!(resolve_identity(&field, |_| false), None);
    }
}
