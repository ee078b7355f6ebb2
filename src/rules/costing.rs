//! Product costing rules

use crate::engine::{DependencyRule, Reaction, Routine};
use crate::form::FieldIdentity;

/// How the margin value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarginMode {
    #[default]
    Percent,
    Fixed,
}

impl MarginMode {
    /// Read the mode from a margin type option value
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "fixed" | "amount" | "montant" => MarginMode::Fixed,
            _ => MarginMode::Percent,
        }
    }

    /// Unit label for the margin value field
    pub fn unit<'a>(self, currency: &'a str) -> &'a str {
        match self {
            MarginMode::Percent => "%",
            MarginMode::Fixed => currency,
        }
    }
}

/// Identities that only refresh the cost/margin preview
pub const COST_PREVIEW_TRIGGERS: &[FieldIdentity] = &[
    FieldIdentity::Weight,
    FieldIdentity::PurchasePrice,
    FieldIdentity::LaborCost,
    FieldIdentity::StoneCost,
    FieldIdentity::OtherCost,
    FieldIdentity::SellingPrice,
    FieldIdentity::MarginValue,
];

/// Switch the margin value's unit label, then refresh the preview
pub fn margin_type_rule(currency_symbol: &str) -> DependencyRule {
    let currency = currency_symbol.to_string();
    DependencyRule::new().on_commit(Reaction::new(Vec::new(), move |source, effects| {
        let mode = MarginMode::parse(&source.value);
        effects.set_unit(&FieldIdentity::MarginValue, mode.unit(&currency));
        effects.recompute(Routine::CostMarginPreview);
    }))
}
