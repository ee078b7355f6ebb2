//! Invoice line item and payment summary rules

use crate::engine::{DependencyRule, Reaction, Routine};
use crate::form::FieldIdentity;

/// Copy the selected catalog item's price into the unit price. The write
/// cascades into the unit price's own trigger, which refreshes the
/// estimated total once.
pub fn catalog_item_rule() -> DependencyRule {
    DependencyRule::new().on_commit(Reaction::new(
        vec![FieldIdentity::UnitPrice],
        |source, effects| {
            let Some(price) = source.price() else {
                return;
            };
            effects.write_value(&FieldIdentity::UnitPrice, &format!("{price:.2}"));
        },
    ))
}

/// Identities that only refresh the line item's estimated total
pub const ESTIMATED_TOTAL_TRIGGERS: &[FieldIdentity] = &[
    FieldIdentity::Quantity,
    FieldIdentity::UnitPrice,
    FieldIdentity::Discount,
];

/// Amount paid refreshes balance due and change
pub fn amount_paid_rule() -> DependencyRule {
    DependencyRule::trigger(Routine::InvoiceSummary)
}
