//! Arithmetic behind the derived display fields

use crate::engine::Recompute;
use crate::form::FormSnapshot;
use crate::rules::{derived, MarginMode};

/// Recomputes invoice totals and the costing preview in place
#[derive(Debug, Default)]
pub struct LedgerRecompute {
    runs: usize,
}

impl LedgerRecompute {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many routines have run so far
    pub fn runs(&self) -> usize {
        self.runs
    }
}

fn money(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn write(form: &mut FormSnapshot, name: &str, value: Option<f64>) {
    if !form.set_value(name, &money(value)) {
        tracing::trace!(field = name, "derived field not in this layout");
    }
}

/// quantity × unit price, less the discount percentage
pub fn line_total(
    quantity: Option<f64>,
    unit_price: Option<f64>,
    discount: Option<f64>,
) -> Option<f64> {
    let discount = discount.unwrap_or(0.0).clamp(0.0, 100.0);
    Some(quantity? * unit_price? * (1.0 - discount / 100.0))
}

/// Balance due and change for a total and an amount paid
pub fn settle(total: Option<f64>, paid: Option<f64>) -> (Option<f64>, Option<f64>) {
    let Some(total) = total else {
        return (None, None);
    };
    let paid = paid.unwrap_or(0.0);
    (Some((total - paid).max(0.0)), Some((paid - total).max(0.0)))
}

/// Cost, margin and suggested price preview of a costing sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostPreview {
    pub total_cost: f64,
    pub margin_amount: f64,
    pub suggested_price: f64,
    /// Selling price minus cost, when a selling price is entered
    pub effective_margin: Option<f64>,
}

impl CostPreview {
    pub fn from_form(form: &FormSnapshot) -> Self {
        let amount = |name: &str| form.number(name).unwrap_or(0.0);
        let total_cost = amount("weight") * amount("purchase_price")
            + amount("labor_cost")
            + amount("stone_cost")
            + amount("other_cost");
        let margin_value = amount("margin_value");
        let margin_amount = match MarginMode::parse(form.value("margin_type").unwrap_or("")) {
            MarginMode::Percent => total_cost * margin_value / 100.0,
            MarginMode::Fixed => margin_value,
        };
        Self {
            total_cost,
            margin_amount,
            suggested_price: total_cost + margin_amount,
            effective_margin: form.number("selling_price").map(|price| price - total_cost),
        }
    }
}

impl Recompute for LedgerRecompute {
    fn estimated_total(&mut self, form: &mut FormSnapshot) {
        self.runs += 1;
        let total = line_total(
            form.number("quantity"),
            form.number("unit_price"),
            form.number("discount"),
        );
        tracing::debug!(?total, "estimated total");
        write(form, derived::ESTIMATED_TOTAL, total);
        // The summary depends on the total whenever it is present
        if form.field("amount_paid").is_some() {
            self.invoice_summary(form);
        }
    }

    fn cost_margin_preview(&mut self, form: &mut FormSnapshot) {
        self.runs += 1;
        let preview = CostPreview::from_form(form);
        tracing::debug!(?preview, "cost margin preview");
        write(form, derived::TOTAL_COST, Some(preview.total_cost));
        write(form, derived::MARGIN_AMOUNT, Some(preview.margin_amount));
        write(form, derived::SUGGESTED_PRICE, Some(preview.suggested_price));
        write(form, derived::EFFECTIVE_MARGIN, preview.effective_margin);
    }

    fn invoice_summary(&mut self, form: &mut FormSnapshot) {
        self.runs += 1;
        let (balance, change) = settle(
            form.number(derived::ESTIMATED_TOTAL),
            form.number("amount_paid"),
        );
        write(form, derived::BALANCE_DUE, balance);
        write(form, derived::CHANGE_DUE, change);
    }
}
