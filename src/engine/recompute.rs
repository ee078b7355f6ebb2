//! Recomputation collaborators
//!
//! The engine decides when a derived value must be refreshed; an
//! implementation of [`Recompute`] decides how.

use crate::form::FormSnapshot;
use std::fmt;

/// Named recomputation capabilities injected into a form controller
#[cfg_attr(test, mockall::automock)]
pub trait Recompute {
    /// Line-item estimated total
    fn estimated_total(&mut self, form: &mut FormSnapshot);

    /// Product costing: cost, margin and suggested price preview
    fn cost_margin_preview(&mut self, form: &mut FormSnapshot);

    /// Invoice summary: balance due and change
    fn invoice_summary(&mut self, form: &mut FormSnapshot);
}

/// Which routine a reaction asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Routine {
    EstimatedTotal,
    CostMarginPreview,
    InvoiceSummary,
}

impl Routine {
    pub fn run(self, recompute: &mut dyn Recompute, form: &mut FormSnapshot) {
        match self {
            Routine::EstimatedTotal => recompute.estimated_total(form),
            Routine::CostMarginPreview => recompute.cost_margin_preview(form),
            Routine::InvoiceSummary => recompute.invoice_summary(form),
        }
    }
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Routine::EstimatedTotal => "estimated_total",
            Routine::CostMarginPreview => "cost_margin_preview",
            Routine::InvoiceSummary => "invoice_summary",
        })
    }
}

/// Collaborator for forms that have no derived values
#[derive(Debug, Default)]
pub struct NoRecompute;

impl Recompute for NoRecompute {
    fn estimated_total(&mut self, _form: &mut FormSnapshot) {}
    fn cost_margin_preview(&mut self, _form: &mut FormSnapshot) {}
    fn invoice_summary(&mut self, _form: &mut FormSnapshot) {}
}
