//! Payment method rule
//!
//! The selected payment method's label decides two things independently:
//! whether a payment reference is asked for, and whether bank account
//! details are.

use crate::config::EngineConfig;
use crate::engine::{DependencyRule, Reaction};

/// Section holding the payment reference input
pub const PAYMENT_REFERENCE_SECTION: &str = "payment_reference";
/// Section holding bank account inputs
pub const BANK_ACCOUNT_SECTION: &str = "bank_account";

/// Lower-cased keyword sets matched against option labels
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentKeywords {
    no_reference: Vec<String>,
    bank_transfer: Vec<String>,
}

impl PaymentKeywords {
    pub fn new(no_reference: &[String], bank_transfer: &[String]) -> Self {
        Self {
            no_reference: no_reference.iter().map(|k| k.to_lowercase()).collect(),
            bank_transfer: bank_transfer.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.no_reference_keywords, &config.bank_transfer_keywords)
    }

    /// False for cash-like methods
    pub fn needs_reference(&self, label: &str) -> bool {
        !contains_any(label, &self.no_reference)
    }

    pub fn needs_bank_account(&self, label: &str) -> bool {
        contains_any(label, &self.bank_transfer)
    }
}

fn contains_any(label: &str, keywords: &[String]) -> bool {
    let label = label.to_lowercase();
    keywords.iter().any(|k| label.contains(k.as_str()))
}

/// Toggle the reference and bank account sections from the selected label
pub fn payment_method_rule(keywords: PaymentKeywords) -> DependencyRule {
    DependencyRule::new().on_commit(Reaction::new(Vec::new(), move |source, effects| {
        let label = source.label();
        effects.set_section_visible(PAYMENT_REFERENCE_SECTION, keywords.needs_reference(label));
        effects.set_section_visible(BANK_ACCOUNT_SECTION, keywords.needs_bank_account(label));
    }))
}
