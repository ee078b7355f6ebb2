//! Domain rule sets for the invoice and product costing forms

mod costing;
mod line_item;
mod payment;
mod schema;

pub use costing::{margin_type_rule, MarginMode, COST_PREVIEW_TRIGGERS};
pub use line_item::{amount_paid_rule, catalog_item_rule, ESTIMATED_TOTAL_TRIGGERS};
pub use payment::{
    payment_method_rule, PaymentKeywords, BANK_ACCOUNT_SECTION, PAYMENT_REFERENCE_SECTION,
};
pub use schema::{
    costing_form, demo_catalog, derived, invoice_form, margin_types, payment_methods, FormKind,
    AMOUNT_GROUP,
};

use crate::config::EngineConfig;
use crate::engine::{
    DependencyRule, Failure, FormController, Recompute, Routine, ValidationRule,
};
use crate::error::RegistryError;
use crate::form::FieldIdentity;

fn custom(name: &str) -> FieldIdentity {
    FieldIdentity::Custom(name.to_string())
}

/// Register every invoice dependency and validation rule on `controller`
pub fn install_invoice_rules<R: Recompute>(
    controller: &mut FormController<R>,
    config: &EngineConfig,
) -> Result<(), RegistryError> {
    controller.register_validation_rule(
        custom("client_name"),
        ValidationRule::required().min_length(2),
    );
    controller.register_validation_rule(FieldIdentity::PaymentMethod, ValidationRule::required());
    controller.register_validation_rule(
        custom("payment_reference"),
        ValidationRule::required().min_length(3),
    );
    controller.register_validation_rule(
        custom("iban"),
        ValidationRule::required()
            .min_length(15)
            .message(Failure::MinLength, "Enter a complete IBAN."),
    );
    controller.register_validation_rule(FieldIdentity::CatalogItem, ValidationRule::required());
    controller.register_validation_rule(
        FieldIdentity::Quantity,
        ValidationRule::required().min(1.0),
    );
    controller.register_validation_rule(
        FieldIdentity::UnitPrice,
        ValidationRule::required().min(0.0),
    );
    controller.register_validation_rule(
        FieldIdentity::Discount,
        ValidationRule::optional().min(0.0).max(100.0),
    );
    controller.register_validation_rule(
        FieldIdentity::AmountPaid,
        ValidationRule::optional().min(0.0),
    );
    controller.register_validation_rule(
        custom("internal_note"),
        ValidationRule::optional().min_length(5),
    );

    controller.register_dependency_rule(
        FieldIdentity::PaymentMethod,
        payment_method_rule(PaymentKeywords::from_config(config)),
    )?;
    controller.register_dependency_rule(FieldIdentity::CatalogItem, catalog_item_rule())?;
    for identity in ESTIMATED_TOTAL_TRIGGERS {
        controller.register_dependency_rule(
            identity.clone(),
            DependencyRule::trigger(Routine::EstimatedTotal),
        )?;
    }
    controller.register_dependency_rule(FieldIdentity::AmountPaid, amount_paid_rule())?;

    tracing::debug!(
        dependencies = controller.dependencies().len(),
        validations = controller.validations().len(),
        "invoice rules installed"
    );
    Ok(())
}

/// Register every product costing dependency and validation rule
pub fn install_costing_rules<R: Recompute>(
    controller: &mut FormController<R>,
    config: &EngineConfig,
) -> Result<(), RegistryError> {
    controller.register_validation_rule(
        custom("product_name"),
        ValidationRule::required().min_length(2),
    );
    controller.register_validation_rule(
        FieldIdentity::Weight,
        ValidationRule::required().min(0.01),
    );
    // Every cost input is validated through its group tag
    controller.register_validation_rule(
        custom(AMOUNT_GROUP),
        ValidationRule::optional().min(0.0),
    );
    controller.register_validation_rule(FieldIdentity::MarginType, ValidationRule::required());
    controller.register_validation_rule(
        FieldIdentity::MarginValue,
        ValidationRule::optional().min(0.0),
    );

    for identity in COST_PREVIEW_TRIGGERS {
        controller.register_dependency_rule(
            identity.clone(),
            DependencyRule::trigger(Routine::CostMarginPreview),
        )?;
    }
    controller.register_dependency_rule(
        FieldIdentity::MarginType,
        margin_type_rule(&config.currency_symbol),
    )?;

    tracing::debug!(
        dependencies = controller.dependencies().len(),
        validations = controller.validations().len(),
        "costing rules installed"
    );
    Ok(())
}
