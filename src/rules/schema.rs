//! Declared layouts of the invoice and product costing forms

use super::payment::{BANK_ACCOUNT_SECTION, PAYMENT_REFERENCE_SECTION};
use crate::form::{ChoiceOption, Field, FormSnapshot, LayoutScope, Section};

/// Derived display fields written by recomputation
pub mod derived {
    pub const ESTIMATED_TOTAL: &str = "estimated_total";
    pub const BALANCE_DUE: &str = "balance_due";
    pub const CHANGE_DUE: &str = "change_due";
    pub const TOTAL_COST: &str = "total_cost";
    pub const MARGIN_AMOUNT: &str = "margin_amount";
    pub const SUGGESTED_PRICE: &str = "suggested_price";
    pub const EFFECTIVE_MARGIN: &str = "effective_margin";
}

/// Group tag shared by every monetary cost input
pub const AMOUNT_GROUP: &str = "amount";

/// Which form the host presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormKind {
    #[default]
    Invoice,
    Costing,
}

pub fn payment_methods() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("cash", "Espèces"),
        ChoiceOption::new("card", "Carte"),
        ChoiceOption::new("cheque", "Chèque"),
        ChoiceOption::new("transfer", "Virement bancaire"),
    ]
}

pub fn demo_catalog() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::priced("ring-gold", "Gold ring", 125.5),
        ChoiceOption::priced("chain-silver", "Silver chain", 48.0),
        ChoiceOption::priced("earrings-pearl", "Pearl earrings", 89.9),
        ChoiceOption::new("repair", "Repair (quoted)"),
    ]
}

/// Invoice with a single line item and a payment summary
pub fn invoice_form(catalog: Vec<ChoiceOption>) -> FormSnapshot {
    FormSnapshot::new("Invoice")
        .with_section(Section::new("customer"))
        .with_section(Section::new("payment"))
        .with_section(Section::new(PAYMENT_REFERENCE_SECTION).within("payment"))
        .with_section(Section::new(BANK_ACCOUNT_SECTION).within("payment").hidden())
        .with_section(Section::new("line_item"))
        .with_section(Section::new("summary"))
        .with_field(Field::text("client_name", "Client").in_section("customer"))
        .with_field(
            Field::text("internal_note", "Internal note")
                .in_section("customer")
                .scoped(LayoutScope::DesktopOnly),
        )
        .with_field(
            Field::choice("payment_method", "Payment method", payment_methods())
                .in_section("payment"),
        )
        .with_field(
            Field::text("payment_reference", "Payment reference")
                .in_section(PAYMENT_REFERENCE_SECTION),
        )
        .with_field(Field::text("iban", "IBAN").in_section(BANK_ACCOUNT_SECTION))
        .with_field(Field::text("bank_name", "Bank").in_section(BANK_ACCOUNT_SECTION))
        .with_field(Field::choice("product", "Product", catalog).in_section("line_item"))
        .with_field(
            Field::number("quantity", "Quantity")
                .initial("1")
                .in_section("line_item"),
        )
        .with_field(Field::number("unit_price", "Unit price").in_section("line_item"))
        .with_field(
            Field::number("discount", "Discount")
                .with_unit("%")
                .in_section("line_item"),
        )
        .with_field(
            Field::display(derived::ESTIMATED_TOTAL, "Estimated total").in_section("summary"),
        )
        .with_field(Field::number("amount_paid", "Amount paid").in_section("summary"))
        .with_field(Field::display(derived::BALANCE_DUE, "Balance due").in_section("summary"))
        .with_field(Field::display(derived::CHANGE_DUE, "Change").in_section("summary"))
}

pub fn margin_types(currency_symbol: &str) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("percent", "Percentage (%)"),
        ChoiceOption::new("fixed", &format!("Fixed amount ({currency_symbol})")),
    ]
}

/// Product costing sheet with a live cost and margin preview
pub fn costing_form(currency_symbol: &str) -> FormSnapshot {
    let cost = |name: &str, label: &str| {
        Field::number(name, label)
            .in_group(AMOUNT_GROUP)
            .with_unit(currency_symbol)
            .in_section("costs")
    };
    let preview = |name: &str, label: &str| {
        Field::display(name, label)
            .with_unit(currency_symbol)
            .in_section("preview")
    };
    FormSnapshot::new("Product costing")
        .with_section(Section::new("product"))
        .with_section(Section::new("costs"))
        .with_section(Section::new("pricing"))
        .with_section(Section::new("preview"))
        .with_field(Field::text("product_name", "Product name").in_section("product"))
        .with_field(
            Field::number("weight", "Weight")
                .with_unit("g")
                .in_section("costs"),
        )
        .with_field(cost("purchase_price", "Purchase price per g"))
        .with_field(cost("labor_cost", "Labor cost"))
        .with_field(cost("stone_cost", "Stone cost"))
        .with_field(cost("other_cost", "Other cost"))
        .with_field(
            Field::choice("margin_type", "Margin type", margin_types(currency_symbol))
                .initial("percent")
                .in_section("pricing"),
        )
        .with_field(
            Field::number("margin_value", "Margin")
                .with_unit("%")
                .in_section("pricing"),
        )
        .with_field(
            Field::number("selling_price", "Selling price")
                .in_group(AMOUNT_GROUP)
                .with_unit(currency_symbol)
                .in_section("pricing"),
        )
        .with_field(preview(derived::TOTAL_COST, "Total cost"))
        .with_field(preview(derived::MARGIN_AMOUNT, "Margin amount"))
        .with_field(preview(derived::SUGGESTED_PRICE, "Suggested price"))
        .with_field(preview(derived::EFFECTIVE_MARGIN, "Effective margin"))
}
