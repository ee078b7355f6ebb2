//! Form domain layer
//!
//! Fields, sections and the identity scheme rules are keyed by.

mod field;
mod identity;
mod snapshot;

pub use field::{
    parse_number, ChoiceOption, Field, FieldValue, LayoutScope, Presentation, Validity,
};
pub use identity::{resolve_identity, FieldIdentity};
pub use snapshot::{FormSnapshot, Section};
