//! Rule engine
//!
//! Dependency and validation tables, the visibility oracle they share, and
//! the controller that routes input events through them.

mod controller;
mod debounce;
mod dependency;
mod dispatch;
mod recompute;
mod validation;
pub mod visibility;

pub use controller::{FieldError, FormController, SubmitOutcome};
pub use debounce::Debouncer;
pub use dependency::{
    DependencyRegistry, DependencyRule, Effects, Reaction, SourceValue, Trigger,
};
pub use dispatch::{Binding, FieldEvent};
pub use recompute::{NoRecompute, Recompute, Routine};
pub use validation::{evaluate, Failure, Messages, ValidationRegistry, ValidationRule};

#[cfg(test)]
pub use recompute::MockRecompute;
