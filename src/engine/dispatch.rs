//! Input events and the field-to-rule bindings they are routed through

use super::dependency::{DependencyRegistry, Trigger};
use super::validation::ValidationRegistry;
use crate::form::{resolve_identity, FieldIdentity, FormSnapshot};
use std::collections::HashMap;

/// Raw input events as a host delivers them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// Continuous typing; carries the full new value
    Input { field: String, value: String },
    /// Discrete selection on a choice field (by option value)
    Select { field: String, value: String },
    /// Focus left the field
    Blur { field: String },
}

impl FieldEvent {
    pub fn input(field: &str, value: &str) -> Self {
        FieldEvent::Input {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn select(field: &str, value: &str) -> Self {
        FieldEvent::Select {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn blur(field: &str) -> Self {
        FieldEvent::Blur {
            field: field.to_string(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FieldEvent::Input { field, .. }
            | FieldEvent::Select { field, .. }
            | FieldEvent::Blur { field } => field,
        }
    }

    /// The trigger kind rules see for this event
    pub fn trigger(&self) -> Trigger {
        match self {
            FieldEvent::Input { .. } => Trigger::Changing,
            FieldEvent::Select { .. } | FieldEvent::Blur { .. } => Trigger::Committed,
        }
    }
}

/// Which debounced work a pending timer stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Reaction,
    Validation,
}

/// Rule identities a field is attached to, one per table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    pub dependency: Option<FieldIdentity>,
    pub validation: Option<FieldIdentity>,
}

/// Resolved identities for every field of a form, keyed by field name
#[derive(Debug, Default)]
pub struct Bindings {
    by_field: HashMap<String, Binding>,
}

impl Bindings {
    /// Resolve every field against both tables. Rebuilding replaces the
    /// previous map wholesale, so a field is never attached twice.
    pub fn resolve(
        form: &FormSnapshot,
        dependencies: &DependencyRegistry,
        validations: &ValidationRegistry,
    ) -> Self {
        let by_field = form
            .fields()
            .iter()
            .map(|field| {
                let binding = Binding {
                    dependency: resolve_identity(field, |id| dependencies.contains(id)),
                    validation: resolve_identity(field, |id| validations.contains(id)),
                };
                (field.name.clone(), binding)
            })
            .collect();
        Self { by_field }
    }

    pub fn get(&self, field: &str) -> Option<&Binding> {
        self.by_field.get(field)
    }

    pub fn dependency(&self, field: &str) -> Option<&FieldIdentity> {
        self.get(field).and_then(|b| b.dependency.as_ref())
    }

    pub fn validation(&self, field: &str) -> Option<&FieldIdentity> {
        self.get(field).and_then(|b| b.validation.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }
}
