//! Validation rules and the per-field check

use crate::form::{parse_number, FieldIdentity, Validity};
use std::collections::HashMap;

/// The kinds of failure a rule can report, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Required,
    MinLength,
    Min,
    Max,
}

/// Message templates; `{min_length}`, `{min}` and `{max}` are substituted
#[derive(Debug, Clone, PartialEq)]
pub struct Messages {
    pub required: String,
    pub min_length: String,
    pub min: String,
    pub max: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "This field is required.".to_string(),
            min_length: "Enter at least {min_length} characters.".to_string(),
            min: "Value must be at least {min}.".to_string(),
            max: "Value must be at most {max}.".to_string(),
        }
    }
}

/// Constraint set for one field identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub messages: Messages,
}

impl ValidationRule {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn optional() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn message(mut self, failure: Failure, template: &str) -> Self {
        let slot = match failure {
            Failure::Required => &mut self.messages.required,
            Failure::MinLength => &mut self.messages.min_length,
            Failure::Min => &mut self.messages.min,
            Failure::Max => &mut self.messages.max,
        };
        *slot = template.to_string();
        self
    }

    /// Render the message for `failure` with this rule's limits filled in
    pub fn render(&self, failure: Failure) -> String {
        let template = match failure {
            Failure::Required => &self.messages.required,
            Failure::MinLength => &self.messages.min_length,
            Failure::Min => &self.messages.min,
            Failure::Max => &self.messages.max,
        };
        template
            .replace(
                "{min_length}",
                &self.min_length.map(|n| n.to_string()).unwrap_or_default(),
            )
            .replace("{min}", &self.min.map(format_limit).unwrap_or_default())
            .replace("{max}", &self.max.map(format_limit).unwrap_or_default())
    }

    /// First failing check for `value`, if any
    pub fn first_failure(&self, value: &str) -> Option<Failure> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return self.required.then_some(Failure::Required);
        }
        if let Some(min_length) = self.min_length {
            if trimmed.chars().count() < min_length {
                return Some(Failure::MinLength);
            }
        }
        let number = parse_number(trimmed);
        if let (Some(min), Some(n)) = (self.min, number) {
            if n < min {
                return Some(Failure::Min);
            }
        }
        if let (Some(max), Some(n)) = (self.max, number) {
            if n > max {
                return Some(Failure::Max);
            }
        }
        None
    }
}

fn format_limit(limit: f64) -> String {
    if limit.fract() == 0.0 {
        format!("{limit:.0}")
    } else {
        limit.to_string()
    }
}

/// Evaluate one field. Hidden fields are valid whatever they hold.
pub fn evaluate(visible: bool, rule: Option<&ValidationRule>, value: &str) -> Validity {
    if !visible {
        return Validity::Valid;
    }
    let Some(rule) = rule else {
        return Validity::Valid;
    };
    match rule.first_failure(value) {
        Some(failure) => Validity::Invalid(rule.render(failure)),
        None => Validity::Valid,
    }
}

/// Validation rules keyed by identity; registering again replaces
#[derive(Debug, Default)]
pub struct ValidationRegistry {
    rules: HashMap<FieldIdentity, ValidationRule>,
}

impl ValidationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        identity: FieldIdentity,
        rule: ValidationRule,
    ) -> Option<ValidationRule> {
        self.rules.insert(identity, rule)
    }

    pub fn get(&self, identity: &FieldIdentity) -> Option<&ValidationRule> {
        self.rules.get(identity)
    }

    pub fn contains(&self, identity: &FieldIdentity) -> bool {
        self.rules.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
