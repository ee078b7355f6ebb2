//! Dependency rules: what happens to other fields when one changes

use super::recompute::{Recompute, Routine};
use crate::error::RegistryError;
use crate::form::{ChoiceOption, FieldIdentity, FormSnapshot};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// The two trigger kinds rules react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Discrete selection or focus loss; dispatched immediately
    Committed,
    /// Continuous input; dispatched after the debounce window
    Changing,
}

/// What a reaction gets to see about its source field
#[derive(Debug, Clone, PartialEq)]
pub struct SourceValue {
    pub field: String,
    pub value: String,
    /// Selected option metadata for choice fields
    pub option: Option<ChoiceOption>,
}

impl SourceValue {
    /// Display label of the selected option, empty when there is none
    pub fn label(&self) -> &str {
        self.option.as_ref().map(|o| o.label.as_str()).unwrap_or("")
    }

    pub fn price(&self) -> Option<f64> {
        self.option.as_ref().and_then(|o| o.price)
    }
}

type ReactionFn = dyn Fn(&SourceValue, &mut Effects<'_>);

/// A reaction body plus the fields it declares it may write
#[derive(Clone)]
pub struct Reaction {
    writes: Vec<FieldIdentity>,
    run: Rc<ReactionFn>,
}

impl Reaction {
    pub fn new(
        writes: Vec<FieldIdentity>,
        run: impl Fn(&SourceValue, &mut Effects<'_>) + 'static,
    ) -> Self {
        Self {
            writes,
            run: Rc::new(run),
        }
    }

    /// A reaction that only invokes `routine`
    pub fn recompute(routine: Routine) -> Self {
        Self::new(Vec::new(), move |_, effects| effects.recompute(routine))
    }

    pub fn writes(&self) -> &[FieldIdentity] {
        &self.writes
    }

    pub fn apply(&self, source: &SourceValue, effects: &mut Effects<'_>) {
        (self.run)(source, effects)
    }
}

impl fmt::Debug for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaction")
            .field("writes", &self.writes)
            .finish_non_exhaustive()
    }
}

/// Reactions bound to one field identity, at most one per trigger kind
#[derive(Debug, Clone, Default)]
pub struct DependencyRule {
    on_committed: Option<Reaction>,
    on_changing: Option<Reaction>,
}

impl DependencyRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_commit(mut self, reaction: Reaction) -> Self {
        self.on_committed = Some(reaction);
        self
    }

    pub fn on_change(mut self, reaction: Reaction) -> Self {
        self.on_changing = Some(reaction);
        self
    }

    /// Same reaction for both trigger kinds
    pub fn on_both(self, reaction: Reaction) -> Self {
        self.on_commit(reaction.clone()).on_change(reaction)
    }

    /// Pure trigger: recompute `routine` on commit and on debounced input
    pub fn trigger(routine: Routine) -> Self {
        Self::new().on_both(Reaction::recompute(routine))
    }

    pub fn reaction(&self, trigger: Trigger) -> Option<&Reaction> {
        match trigger {
            Trigger::Committed => self.on_committed.as_ref(),
            Trigger::Changing => self.on_changing.as_ref(),
        }
    }

    fn writes(&self) -> impl Iterator<Item = &FieldIdentity> {
        self.on_committed
            .iter()
            .chain(self.on_changing.iter())
            .flat_map(|r| r.writes.iter())
    }
}

/// Dependency rules keyed by identity; registering again replaces
#[derive(Debug, Default)]
pub struct DependencyRegistry {
    rules: HashMap<FieldIdentity, DependencyRule>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rule for `identity`. A rule that writes into its
    /// own trigger is rejected and the previous rule stays in place.
    pub fn register(
        &mut self,
        identity: FieldIdentity,
        rule: DependencyRule,
    ) -> Result<Option<DependencyRule>, RegistryError> {
        if rule.writes().any(|target| *target == identity) {
            return Err(RegistryError::SelfWrite { identity });
        }
        Ok(self.rules.insert(identity, rule))
    }

    pub fn get(&self, identity: &FieldIdentity) -> Option<&DependencyRule> {
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

/// The side effects a reaction may perform on the live form
pub struct Effects<'a> {
    form: &'a mut FormSnapshot,
    recompute: &'a mut dyn Recompute,
    allowed_writes: &'a [FieldIdentity],
    written: Vec<String>,
}

impl<'a> Effects<'a> {
    pub fn new(
        form: &'a mut FormSnapshot,
        recompute: &'a mut dyn Recompute,
        allowed_writes: &'a [FieldIdentity],
    ) -> Self {
        Self {
            form,
            recompute,
            allowed_writes,
            written: Vec::new(),
        }
    }

    /// Read-only view of the form
    pub fn form(&self) -> &FormSnapshot {
        self.form
    }

    /// Show or hide a section; missing sections are ignored
    pub fn set_section_visible(&mut self, section: &str, visible: bool) {
        if !self.form.set_section_visible(section, visible) {
            tracing::trace!(section, "visibility target not in this layout");
        }
    }

    /// Enable or disable a field; missing fields are ignored
    pub fn set_enabled(&mut self, target: &FieldIdentity, enabled: bool) {
        if let Some(field) = self.form.field_mut(target.field_name()) {
            field.enabled = enabled;
        }
    }

    /// Change the unit label shown beside a field
    pub fn set_unit(&mut self, target: &FieldIdentity, unit: &str) {
        if let Some(field) = self.form.field_mut(target.field_name()) {
            field.unit = Some(unit.to_string());
        }
    }

    /// Write a value into a declared target; missing fields are ignored
    pub fn write_value(&mut self, target: &FieldIdentity, value: &str) {
        if !self.allowed_writes.contains(target) {
            tracing::warn!(%target, "reaction wrote to an undeclared target, ignoring");
            return;
        }
        let name = target.field_name();
        if self.form.set_value(name, value) {
            self.written.push(name.to_string());
        } else {
            tracing::trace!(%target, "write target not in this layout");
        }
    }

    /// Invoke a recomputation routine now
    pub fn recompute(&mut self, routine: Routine) {
        tracing::debug!(%routine, "recompute");
        routine.run(&mut *self.recompute, &mut *self.form);
    }

    /// Names of the fields written so far, in order
    pub fn into_written(self) -> Vec<String> {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::recompute::{MockRecompute, NoRecompute};
    use crate::form::{Field, Section};

    fn form() -> FormSnapshot {
        FormSnapshot::new("Line item")
            .with_section(Section::new("bank_account").hidden())
            .with_field(Field::number("unit_price", "Unit price"))
    }

    fn source(value: &str) -> SourceValue {
        SourceValue {
            field: "product".to_string(),
            value: value.to_string(),
            option: None,
        }
    }

    mod registry {
        use super::*;

        #[test]
        fn test_register_and_get() {
            let mut registry = DependencyRegistry::new();
            let trigger = DependencyRule::trigger(Routine::EstimatedTotal);
            let previous = registry.register(FieldIdentity::Quantity, trigger).unwrap();
            assert!(previous.is_none());
            assert!(registry.contains(&FieldIdentity::Quantity));
            assert_eq!(registry.len(), 1);
        }

        #[test]
        fn test_register_replaces() {
            let mut registry = DependencyRegistry::new();
            let trigger = DependencyRule::trigger(Routine::EstimatedTotal);
            registry.register(FieldIdentity::Quantity, trigger).unwrap();
            let previous = registry
                .register(
                    FieldIdentity::Quantity,
                    DependencyRule::new().on_commit(Reaction::recompute(Routine::InvoiceSummary)),
                )
                .unwrap();
            assert!(previous.is_some());
            assert_eq!(registry.len(), 1);
            let rule = registry.get(&FieldIdentity::Quantity).unwrap();
            assert!(rule.reaction(Trigger::Changing).is_none());
        }

        #[test]
        fn test_self_write_rejected() {
            let mut registry = DependencyRegistry::new();
            let rule = DependencyRule::new().on_change(Reaction::new(
                vec![FieldIdentity::UnitPrice],
                |_, _| {},
            ));
            let err = registry.register(FieldIdentity::UnitPrice, rule).unwrap_err();
            assert_eq!(
                err,
                RegistryError::SelfWrite {
                    identity: FieldIdentity::UnitPrice
                }
            );
            assert!(registry.is_empty());
        }

        #[test]
        fn test_self_write_keeps_previous_rule() {
            let mut registry = DependencyRegistry::new();
            let trigger = DependencyRule::trigger(Routine::EstimatedTotal);
            registry.register(FieldIdentity::UnitPrice, trigger).unwrap();
            let bad = DependencyRule::new()
                .on_commit(Reaction::new(vec![FieldIdentity::UnitPrice], |_, _| {}));
            assert!(registry.register(FieldIdentity::UnitPrice, bad).is_err());
            assert!(registry
                .get(&FieldIdentity::UnitPrice)
                .and_then(|r| r.reaction(Trigger::Changing))
                .is_some());
        }
    }

    mod effects {
        use super::*;

        #[test]
        fn test_write_declared_target() {
            let mut form = form();
            let mut recompute = NoRecompute;
            let allowed = [FieldIdentity::UnitPrice];
            let mut effects = Effects::new(&mut form, &mut recompute, &allowed);
            effects.write_value(&FieldIdentity::UnitPrice, "10.00");
            assert_eq!(effects.into_written(), vec!["unit_price".to_string()]);
            assert_eq!(form.value("unit_price"), Some("10.00"));
        }

        #[test]
        fn test_undeclared_write_is_ignored() {
            let mut form = form();
            let mut recompute = NoRecompute;
            let mut effects = Effects::new(&mut form, &mut recompute, &[]);
            effects.write_value(&FieldIdentity::UnitPrice, "10.00");
            assert!(effects.into_written().is_empty());
            assert_eq!(form.value("unit_price"), Some(""));
        }

        #[test]
        fn test_missing_targets_are_noops() {
            let mut form = form();
            let mut recompute = NoRecompute;
            let allowed = [FieldIdentity::Discount];
            let mut effects = Effects::new(&mut form, &mut recompute, &allowed);
            effects.set_section_visible("payment_reference", false);
            effects.write_value(&FieldIdentity::Discount, "5");
            effects.set_section_visible("bank_account", true);
            assert!(effects.into_written().is_empty());
            assert!(!form.section("bank_account").unwrap().hidden);
        }

        #[test]
        fn test_recompute_calls_collaborator() {
            let mut form = form();
            let mut recompute = MockRecompute::new();
            recompute.expect_estimated_total().times(1).return_const(());
            let mut effects = Effects::new(&mut form, &mut recompute, &[]);
            let reaction = Reaction::recompute(Routine::EstimatedTotal);
            reaction.apply(&source(""), &mut effects);
        }

        #[test]
        fn test_source_value_accessors() {
            let mut value = source("p1");
            assert_eq!(value.label(), "");
            assert_eq!(value.price(), None);
            value.option = Some(ChoiceOption::priced("p1", "Ring", 125.5));
            assert_eq!(value.label(), "Ring");
            assert_eq!(value.price(), Some(125.5));
        }
    }
}
