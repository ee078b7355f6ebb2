//! Form controller: owns one form, its rule tables and its timers

use super::debounce::Debouncer;
use super::dependency::{DependencyRegistry, DependencyRule, Effects, SourceValue, Trigger};
use super::dispatch::{Binding, Bindings, FieldEvent, Slot};
use super::recompute::Recompute;
use super::validation::{self, ValidationRegistry, ValidationRule};
use super::visibility;
use crate::config::EngineConfig;
use crate::error::RegistryError;
use crate::form::{FieldIdentity, FormSnapshot, Presentation, Validity};
use std::time::Instant;

/// One field's failure as reported by a blocked submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    /// Id of the message element associated with the field
    pub error_id: String,
    pub message: String,
}

/// Result of passing the submission gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Proceed,
    Blocked {
        /// Every visible invalid field, in form order
        errors: Vec<FieldError>,
        /// Field scrolled into view and focused (compact presentation only)
        focus: Option<String>,
    },
}

impl SubmitOutcome {
    pub fn is_proceed(&self) -> bool {
        matches!(self, SubmitOutcome::Proceed)
    }
}

/// Drives one form instance.
///
/// Rule tables belong to the controller, so several forms can live in the
/// same process without sharing state. All work happens synchronously on
/// the caller's thread; the host passes the current time in and calls
/// [`FormController::tick`] to let debounced work run.
pub struct FormController<R: Recompute> {
    form: FormSnapshot,
    dependencies: DependencyRegistry,
    validations: ValidationRegistry,
    bindings: Bindings,
    debouncer: Debouncer<(String, Slot)>,
    recompute: R,
    max_cascade_depth: usize,
}

impl<R: Recompute> FormController<R> {
    pub fn new(form: FormSnapshot, recompute: R, config: &EngineConfig) -> Self {
        let mut controller = Self {
            form,
            dependencies: DependencyRegistry::new(),
            validations: ValidationRegistry::new(),
            bindings: Bindings::default(),
            debouncer: Debouncer::new(config.debounce_window()),
            recompute,
            max_cascade_depth: config.max_cascade_depth,
        };
        controller.rebind();
        controller
    }

    pub fn form(&self) -> &FormSnapshot {
        &self.form
    }

    /// Structural access for rebuilding sections; call
    /// [`FormController::initialize`] afterwards.
    pub fn form_mut(&mut self) -> &mut FormSnapshot {
        &mut self.form
    }

    pub fn recompute_mut(&mut self) -> &mut R {
        &mut self.recompute
    }

    pub fn dependencies(&self) -> &DependencyRegistry {
        &self.dependencies
    }

    pub fn validations(&self) -> &ValidationRegistry {
        &self.validations
    }

    pub fn binding(&self, field: &str) -> Option<&Binding> {
        self.bindings.get(field)
    }

    /// Register (or replace) the dependency rule for `identity`, attach it to
    /// matching fields and evaluate it once against their current values.
    pub fn register_dependency_rule(
        &mut self,
        identity: FieldIdentity,
        rule: DependencyRule,
    ) -> Result<(), RegistryError> {
        if self.dependencies.register(identity.clone(), rule)?.is_some() {
            tracing::debug!(%identity, "replaced dependency rule");
        }
        self.rebind();
        for field in self.fields_bound_to(&identity) {
            self.dispatch(&field, Trigger::Committed, 0);
        }
        Ok(())
    }

    /// Register (or replace) the validation rule for `identity`. Fields
    /// already showing a result are checked again under the new rules.
    pub fn register_validation_rule(&mut self, identity: FieldIdentity, rule: ValidationRule) {
        if self.validations.register(identity.clone(), rule).is_some() {
            tracing::debug!(%identity, "replaced validation rule");
        }
        self.rebind();
        let shown: Vec<String> = self
            .form
            .fields()
            .iter()
            .filter(|f| f.validity != Validity::Unset)
            .map(|f| f.name.clone())
            .collect();
        for name in shown {
            self.validate_field(&name);
        }
    }

    /// Re-resolve every field and re-run every dependency rule once.
    /// Safe to call repeatedly, e.g. after a section was rebuilt.
    pub fn initialize(&mut self) {
        self.rebind();
        let bindings = &self.bindings;
        self.debouncer
            .cancel_where(|(field, _)| bindings.get(field).is_none());
        for field in self.form.field_names() {
            self.dispatch(&field, Trigger::Committed, 0);
        }
        tracing::info!(
            form = self.form.title(),
            fields = self.bindings.len(),
            "form initialized"
        );
    }

    pub fn set_presentation(&mut self, presentation: Presentation) {
        if self.form.presentation() != presentation {
            tracing::debug!(?presentation, "presentation changed");
            self.form.set_presentation(presentation);
        }
    }

    /// Feed one input event
    pub fn handle(&mut self, event: FieldEvent, now: Instant) {
        let name = event.field().to_string();
        let Some(field) = self.form.field(&name) else {
            tracing::trace!(field = %name, "event for unknown field");
            return;
        };
        if field.readonly || !field.enabled {
            tracing::debug!(field = %name, "event for inert field ignored");
            return;
        }

        match event {
            FieldEvent::Input { value, .. } => {
                self.form.set_value(&name, &value);
                self.schedule_debounced(&name, now);
            }
            FieldEvent::Select { value, .. } => {
                self.form.set_value(&name, &value);
                self.commit(&name);
            }
            FieldEvent::Blur { .. } => self.commit(&name),
        }
    }

    /// Run debounced work whose window has elapsed; returns how many ran
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.debouncer.take_due(now);
        let count = due.len();
        for (field, slot) in due {
            self.fire(&field, slot);
        }
        count
    }

    /// Run all pending debounced work immediately
    pub fn flush(&mut self) {
        for (field, slot) in self.debouncer.take_all() {
            self.fire(&field, slot);
        }
    }

    /// When the host should next call [`FormController::tick`]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    pub fn has_pending(&self) -> bool {
        !self.debouncer.is_empty()
    }

    /// Validate one field and store the result on it
    pub fn validate_field(&mut self, name: &str) -> Validity {
        let Some(field) = self.form.field(name) else {
            return Validity::Valid;
        };
        let visible = visibility::is_visible(&self.form, field);
        let rule = self
            .bindings
            .validation(name)
            .and_then(|identity| self.validations.get(identity));
        let validity = validation::evaluate(visible, rule, field.as_text());

        if let Some(field) = self.form.field_mut(name) {
            // Hidden fields carry no error state at all
            field.validity = if visible {
                validity.clone()
            } else {
                Validity::Unset
            };
        }
        validity
    }

    /// Validate every field; true when all are valid
    pub fn validate_form(&mut self) -> bool {
        let mut all_valid = true;
        for name in self.form.field_names() {
            if self.validate_field(&name).is_invalid() {
                all_valid = false;
            }
        }
        all_valid
    }

    /// Submission gate. Pending debounced work is flushed first so the
    /// decision reflects the latest values.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.flush();
        let mut errors = Vec::new();
        for name in self.form.field_names() {
            if let Validity::Invalid(message) = self.validate_field(&name) {
                let error_id = self
                    .form
                    .field(&name)
                    .map(|f| f.error_id())
                    .unwrap_or_default();
                errors.push(FieldError {
                    field: name,
                    error_id,
                    message,
                });
            }
        }

        if errors.is_empty() {
            tracing::info!(form = self.form.title(), "submission accepted");
            return SubmitOutcome::Proceed;
        }

        let focus = match self.form.presentation() {
            Presentation::Compact => errors.first().map(|e| e.field.clone()),
            Presentation::Wide => None,
        };
        if let Some(field) = &focus {
            self.form.focus(field);
        }
        tracing::info!(
            form = self.form.title(),
            errors = errors.len(),
            "submission blocked"
        );
        SubmitOutcome::Blocked { errors, focus }
    }

    fn rebind(&mut self) {
        self.bindings = Bindings::resolve(&self.form, &self.dependencies, &self.validations);
    }

    fn fields_bound_to(&self, identity: &FieldIdentity) -> Vec<String> {
        self.form
            .fields()
            .iter()
            .filter(|f| self.bindings.dependency(&f.name) == Some(identity))
            .map(|f| f.name.clone())
            .collect()
    }

    fn schedule_debounced(&mut self, name: &str, now: Instant) {
        let reacts = self
            .bindings
            .dependency(name)
            .and_then(|identity| self.dependencies.get(identity))
            .is_some_and(|rule| rule.reaction(Trigger::Changing).is_some());
        if reacts {
            tracing::trace!(field = name, "debounce reaction");
            self.debouncer.schedule((name.to_string(), Slot::Reaction), now);
        }
        if self.bindings.validation(name).is_some() {
            tracing::trace!(field = name, "debounce validation");
            self.debouncer
                .schedule((name.to_string(), Slot::Validation), now);
        }
    }

    fn commit(&mut self, name: &str) {
        // A committed value supersedes whatever input was still pending
        self.debouncer.cancel(&(name.to_string(), Slot::Reaction));
        self.debouncer.cancel(&(name.to_string(), Slot::Validation));
        self.dispatch(name, Trigger::Committed, 0);
        self.validate_field(name);
    }

    fn fire(&mut self, name: &str, slot: Slot) {
        match slot {
            Slot::Reaction => self.dispatch(name, Trigger::Changing, 0),
            Slot::Validation => {
                self.validate_field(name);
            }
        }
    }

    fn dispatch(&mut self, name: &str, trigger: Trigger, depth: usize) {
        if depth > self.max_cascade_depth {
            tracing::warn!(field = name, depth, "cascade depth limit reached, stopping");
            return;
        }
        let Some(identity) = self.bindings.dependency(name).cloned() else {
            return;
        };
        let Some(reaction) = self
            .dependencies
            .get(&identity)
            .and_then(|rule| rule.reaction(trigger))
            .cloned()
        else {
            return;
        };
        let Some(field) = self.form.field(name) else {
            return;
        };
        let source = SourceValue {
            field: name.to_string(),
            value: field.as_text().to_string(),
            option: field.selected_option().cloned(),
        };
        tracing::debug!(field = name, %identity, ?trigger, "dispatch");

        let written = {
            let mut effects =
                Effects::new(&mut self.form, &mut self.recompute, reaction.writes());
            reaction.apply(&source, &mut effects);
            effects.into_written()
        };

        for target in written {
            let shows_state = self
                .form
                .field(&target)
                .is_some_and(|f| f.validity != Validity::Unset);
            if shows_state {
                self.validate_field(&target);
            }
            self.dispatch(&target, Trigger::Committed, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dependency::Reaction;
    use crate::engine::recompute::{MockRecompute, Routine};
    use crate::form::{ChoiceOption, Field, LayoutScope, Section};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn line_item() -> FormSnapshot {
        FormSnapshot::new("Line item")
            .with_section(Section::new("details"))
            .with_field(Field::choice(
                "product",
                "Product",
                vec![
                    ChoiceOption::priced("ring", "Ring", 125.5),
                    ChoiceOption::new("service", "Service"),
                ],
            ))
            .with_field(Field::number("quantity", "Quantity").initial("1"))
            .with_field(Field::number("unit_price", "Unit price"))
            .with_field(Field::text("reference", "Reference").in_section("details"))
            .with_field(Field::text("notes", "Notes"))
    }

    fn lenient_mock() -> MockRecompute {
        let mut mock = MockRecompute::new();
        mock.expect_estimated_total().return_const(());
        mock.expect_cost_margin_preview().return_const(());
        mock.expect_invoice_summary().return_const(());
        mock
    }

    /// Controller whose mock has no expectations left after setup
    fn controller(
        setup: impl FnOnce(&mut FormController<MockRecompute>),
    ) -> FormController<MockRecompute> {
        let mut controller =
            FormController::new(line_item(), lenient_mock(), &EngineConfig::default());
        setup(&mut controller);
        controller.recompute_mut().checkpoint();
        controller
    }

    fn catalog_rule() -> DependencyRule {
        DependencyRule::new().on_commit(Reaction::new(
            vec![FieldIdentity::UnitPrice],
            |source, effects| {
                if let Some(price) = source.price() {
                    effects.write_value(&FieldIdentity::UnitPrice, &format!("{price:.2}"));
                    effects.recompute(Routine::EstimatedTotal);
                }
            },
        ))
    }

    mod dispatching {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_unregistered_field_is_noop() {
            let mut controller = controller(|_| {});
            let now = Instant::now();
            controller.handle(FieldEvent::input("notes", "hello"), now);
            controller.handle(FieldEvent::blur("notes"), now);
            assert_eq!(controller.tick(now + ms(500)), 0);
            assert_eq!(controller.form().value("notes"), Some("hello"));
        }

        #[test]
        fn test_unknown_field_is_noop() {
            let mut controller = controller(|_| {});
            controller.handle(FieldEvent::blur("ghost"), Instant::now());
            assert!(!controller.has_pending());
        }

        #[test]
        fn test_catalog_selection_fills_price_and_recomputes_once() {
            let mut controller = controller(|c| {
                c.register_dependency_rule(FieldIdentity::CatalogItem, catalog_rule())
                    .unwrap();
            });
            controller
                .recompute_mut()
                .expect_estimated_total()
                .times(1)
                .return_const(());

            controller.handle(FieldEvent::select("product", "ring"), Instant::now());
            assert_eq!(controller.form().value("unit_price"), Some("125.50"));
        }

        #[test]
        fn test_option_without_price_writes_nothing() {
            let mut controller = controller(|c| {
                c.register_dependency_rule(FieldIdentity::CatalogItem, catalog_rule())
                    .unwrap();
            });
            controller.handle(FieldEvent::select("product", "service"), Instant::now());
            assert_eq!(controller.form().value("unit_price"), Some(""));
        }

        #[test]
        fn test_debounced_input_coalesces() {
            let mut controller = controller(|c| {
                c.register_dependency_rule(
                    FieldIdentity::Quantity,
                    DependencyRule::trigger(Routine::EstimatedTotal),
                )
                .unwrap();
            });
            let seen = Arc::new(Mutex::new(Vec::new()));
            let recorded = Arc::clone(&seen);
            controller
                .recompute_mut()
                .expect_estimated_total()
                .times(1)
                .returning(move |form| {
                    if let Ok(mut seen) = recorded.lock() {
                        seen.push(form.value("quantity").unwrap_or("").to_string());
                    }
                });

            let start = Instant::now();
            let mut typed = String::new();
            for (i, c) in "12345".chars().enumerate() {
                typed.push(c);
                let at = start + ms(i as u64 * 25);
                controller.handle(FieldEvent::input("quantity", &typed), at);
            }
            // Last keystroke at 100ms
            assert_eq!(controller.tick(start + ms(240)), 0);
            assert_eq!(controller.tick(start + ms(250)), 1);
            assert_eq!(controller.tick(start + ms(1000)), 0);
            assert_eq!(*seen.lock().unwrap(), vec!["12345".to_string()]);
        }

        #[test]
        fn test_commit_cancels_pending_input() {
            let mut controller = controller(|c| {
                c.register_dependency_rule(
                    FieldIdentity::Quantity,
                    DependencyRule::trigger(Routine::EstimatedTotal),
                )
                .unwrap();
            });
            controller
                .recompute_mut()
                .expect_estimated_total()
                .times(1)
                .return_const(());

            let start = Instant::now();
            controller.handle(FieldEvent::input("quantity", "4"), start);
            controller.handle(FieldEvent::blur("quantity"), start + ms(10));
            assert_eq!(controller.tick(start + ms(500)), 0);
        }

        #[test]
        fn test_inert_fields_ignore_events() {
            let mut controller = controller(|c| {
                c.register_dependency_rule(
                    FieldIdentity::Quantity,
                    DependencyRule::trigger(Routine::EstimatedTotal),
                )
                .unwrap();
                if let Some(field) = c.form_mut().field_mut("quantity") {
                    field.enabled = false;
                }
            });
            controller.handle(FieldEvent::input("quantity", "9"), Instant::now());
            assert_eq!(controller.form().value("quantity"), Some("1"));
            assert!(!controller.has_pending());
        }
    }

    mod registration {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_registration_evaluates_once() {
            let mut mock = MockRecompute::new();
            mock.expect_estimated_total().times(1).return_const(());
            let mut controller =
                FormController::new(line_item(), mock, &EngineConfig::default());
            controller
                .register_dependency_rule(
                    FieldIdentity::Quantity,
                    DependencyRule::trigger(Routine::EstimatedTotal),
                )
                .unwrap();
            controller.recompute_mut().checkpoint();
        }

        #[test]
        fn test_reregistration_keeps_one_listener() {
            let mut controller = controller(|c| {
                for _ in 0..2 {
                    c.register_dependency_rule(
                        FieldIdentity::Quantity,
                        DependencyRule::trigger(Routine::EstimatedTotal),
                    )
                    .unwrap();
                }
                c.initialize();
                c.initialize();
            });
            assert_eq!(controller.dependencies().len(), 1);
            controller
                .recompute_mut()
                .expect_estimated_total()
                .times(1)
                .return_const(());
            controller.handle(FieldEvent::blur("quantity"), Instant::now());
        }

        #[test]
        fn test_replacement_rule_takes_over() {
            let mut controller = controller(|c| {
                c.register_dependency_rule(
                    FieldIdentity::Quantity,
                    DependencyRule::trigger(Routine::EstimatedTotal),
                )
                .unwrap();
                c.register_dependency_rule(
                    FieldIdentity::Quantity,
                    DependencyRule::trigger(Routine::InvoiceSummary),
                )
                .unwrap();
            });
            controller
                .recompute_mut()
                .expect_invoice_summary()
                .times(1)
                .return_const(());
            controller.handle(FieldEvent::blur("quantity"), Instant::now());
        }

        #[test]
        fn test_self_write_rejected_at_registration() {
            let mut controller = controller(|_| {});
            let rule = DependencyRule::new().on_commit(Reaction::new(
                vec![FieldIdentity::Quantity],
                |_, effects| effects.write_value(&FieldIdentity::Quantity, "0"),
            ));
            let err = controller
                .register_dependency_rule(FieldIdentity::Quantity, rule)
                .unwrap_err();
            assert_eq!(
                err,
                RegistryError::SelfWrite {
                    identity: FieldIdentity::Quantity
                }
            );
            assert!(controller.binding("quantity").is_some_and(|b| b.dependency.is_none()));
        }

        #[test]
        fn test_name_identity_beats_group_identity() {
            let mut controller = controller(|c| {
                if let Some(field) = c.form_mut().field_mut("quantity") {
                    field.group = Some("amount".to_string());
                }
                c.register_validation_rule(
                    FieldIdentity::Custom("amount".to_string()),
                    ValidationRule::optional().min(0.0),
                );
                c.register_validation_rule(
                    FieldIdentity::Quantity,
                    ValidationRule::required().min(1.0),
                );
            });
            assert_eq!(
                controller.binding("quantity").and_then(|b| b.validation.clone()),
                Some(FieldIdentity::Quantity)
            );
            controller.form_mut().set_value("quantity", "0");
            assert_eq!(
                controller.validate_field("quantity"),
                Validity::Invalid("Value must be at least 1.".to_string())
            );
        }

        #[test]
        fn test_initialize_picks_up_rebuilt_section() {
            let mut controller = controller(|c| {
                c.register_dependency_rule(FieldIdentity::CatalogItem, catalog_rule())
                    .unwrap();
            });
            controller.form_mut().insert_field(
                Field::choice(
                    "product",
                    "Product",
                    vec![ChoiceOption::priced("chain", "Chain", 80.0)],
                )
                .initial("chain"),
            );
            controller
                .recompute_mut()
                .expect_estimated_total()
                .times(1)
                .return_const(());
            controller.initialize();
            assert_eq!(controller.form().value("unit_price"), Some("80.00"));
        }
    }

    mod validating {
        use super::*;
        use pretty_assertions::assert_eq;

        fn validated() -> FormController<MockRecompute> {
            controller(|c| {
                c.register_validation_rule(
                    FieldIdentity::Custom("reference".to_string()),
                    ValidationRule::required().min_length(3),
                );
                c.register_validation_rule(
                    FieldIdentity::Quantity,
                    ValidationRule::required().min(1.0),
                );
            })
        }

        #[test]
        fn test_blur_validates_immediately() {
            let mut controller = validated();
            controller.handle(FieldEvent::blur("reference"), Instant::now());
            let field = controller.form().field("reference").unwrap();
            assert_eq!(
                field.validity,
                Validity::Invalid("This field is required.".to_string())
            );
        }

        #[test]
        fn test_input_validates_after_window() {
            let mut controller = validated();
            let start = Instant::now();
            controller.handle(FieldEvent::input("quantity", "0"), start);
            assert_eq!(controller.form().field("quantity").unwrap().validity, Validity::Unset);
            controller.tick(start + ms(150));
            assert!(controller.form().field("quantity").unwrap().validity.is_invalid());
        }

        #[test]
        fn test_fields_debounce_independently() {
            let mut controller = validated();
            let start = Instant::now();
            controller.handle(FieldEvent::input("quantity", "0"), start);
            controller.handle(FieldEvent::input("reference", "a"), start + ms(100));
            assert_eq!(controller.tick(start + ms(150)), 1);
            assert!(controller.form().field("quantity").unwrap().validity.is_invalid());
            assert_eq!(controller.form().field("reference").unwrap().validity, Validity::Unset);
            assert_eq!(controller.tick(start + ms(250)), 1);
        }

        #[test]
        fn test_hiding_clears_error() {
            let mut controller = validated();
            controller.handle(FieldEvent::blur("reference"), Instant::now());
            controller.form_mut().set_section_visible("details", false);
            assert_eq!(controller.validate_field("reference"), Validity::Valid);
            assert_eq!(controller.form().field("reference").unwrap().validity, Validity::Unset);
        }

        #[test]
        fn test_replacing_rule_rechecks_shown_result() {
            let mut controller = validated();
            let now = Instant::now();
            controller.handle(FieldEvent::input("reference", "AB"), now);
            controller.handle(FieldEvent::blur("reference"), now);
            assert!(controller.form().field("reference").unwrap().validity.is_invalid());

            controller.register_validation_rule(
                FieldIdentity::Custom("reference".to_string()),
                ValidationRule::required().min_length(2),
            );
            assert_eq!(controller.form().field("reference").unwrap().validity, Validity::Valid);
            // Untouched fields stay without a result
            assert_eq!(controller.form().field("quantity").unwrap().validity, Validity::Unset);
        }

        #[test]
        fn test_fixing_value_clears_error() {
            let mut controller = validated();
            let now = Instant::now();
            controller.handle(FieldEvent::blur("reference"), now);
            controller.handle(FieldEvent::input("reference", "INV-1"), now);
            controller.handle(FieldEvent::blur("reference"), now);
            assert_eq!(controller.form().field("reference").unwrap().validity, Validity::Valid);
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        fn gated() -> FormController<MockRecompute> {
            controller(|c| {
                c.form_mut().insert_field(
                    Field::text("memo", "Memo").scoped(LayoutScope::DesktopOnly),
                );
                c.register_validation_rule(
                    FieldIdentity::Custom("reference".to_string()),
                    ValidationRule::required(),
                );
                c.register_validation_rule(
                    FieldIdentity::Custom("memo".to_string()),
                    ValidationRule::required(),
                );
                c.register_validation_rule(
                    FieldIdentity::Quantity,
                    ValidationRule::required().min(1.0),
                );
            })
        }

        #[test]
        fn test_hidden_invalid_field_does_not_block() {
            let mut controller = gated();
            controller.form_mut().set_section_visible("details", false);
            controller.form_mut().set_value("quantity", "0");
            let outcome = controller.submit();
            let SubmitOutcome::Blocked { errors, focus } = outcome else {
                panic!("expected submission to be blocked");
            };
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["quantity", "memo"]);
            assert_eq!(errors[0].error_id, "quantity-error");
            assert_eq!(focus, None);
        }

        #[test]
        fn test_compact_focuses_first_error() {
            let mut controller = gated();
            controller.set_presentation(Presentation::Compact);
            let outcome = controller.submit();
            let SubmitOutcome::Blocked { errors, focus } = outcome else {
                panic!("expected submission to be blocked");
            };
            // memo is desktop-only and exempt here
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "reference");
            assert_eq!(focus.as_deref(), Some("reference"));
            assert_eq!(controller.form().focused(), Some("reference"));
        }

        #[test]
        fn test_valid_form_proceeds() {
            let mut controller = gated();
            controller.form_mut().set_value("reference", "INV-7");
            controller.form_mut().set_value("memo", "ok");
            assert!(controller.submit().is_proceed());
            assert!(controller.validate_form());
        }

        #[test]
        fn test_submit_flushes_pending_input() {
            let mut controller = gated();
            let start = Instant::now();
            controller.form_mut().set_value("reference", "INV-7");
            controller.form_mut().set_value("memo", "ok");
            controller.handle(FieldEvent::input("quantity", "0"), start);
            assert!(!controller.submit().is_proceed());
            assert!(!controller.has_pending());
        }
    }
}
