//! Application state and key handling for the terminal host

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fieldwire::config::EngineConfig;
use fieldwire::engine::{visibility, FieldEvent, FormController, SubmitOutcome};
use fieldwire::form::{Field, FormSnapshot, Presentation};
use fieldwire::ledger::LedgerRecompute;
use fieldwire::rules::{
    costing_form, demo_catalog, install_costing_rules, install_invoice_rules, invoice_form,
    FormKind,
};
use std::time::{Duration, Instant};

/// Longest the event loop may block between ticks
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App {
    /// Controller driving the presented form
    pub controller: FormController<LedgerRecompute>,
    pub kind: FormKind,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
    config: EngineConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Build the form, install its rules and focus the first input
    pub fn new(kind: FormKind, config: EngineConfig) -> Result<Self> {
        let form = match kind {
            FormKind::Invoice => invoice_form(demo_catalog()),
            FormKind::Costing => costing_form(&config.currency_symbol),
        };
        let mut controller = FormController::new(form, LedgerRecompute::new(), &config);
        match kind {
            FormKind::Invoice => install_invoice_rules(&mut controller, &config)?,
            FormKind::Costing => install_costing_rules(&mut controller, &config)?,
        }
        controller.initialize();

        let mut app = Self {
            controller,
            kind,
            status_message: None,
            config,
            quit: false,
        };
        if let Some(first) = app.focusable_fields().into_iter().next() {
            app.controller.form_mut().focus(&first);
        }
        Ok(app)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn form(&self) -> &FormSnapshot {
        self.controller.form()
    }

    /// Name of the field receiving keystrokes
    pub fn active_field(&self) -> Option<&str> {
        self.form().focused()
    }

    /// Visible, editable fields in form order
    pub fn focusable_fields(&self) -> Vec<String> {
        let form = self.form();
        form.fields()
            .iter()
            .filter(|f| !f.readonly && f.enabled && visibility::is_visible(form, f))
            .map(|f| f.name.clone())
            .collect()
    }

    /// Switch presentation from the terminal width
    pub fn resize(&mut self, width: u16) {
        let presentation = Presentation::for_width(width, self.config.compact_breakpoint);
        self.controller.set_presentation(presentation);
    }

    /// Run debounced work that has come due
    pub fn tick(&mut self, now: Instant) {
        let ran = self.controller.tick(now);
        if ran > 0 {
            tracing::trace!(ran, "debounced work ran");
        }
    }

    /// How long the event loop may wait for input before the next tick
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.controller.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('s') if ctrl => self.submit()?,
            KeyCode::Char('w') if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit()?
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.move_focus(1, now),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(-1, now),
            KeyCode::Left => self.cycle_active(-1, now),
            KeyCode::Right => self.cycle_active(1, now),
            KeyCode::Backspace => self.edit_active(now, |field| field.pop_char()),
            KeyCode::Char(c) if !ctrl => self.edit_active(now, |field| field.push_char(c)),
            _ => {}
        }
        Ok(())
    }

    fn move_focus(&mut self, step: isize, now: Instant) {
        if let Some(current) = self.active_field().map(str::to_string) {
            self.controller.handle(FieldEvent::blur(&current), now);
        }
        // Visibility may have changed on blur
        let focusable = self.focusable_fields();
        if focusable.is_empty() {
            return;
        }
        let len = focusable.len() as isize;
        let next = match self
            .active_field()
            .and_then(|name| focusable.iter().position(|f| f == name))
        {
            Some(i) => (i as isize + step).rem_euclid(len),
            None => 0,
        };
        let name = &focusable[next as usize];
        self.controller.form_mut().focus(name);
    }

    fn cycle_active(&mut self, step: isize, now: Instant) {
        let Some(mut field) = self
            .active_field()
            .and_then(|name| self.form().field(name))
            .cloned()
        else {
            return;
        };
        if !field.is_choice() {
            return;
        }
        field.cycle_choice(step);
        self.controller
            .handle(FieldEvent::select(&field.name, field.as_text()), now);
    }

    /// Apply a keystroke to a copy of the active field and feed the
    /// resulting text in as continuous input
    fn edit_active(&mut self, now: Instant, edit: impl FnOnce(&mut Field)) {
        let Some(mut field) = self
            .active_field()
            .and_then(|name| self.form().field(name))
            .cloned()
        else {
            return;
        };
        if field.is_choice() {
            return;
        }
        let before = field.as_text().to_string();
        edit(&mut field);
        if field.as_text() != before {
            self.controller
                .handle(FieldEvent::input(&field.name, field.as_text()), now);
        }
    }

    fn submit(&mut self) -> Result<()> {
        match self.controller.submit() {
            SubmitOutcome::Proceed => {
                let payload = serde_json::to_string(&self.form().values())?;
                tracing::info!(form = self.form().title(), %payload, "form submitted");
                self.status_message = Some("Submitted".to_string());
            }
            // Focus only moves in compact presentation, and the controller
            // has already done that
            SubmitOutcome::Blocked { errors, .. } => {
                self.status_message = Some(match errors.len() {
                    1 => "1 field needs attention".to_string(),
                    n => format!("{n} fields need attention"),
                });
            }
        }
        Ok(())
    }
}
