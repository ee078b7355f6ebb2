//! Live form state: fields, sections and presentation

use super::field::{Field, LayoutScope, Presentation};
use std::collections::{BTreeMap, HashMap};

/// A structural container fields can live in
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub parent: Option<String>,
    pub hidden: bool,
    pub layout: LayoutScope,
}

impl Section {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            hidden: false,
            layout: LayoutScope::Both,
        }
    }

    pub fn within(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn scoped(mut self, layout: LayoutScope) -> Self {
        self.layout = layout;
        self
    }
}

/// All fields of one form at the current point in time
#[derive(Debug, Clone, Default)]
pub struct FormSnapshot {
    title: String,
    fields: Vec<Field>,
    sections: HashMap<String, Section>,
    presentation: Presentation,
    focused: Option<String>,
}

impl FormSnapshot {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Add a section (replacing one with the same name)
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.insert(section.name.clone(), section);
        self
    }

    /// Add a field (replacing one with the same name, keeping its position)
    pub fn with_field(mut self, field: Field) -> Self {
        self.insert_field(field);
        self
    }

    pub fn insert_field(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Drop every field inside `section` (used before rebuilding it)
    pub fn clear_section(&mut self, section: &str) {
        self.fields.retain(|f| f.section.as_deref() != Some(section));
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Current value as text, `None` when the field is absent
    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(Field::as_text)
    }

    /// Current value as a number, `None` when absent or unparsable
    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(Field::as_number)
    }

    /// Write a value; returns false when the field does not exist
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Show or hide a section; returns false when the section does not exist
    pub fn set_section_visible(&mut self, name: &str, visible: bool) -> bool {
        match self.sections.get_mut(name) {
            Some(section) => {
                section.hidden = !visible;
                true
            }
            None => false,
        }
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn set_presentation(&mut self, presentation: Presentation) {
        self.presentation = presentation;
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn focus(&mut self, name: &str) {
        self.focused = Some(name.to_string());
    }

    /// Values keyed by field name, as they would be submitted
    pub fn values(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.as_text().to_string()))
            .collect()
    }
}
