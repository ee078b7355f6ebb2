//! Visibility oracle

use crate::form::{Field, FormSnapshot};

/// Whether a section and all of its ancestors are presented
pub fn is_section_visible(form: &FormSnapshot, name: &str) -> bool {
    let presentation = form.presentation();
    let mut current = Some(name);
    // A sane chain visits each section at most once
    for _ in 0..=form.section_count() {
        let Some(section_name) = current else {
            return true;
        };
        let Some(section) = form.section(section_name) else {
            // Unknown containers do not hide anything
            return true;
        };
        if section.hidden || !section.layout.includes(presentation) {
            return false;
        }
        current = section.parent.as_deref();
    }
    tracing::warn!(section = name, "section parent chain does not terminate");
    false
}

/// Whether a field is currently presented to the user
pub fn is_visible(form: &FormSnapshot, field: &Field) -> bool {
    if field.hidden || !field.layout.includes(form.presentation()) {
        return false;
    }
    match field.section.as_deref() {
        Some(section) => is_section_visible(form, section),
        None => true,
    }
}

/// Visibility by field name; absent fields are not visible
pub fn is_field_visible(form: &FormSnapshot, name: &str) -> bool {
    form.field(name).is_some_and(|f| is_visible(form, f))
}
