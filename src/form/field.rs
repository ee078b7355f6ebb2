//! Form field value objects

/// One selectable entry of a choice field, with its auxiliary metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    /// Catalog price attached to the option, if any
    pub price: Option<f64>,
}

impl ChoiceOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            price: None,
        }
    }

    pub fn priced(value: &str, label: &str, price: f64) -> Self {
        Self {
            price: Some(price),
            ..Self::new(value, label)
        }
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Numeric input, kept as typed
    Number(String),
    Choice {
        options: Vec<ChoiceOption>,
        selected: Option<usize>,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Which responsive layout a field or section belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutScope {
    #[default]
    Both,
    DesktopOnly,
    CompactOnly,
}

/// Current presentation of the whole form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    #[default]
    Wide,
    Compact,
}

impl Presentation {
    /// Compact below the breakpoint, wide otherwise
    pub fn for_width(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            Presentation::Compact
        } else {
            Presentation::Wide
        }
    }
}

impl LayoutScope {
    pub fn includes(self, presentation: Presentation) -> bool {
        match self {
            LayoutScope::Both => true,
            LayoutScope::DesktopOnly => presentation == Presentation::Wide,
            LayoutScope::CompactOnly => presentation == Presentation::Compact,
        }
    }
}

/// Validation state of a field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Unset,
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Validity::Invalid(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Validity::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    /// Secondary identity used when the name has no rule
    pub group: Option<String>,
    /// Enclosing section, if any
    pub section: Option<String>,
    pub layout: LayoutScope,
    pub hidden: bool,
    pub enabled: bool,
    /// Derived display field, written only by recomputation
    pub readonly: bool,
    /// Unit label rendered beside the value
    pub unit: Option<String>,
    pub validity: Validity,
}

impl Field {
    fn with_value(name: &str, label: &str, value: FieldValue) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value,
            group: None,
            section: None,
            layout: LayoutScope::Both,
            hidden: false,
            enabled: true,
            readonly: false,
            unit: None,
            validity: Validity::Unset,
        }
    }

    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::with_value(name, label, FieldValue::Text(String::new()))
    }

    /// Create a new numeric field
    pub fn number(name: &str, label: &str) -> Self {
        Self::with_value(name, label, FieldValue::Number(String::new()))
    }

    /// Create a new choice field with nothing selected
    pub fn choice(name: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self::with_value(
            name,
            label,
            FieldValue::Choice {
                options,
                selected: None,
            },
        )
    }

    /// Create a read-only field holding a derived value
    pub fn display(name: &str, label: &str) -> Self {
        Self {
            readonly: true,
            ..Self::with_value(name, label, FieldValue::Number(String::new()))
        }
    }

    /// Set the initial value (server-rendered default)
    pub fn initial(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn in_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    pub fn in_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn scoped(mut self, layout: LayoutScope) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Current value as text; choice fields yield the selected option's value
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s,
            FieldValue::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|o| o.value.as_str())
                .unwrap_or(""),
        }
    }

    /// Current value parsed as a number
    pub fn as_number(&self) -> Option<f64> {
        parse_number(self.as_text())
    }

    /// Metadata of the selected option (choice fields only)
    pub fn selected_option(&self) -> Option<&ChoiceOption> {
        match &self.value {
            FieldValue::Choice { options, selected } => selected.and_then(|i| options.get(i)),
            _ => None,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// Replace the value. Choice fields select the option with that value,
    /// or clear the selection when none matches.
    pub fn set_value(&mut self, value: &str) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => *s = value.to_string(),
            FieldValue::Choice { options, selected } => {
                *selected = options.iter().position(|o| o.value == value);
            }
        }
    }

    /// Move the choice selection by `step`, wrapping around
    pub fn cycle_choice(&mut self, step: isize) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            let len = options.len() as isize;
            let next = match *selected {
                Some(i) => (i as isize + step).rem_euclid(len),
                None if step < 0 => len - 1,
                None => 0,
            };
            *selected = Some(next as usize);
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Number(s) => {
                if c.is_ascii_digit() || c == '.' || c == ',' || (c == '-' && s.is_empty()) {
                    s.push(c);
                }
            }
            FieldValue::Choice { .. } => {}
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => {
                s.pop();
            }
            FieldValue::Choice { .. } => {}
        }
    }

    /// Id of the element carrying this field's error message
    pub fn error_id(&self) -> String {
        format!("{}-error", self.name)
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Choice { .. } => self
                .selected_option()
                .map(|o| o.label.clone())
                .unwrap_or_else(|| "(none)".to_string()),
            _ => match &self.unit {
                Some(unit) if !self.as_text().is_empty() => format!("{} {}", self.as_text(), unit),
                _ => self.as_text().to_string(),
            },
        }
    }
}

/// Parse user-entered numbers, accepting a comma as decimal separator
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}
