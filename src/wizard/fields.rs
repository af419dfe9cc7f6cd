use crate::model::FieldDef;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    TextArea { lines: usize },
}

/// A native text input or text area.
#[derive(Clone, Debug)]
pub struct InputField {
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub kind: InputKind,
    value: String,
    flagged: bool,
}

impl InputField {
    pub fn new(def: &FieldDef, kind: InputKind) -> Self {
        Self {
            name: def.name.clone(),
            label: def.label.clone(),
            placeholder: def.placeholder.clone(),
            required: def.required,
            kind,
            value: String::new(),
            flagged: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, InputKind::TextArea { .. })
    }

    /// Applies one edit from the user. Any edit clears a validation flag.
    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.flagged = false;
    }
}

/// A control that takes part in required-field validation.
pub trait Validatable {
    fn name(&self) -> &str;
    fn required(&self) -> bool;
    /// The text validation inspects.
    fn validation_text(&self) -> &str;
    fn flagged(&self) -> bool;
    fn set_flagged(&mut self, flagged: bool);
}

impl Validatable for InputField {
    fn name(&self) -> &str {
        &self.name
    }
    fn required(&self) -> bool {
        self.required
    }
    fn validation_text(&self) -> &str {
        &self.value
    }
    fn flagged(&self) -> bool {
        self.flagged
    }
    fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }
}
