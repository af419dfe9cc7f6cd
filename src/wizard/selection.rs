use crate::error::{WizardError, WizardResult};
use crate::model::OptionDef;

/// Options shared by every selection group, in declaration order.
#[derive(Clone, Debug)]
pub struct OptionSet {
    options: Vec<OptionDef>,
}

impl OptionSet {
    pub fn new(options: Vec<OptionDef>) -> Self {
        Self { options }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
        self.options.iter()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    fn require(&self, value: &str) -> WizardResult<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(WizardError::unknown("option", value))
        }
    }
}

/// Toggle group with unlimited simultaneous selections.
///
/// The mirror holds the selected values as a JSON array in the order they were
/// added; it stays empty until the first toggle.
#[derive(Clone, Debug)]
pub struct MultiSelect {
    pub name: String,
    pub label: String,
    pub mirror_name: String,
    pub options: OptionSet,
    selected: Vec<String>,
    mirror: String,
}

impl MultiSelect {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        mirror_name: impl Into<String>,
        options: Vec<OptionDef>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            mirror_name: mirror_name.into(),
            options: OptionSet::new(options),
            selected: Vec::new(),
            mirror: String::new(),
        }
    }

    pub fn toggle(&mut self, value: &str) -> WizardResult<()> {
        self.options.require(value)?;
        if let Some(pos) = self.selected.iter().position(|v| v == value) {
            self.selected.remove(pos);
        } else {
            self.selected.push(value.to_string());
        }
        self.mirror = serde_json::to_string(&self.selected).unwrap_or_default();
        Ok(())
    }

    pub fn is_active(&self, value: &str) -> bool {
        self.selected.iter().any(|v| v == value)
    }

    pub fn mirror(&self) -> &str {
        &self.mirror
    }
}

/// Exclusive-choice group. Nothing is active until the first choice.
#[derive(Clone, Debug)]
pub struct RadioGroup {
    pub name: String,
    pub label: String,
    pub mirror_name: String,
    pub options: OptionSet,
    active: Option<String>,
}

impl RadioGroup {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        mirror_name: impl Into<String>,
        options: Vec<OptionDef>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            mirror_name: mirror_name.into(),
            options: OptionSet::new(options),
            active: None,
        }
    }

    pub fn choose(&mut self, value: &str) -> WizardResult<()> {
        self.options.require(value)?;
        self.active = Some(value.to_string());
        Ok(())
    }

    pub fn is_active(&self, value: &str) -> bool {
        self.active() == Some(value)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn mirror(&self) -> &str {
        self.active().unwrap_or("")
    }
}
