pub mod fields;
pub mod modal;
pub mod payload;
pub mod selection;
pub mod steps;
pub mod style_picker;
pub mod upload;
pub mod validation;


use crate::error::{WizardError, WizardResult};
use crate::model::{validate_wizard_config, FieldDef, FieldKindDef, WizardConfig};
use fields::{InputField, InputKind, Validatable};
use modal::{ModalState, TriggerSet};
use payload::SubmissionPayload;
use selection::{MultiSelect, RadioGroup};
use steps::StepNav;
use style_picker::{StylePick, StylePicker};
use tracing::{debug, info, warn};
use upload::{SelectedFile, UploadZone};

/// One control inside a step panel.
#[derive(Clone, Debug)]
pub enum Control {
    Input(InputField),
    Upload(UploadZone),
    MultiSelect(MultiSelect),
    Radio(RadioGroup),
    Style(StylePicker),
}

impl Control {
    fn from_def(def: &FieldDef) -> Self {
        match &def.kind {
            FieldKindDef::Text => Control::Input(InputField::new(def, InputKind::Text)),
            FieldKindDef::Textarea { lines } => Control::Input(InputField::new(
                def,
                InputKind::TextArea {
                    lines: (*lines).max(1),
                },
            )),
            FieldKindDef::Upload { accept } => {
                let mut zone = UploadZone::new(&def.name, &def.label);
                zone.accept = accept.clone();
                zone.required = def.required;
                Control::Upload(zone)
            }
            FieldKindDef::MultiSelect { options, mirror } => Control::MultiSelect(MultiSelect::new(
                &def.name,
                &def.label,
                mirror.clone().unwrap_or_default(),
                options.clone(),
            )),
            FieldKindDef::Radio { options, mirror } => Control::Radio(RadioGroup::new(
                &def.name,
                &def.label,
                mirror.clone().unwrap_or_default(),
                options.clone(),
            )),
            FieldKindDef::Style {
                options,
                mirror,
                previews,
            } => Control::Style(StylePicker::new(
                &def.name,
                &def.label,
                mirror.clone().unwrap_or_default(),
                options.clone(),
                previews.clone(),
            )),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Control::Input(f) => &f.name,
            Control::Upload(z) => &z.name,
            Control::MultiSelect(g) => &g.name,
            Control::Radio(g) => &g.name,
            Control::Style(p) => p.name(),
        }
    }

    pub fn validatable_mut(&mut self) -> Option<&mut dyn Validatable> {
        match self {
            Control::Input(f) => Some(f),
            Control::Upload(z) => Some(z),
            _ => None,
        }
    }

    fn collect(&self, payload: &mut SubmissionPayload) {
        match self {
            Control::Input(f) => payload.push(&f.name, f.value()),
            Control::Upload(z) => {
                let value = z
                    .first()
                    .map(|f| f.path.to_string_lossy().into_owned())
                    .unwrap_or_default();
                payload.push(&z.name, value);
                payload.attach(&z.name, z.files().to_vec());
            }
            Control::MultiSelect(g) => payload.push(&g.mirror_name, g.mirror()),
            Control::Radio(g) => payload.push(&g.mirror_name, g.mirror()),
            Control::Style(p) => payload.push(&p.cards().mirror_name, p.mirror()),
        }
    }
}

#[cfg(test)]
impl Control {
    pub fn validatable(&self) -> Option<&dyn Validatable> {
        match self {
            Control::Input(f) => Some(f),
            Control::Upload(z) => Some(z),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StepPanel {
    pub number: usize,
    pub title: String,
    pub controls: Vec<Control>,
}

/// User interface events the wizard reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum WizardEvent {
    Trigger(String),
    CloseControl,
    BackdropClick,
    Next,
    Previous,
    Input { field: String, value: String },
    ToggleOption { group: String, value: String },
    ChooseRadio { group: String, value: String },
    ChooseStyle { group: String, value: String },
    ZoneClick(String),
    FilesChosen { zone: String, files: Vec<SelectedFile> },
    DragOver(String),
    DragLeave(String),
    Drop { zone: String, files: Vec<SelectedFile> },
}

/// Work the host has to carry out after an event.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    OpenFileChooser { zone: String },
    ValidationFailed { step: usize, fields: Vec<String> },
    UnknownStyle { group: String, style: String },
    Submitted(SubmissionPayload),
}

/// Form wizard controller: owns the modal, the step pointer and every control.
#[derive(Clone, Debug)]
pub struct Wizard {
    pub title: String,
    pub next_label: String,
    pub finish_label: String,
    modal: ModalState,
    triggers: TriggerSet,
    nav: StepNav,
    panels: Vec<StepPanel>,
}

impl Wizard {
    /// Builds the wizard from a form definition, failing on the first missing
    /// or inconsistent element.
    pub fn mount(cfg: &WizardConfig) -> WizardResult<Self> {
        validate_wizard_config(cfg)?;
        let mut panels: Vec<StepPanel> = cfg
            .steps
            .iter()
            .map(|s| StepPanel {
                number: s.step,
                title: s.title.clone(),
                controls: s.fields.iter().map(Control::from_def).collect(),
            })
            .collect();
        panels.sort_by_key(|p| p.number);
        debug!(steps = panels.len(), "wizard mounted");
        Ok(Self {
            title: cfg.title.clone(),
            next_label: cfg.next_label.clone(),
            finish_label: cfg.finish_label.clone(),
            modal: ModalState::default(),
            triggers: TriggerSet::new(cfg.triggers.clone()),
            nav: StepNav::new(panels.len()),
            panels,
        })
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn triggers(&self) -> &TriggerSet {
        &self.triggers
    }

    pub fn nav(&self) -> &StepNav {
        &self.nav
    }

    pub fn current_step(&self) -> usize {
        self.nav.current()
    }

    pub fn panels(&self) -> &[StepPanel] {
        &self.panels
    }

    pub fn panel(&self, step: usize) -> Option<&StepPanel> {
        self.panels.iter().find(|p| p.number == step)
    }

    pub fn current_panel(&self) -> Option<&StepPanel> {
        self.panel(self.nav.current())
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.panels
            .iter()
            .flat_map(|p| p.controls.iter())
            .find(|c| c.name() == name)
    }

    /// Mutable access to a control of the visible panel. Controls on hidden
    /// panels cannot be reached.
    fn control_mut(&mut self, kind: &'static str, name: &str) -> WizardResult<&mut Control> {
        let step = self.nav.current();
        let owner = self
            .panels
            .iter()
            .find(|p| p.controls.iter().any(|c| c.name() == name))
            .map(|p| p.number);
        match owner {
            None => return Err(WizardError::unknown(kind, name)),
            Some(n) if n != step => {
                return Err(WizardError::NotOnStep {
                    name: name.to_string(),
                    step,
                })
            }
            Some(_) => {}
        }
        self.panels
            .iter_mut()
            .filter(|p| p.number == step)
            .flat_map(|p| p.controls.iter_mut())
            .find(|c| c.name() == name)
            .ok_or_else(|| WizardError::unknown(kind, name))
    }

    fn zone_mut(&mut self, zone: &str) -> WizardResult<&mut UploadZone> {
        match self.control_mut("upload zone", zone)? {
            Control::Upload(z) => Ok(z),
            _ => Err(WizardError::unknown("upload zone", zone)),
        }
    }

    /// Applies one event. Events other than a trigger are ignored while the
    /// modal is closed.
    pub fn update(&mut self, event: WizardEvent) -> WizardResult<Vec<Effect>> {
        use WizardEvent::*;
        let mut effects = Vec::new();
        if let Trigger(id) = &event {
            if !self.triggers.contains(id) {
                return Err(WizardError::unknown("trigger", id.as_str()));
            }
            debug!(trigger = %id, "modal opened");
            self.modal.open();
            return Ok(effects);
        }
        if !self.modal.is_open() {
            return Ok(effects);
        }
        match event {
            Trigger(_) => {}
            CloseControl | BackdropClick => {
                debug!("modal closed");
                self.modal.close();
            }
            Next => {
                let step = self.nav.current();
                let invalid = match self.panels.iter_mut().find(|p| p.number == step) {
                    Some(panel) => validation::validate_step(panel),
                    None => Vec::new(),
                };
                if !invalid.is_empty() {
                    debug!(step, fields = ?invalid, "step validation failed");
                    effects.push(Effect::ValidationFailed {
                        step,
                        fields: invalid,
                    });
                } else if self.nav.advance() {
                    debug!(step = self.nav.current(), "advanced");
                } else {
                    let payload = self.collect_payload();
                    info!(
                        payload = %payload.to_json(),
                        attachments = %payload.attachments_json(),
                        "form submitted"
                    );
                    self.modal.close();
                    effects.push(Effect::Submitted(payload));
                }
            }
            Previous => {
                if self.nav.retreat() {
                    debug!(step = self.nav.current(), "went back");
                }
            }
            Input { field, value } => match self.control_mut("field", &field)? {
                Control::Input(f) => f.input(value),
                _ => return Err(WizardError::unknown("field", field)),
            },
            ToggleOption { group, value } => match self.control_mut("group", &group)? {
                Control::MultiSelect(g) => g.toggle(&value)?,
                _ => return Err(WizardError::unknown("multi-select group", group)),
            },
            ChooseRadio { group, value } => match self.control_mut("group", &group)? {
                Control::Radio(g) => g.choose(&value)?,
                _ => return Err(WizardError::unknown("radio group", group)),
            },
            ChooseStyle { group, value } => {
                let pick = match self.control_mut("group", &group)? {
                    Control::Style(p) => p.pick(&value)?,
                    _ => return Err(WizardError::unknown("style group", group)),
                };
                if pick == StylePick::Unmapped {
                    warn!(group = %group, style = %value, "no preview image for style");
                    effects.push(Effect::UnknownStyle {
                        group,
                        style: value,
                    });
                }
            }
            ZoneClick(zone) => {
                self.zone_mut(&zone)?;
                effects.push(Effect::OpenFileChooser { zone });
            }
            FilesChosen { zone, files } => {
                if self.zone_mut(&zone)?.select(files) {
                    debug!(zone = %zone, "file chosen");
                }
            }
            DragOver(zone) => self.zone_mut(&zone)?.drag_over(),
            DragLeave(zone) => self.zone_mut(&zone)?.drag_leave(),
            Drop { zone, files } => {
                if self.zone_mut(&zone)?.drop_files(files) {
                    debug!(zone = %zone, "file dropped");
                }
            }
        }
        Ok(effects)
    }

    /// Current value of every named field and mirror field.
    pub fn collect_payload(&self) -> SubmissionPayload {
        let mut payload = SubmissionPayload::default();
        for panel in &self.panels {
            for control in &panel.controls {
                control.collect(&mut payload);
            }
        }
        payload
    }
}
