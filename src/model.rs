use crate::error::{WizardError, WizardResult};
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

/// Built-in résumé builder form, used when no configuration file is found.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../config/resume-wizard.yaml");

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TriggerDef {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OptionDef {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl OptionDef {
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKindDef {
    Text,
    Textarea {
        #[serde(default = "default_textarea_lines")]
        lines: usize,
    },
    Upload {
        // Hint shown in the zone before a file is chosen
        #[serde(default)]
        accept: Option<String>,
    },
    MultiSelect {
        options: Vec<OptionDef>,
        #[serde(default)]
        mirror: Option<String>,
    },
    Radio {
        options: Vec<OptionDef>,
        #[serde(default)]
        mirror: Option<String>,
    },
    Style {
        options: Vec<OptionDef>,
        #[serde(default)]
        mirror: Option<String>,
        #[serde(default)]
        previews: BTreeMap<String, String>,
    },
}

fn default_textarea_lines() -> usize {
    4
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKindDef,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StepDef {
    pub step: usize,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WizardConfig {
    pub title: String,
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
    #[serde(default = "default_next_label")]
    pub next_label: String,
    #[serde(default = "default_finish_label")]
    pub finish_label: String,
    #[serde(default)]
    pub steps: Vec<StepDef>,
}

fn default_next_label() -> String {
    "Next".to_string()
}

fn default_finish_label() -> String {
    "Create My Resume".to_string()
}

impl WizardConfig {
    pub fn from_yaml(s: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_yaml(DEFAULT_CONFIG_YAML)
    }
}

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap())
}

fn check_name(kind: &'static str, name: &str, seen: &mut HashSet<String>) -> WizardResult<()> {
    if !name_re().is_match(name) {
        return Err(WizardError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    if !seen.insert(name.to_string()) {
        return Err(WizardError::Duplicate {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Checks that a form definition carries every element the wizard needs.
///
/// Run once at mount time so a broken definition fails loudly with the name of
/// the offending element instead of leaving the form half wired.
pub fn validate_wizard_config(cfg: &WizardConfig) -> WizardResult<()> {
    if cfg.triggers.is_empty() {
        return Err(WizardError::missing("use-template trigger"));
    }
    let mut trigger_ids = HashSet::new();
    for t in &cfg.triggers {
        check_name("trigger", &t.id, &mut trigger_ids)?;
    }
    if cfg.steps.is_empty() {
        return Err(WizardError::missing("step panel"));
    }
    let mut markers = HashSet::new();
    for s in &cfg.steps {
        if !markers.insert(s.step) {
            return Err(WizardError::Duplicate {
                kind: "step marker",
                name: s.step.to_string(),
            });
        }
    }
    for n in 1..=cfg.steps.len() {
        if !markers.contains(&n) {
            return Err(WizardError::missing(format!("step panel {n}")));
        }
    }

    // Field names and mirror names share the submission namespace
    let mut names = HashSet::new();
    for s in &cfg.steps {
        for f in &s.fields {
            check_name("field", &f.name, &mut names)?;
            match &f.kind {
                FieldKindDef::Text | FieldKindDef::Textarea { .. } | FieldKindDef::Upload { .. } => {}
                FieldKindDef::MultiSelect { options, mirror }
                | FieldKindDef::Radio { options, mirror }
                | FieldKindDef::Style {
                    options, mirror, ..
                } => {
                    if f.required {
                        return Err(WizardError::Unsupported {
                            field: f.name.clone(),
                            message: "selection groups cannot be required".into(),
                        });
                    }
                    let Some(mirror) = mirror else {
                        return Err(WizardError::missing(format!(
                            "mirror field for group '{}'",
                            f.name
                        )));
                    };
                    check_name("mirror field", mirror, &mut names)?;
                    if options.is_empty() {
                        return Err(WizardError::missing(format!(
                            "options for group '{}'",
                            f.name
                        )));
                    }
                    let mut values = HashSet::new();
                    for o in options {
                        if !values.insert(o.value.as_str()) {
                            return Err(WizardError::Duplicate {
                                kind: "option",
                                name: format!("{}.{}", f.name, o.value),
                            });
                        }
                    }
                }
            }
            if let FieldKindDef::Style { previews, .. } = &f.kind {
                if previews.is_empty() {
                    return Err(WizardError::missing(format!(
                        "preview table for style group '{}'",
                        f.name
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> WizardConfig {
        WizardConfig::from_yaml(
            r#"
title: T
triggers: [{ id: hero, label: Use Template }]
steps:
  - step: 1
    title: One
    fields:
      - { name: fullName, label: Name, kind: text, required: true }
  - step: 2
    title: Two
    fields:
      - name: emphasis
        label: Emphasis
        kind: multi_select
        mirror: emphasisInput
        options: [{ value: a }, { value: b }]
"#,
        )
        .unwrap()
    }

    #[test]
    fn builtin_config_is_valid() {
        let cfg = WizardConfig::builtin().unwrap();
        assert_eq!(cfg.steps.len(), 5);
        assert_eq!(cfg.finish_label, "Create My Resume");
        validate_wizard_config(&cfg).unwrap();
    }

    #[test]
    fn labels_default_when_omitted() {
        let cfg = minimal();
        assert_eq!(cfg.next_label, "Next");
        assert!(matches!(
            cfg.steps[0].fields[0].kind,
            FieldKindDef::Text
        ));
        validate_wizard_config(&cfg).unwrap();
    }

    #[test]
    fn validate_reports_missing_step_marker() {
        let mut cfg = minimal();
        cfg.steps[1].step = 3;
        let err = validate_wizard_config(&cfg).unwrap_err();
        assert_eq!(err, WizardError::MissingElement("step panel 2".into()));
    }

    #[test]
    fn validate_reports_missing_mirror() {
        let mut cfg = minimal();
        if let FieldKindDef::MultiSelect { mirror, .. } = &mut cfg.steps[1].fields[0].kind {
            *mirror = None;
        }
        let err = validate_wizard_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("mirror field for group 'emphasis'"));
    }

    #[test]
    fn validate_rejects_mirror_clashing_with_field() {
        let mut cfg = minimal();
        if let FieldKindDef::MultiSelect { mirror, .. } = &mut cfg.steps[1].fields[0].kind {
            *mirror = Some("fullName".into());
        }
        let err = validate_wizard_config(&cfg).unwrap_err();
        assert!(matches!(err, WizardError::Duplicate { .. }));
    }

    #[test]
    fn validate_requires_trigger_and_names() {
        let mut cfg = minimal();
        cfg.triggers.clear();
        assert_eq!(
            validate_wizard_config(&cfg).unwrap_err(),
            WizardError::MissingElement("use-template trigger".into())
        );
        let mut cfg = minimal();
        cfg.steps[0].fields[0].name = "full name".into();
        assert!(matches!(
            validate_wizard_config(&cfg).unwrap_err(),
            WizardError::InvalidName { .. }
        ));
    }

    #[test]
    fn validate_rejects_required_group() {
        let mut cfg = minimal();
        cfg.steps[1].fields[0].required = true;
        assert!(matches!(
            validate_wizard_config(&cfg).unwrap_err(),
            WizardError::Unsupported { .. }
        ));
    }

    fn emphasis_options(cfg: &mut WizardConfig) -> &mut Vec<OptionDef> {
        match &mut cfg.steps[1].fields[0].kind {
            FieldKindDef::MultiSelect { options, .. } => options,
            other => panic!("expected multi-select, got {other:?}"),
        }
    }

    #[test]
    fn validate_reports_duplicate_step_marker() {
        let mut cfg = minimal();
        cfg.steps[1].step = 1;
        assert_eq!(
            validate_wizard_config(&cfg).unwrap_err(),
            WizardError::Duplicate {
                kind: "step marker",
                name: "1".into(),
            }
        );
    }

    #[test]
    fn validate_requires_group_options() {
        let mut cfg = minimal();
        emphasis_options(&mut cfg).clear();
        assert_eq!(
            validate_wizard_config(&cfg).unwrap_err(),
            WizardError::MissingElement("options for group 'emphasis'".into())
        );
    }

    #[test]
    fn validate_rejects_duplicate_option_value() {
        let mut cfg = minimal();
        emphasis_options(&mut cfg).push(OptionDef {
            value: "a".into(),
            label: Some("Again".into()),
        });
        assert_eq!(
            validate_wizard_config(&cfg).unwrap_err(),
            WizardError::Duplicate {
                kind: "option",
                name: "emphasis.a".into(),
            }
        );
    }

    #[test]
    fn validate_requires_style_previews() {
        let cfg = WizardConfig::from_yaml(
            r#"
title: T
triggers: [{ id: hero, label: Use Template }]
steps:
  - step: 1
    title: Look
    fields:
      - name: styleOptions
        label: Style
        kind: style
        mirror: selectedStyle
        options: [{ value: purple-modern }]
        previews: {}
"#,
        )
        .unwrap();
        assert_eq!(
            validate_wizard_config(&cfg).unwrap_err(),
            WizardError::MissingElement("preview table for style group 'styleOptions'".into())
        );
    }

    #[test]
    fn validate_rejects_bad_trigger_id() {
        let mut cfg = minimal();
        cfg.triggers[0].id = "use template".into();
        assert_eq!(
            validate_wizard_config(&cfg).unwrap_err(),
            WizardError::InvalidName {
                kind: "trigger",
                name: "use template".into(),
            }
        );
        let mut cfg = minimal();
        let again = cfg.triggers[0].clone();
        cfg.triggers.push(again);
        assert!(matches!(
            validate_wizard_config(&cfg).unwrap_err(),
            WizardError::Duplicate { kind: "trigger", .. }
        ));
    }
}
