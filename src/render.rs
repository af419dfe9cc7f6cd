use crate::wizard::fields::Validatable;
use crate::wizard::style_picker::PreviewImage;
use crate::wizard::upload::ZoneTreatment;
use crate::wizard::{Control, Wizard};

#[derive(Clone, Debug, PartialEq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ControlView {
    Input {
        name: String,
        label: String,
        value: String,
        placeholder: Option<String>,
        required: bool,
        multiline: bool,
        flagged: bool,
    },
    Upload {
        name: String,
        label: String,
        display: String,
        hint: Option<String>,
        treatment: ZoneTreatment,
        flagged: bool,
    },
    Options {
        name: String,
        label: String,
        exclusive: bool,
        options: Vec<OptionView>,
    },
    Styles {
        name: String,
        label: String,
        cards: Vec<OptionView>,
        preview: Option<PreviewImage>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelView {
    pub step: usize,
    pub title: String,
    pub visible: bool,
    pub controls: Vec<ControlView>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NextButton {
    pub label: String,
    pub finish: bool,
}

/// Everything the display layer needs, derived from wizard state alone.
#[derive(Clone, Debug, PartialEq)]
pub struct WizardView {
    pub open: bool,
    pub scroll_locked: bool,
    pub title: String,
    pub step: usize,
    pub total: usize,
    pub panels: Vec<PanelView>,
    pub prev_visible: bool,
    pub next: NextButton,
    pub progress_percent: f64,
}

impl WizardView {
    pub fn active_panel(&self) -> Option<&PanelView> {
        self.panels.iter().find(|p| p.visible)
    }
}

fn option_views<'a>(
    options: impl Iterator<Item = &'a crate::model::OptionDef>,
    is_active: impl Fn(&str) -> bool,
) -> Vec<OptionView> {
    options
        .map(|o| OptionView {
            value: o.value.clone(),
            label: o.display().to_string(),
            active: is_active(&o.value),
        })
        .collect()
}

fn control_view(control: &Control) -> ControlView {
    match control {
        Control::Input(f) => ControlView::Input {
            name: f.name.clone(),
            label: f.label.clone(),
            value: f.value().to_string(),
            placeholder: f.placeholder.clone(),
            required: f.required,
            multiline: f.is_multiline(),
            flagged: f.flagged(),
        },
        Control::Upload(z) => ControlView::Upload {
            name: z.name.clone(),
            label: z.label.clone(),
            display: z.display_name().to_string(),
            hint: z.accept.clone(),
            treatment: z.treatment(),
            flagged: z.flagged(),
        },
        Control::MultiSelect(g) => ControlView::Options {
            name: g.name.clone(),
            label: g.label.clone(),
            exclusive: false,
            options: option_views(g.options.iter(), |v| g.is_active(v)),
        },
        Control::Radio(g) => ControlView::Options {
            name: g.name.clone(),
            label: g.label.clone(),
            exclusive: true,
            options: option_views(g.options.iter(), |v| g.is_active(v)),
        },
        Control::Style(p) => ControlView::Styles {
            name: p.name().to_string(),
            label: p.cards().label.clone(),
            cards: option_views(p.cards().options.iter(), |v| p.cards().is_active(v)),
            preview: p.preview().cloned(),
        },
    }
}

pub fn wizard_view(w: &Wizard) -> WizardView {
    let nav = w.nav();
    let panels = w
        .panels()
        .iter()
        .map(|p| PanelView {
            step: p.number,
            title: p.title.clone(),
            visible: p.number == nav.current(),
            controls: p.controls.iter().map(control_view).collect(),
        })
        .collect();
    let next = if nav.is_last() {
        NextButton {
            label: w.finish_label.clone(),
            finish: true,
        }
    } else {
        NextButton {
            label: w.next_label.clone(),
            finish: false,
        }
    };
    WizardView {
        open: w.modal().is_open(),
        scroll_locked: w.modal().scroll_locked(),
        title: w.title.clone(),
        step: nav.current(),
        total: nav.total(),
        panels,
        prev_visible: !nav.is_first(),
        next,
        progress_percent: nav.progress_percent(),
    }
}

/// A focusable element of the open modal, in tab order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Field { name: String, multiline: bool },
    Zone(String),
    Choice { group: String, value: String, exclusive: bool },
    Style { group: String, value: String },
    Prev,
    Next,
    Close,
}

pub fn focus_targets(view: &WizardView) -> Vec<FocusTarget> {
    let mut out = Vec::new();
    if let Some(panel) = view.active_panel() {
        for c in &panel.controls {
            match c {
                ControlView::Input {
                    name, multiline, ..
                } => out.push(FocusTarget::Field {
                    name: name.clone(),
                    multiline: *multiline,
                }),
                ControlView::Upload { name, .. } => out.push(FocusTarget::Zone(name.clone())),
                ControlView::Options {
                    name,
                    exclusive,
                    options,
                    ..
                } => {
                    for o in options {
                        out.push(FocusTarget::Choice {
                            group: name.clone(),
                            value: o.value.clone(),
                            exclusive: *exclusive,
                        });
                    }
                }
                ControlView::Styles { name, cards, .. } => {
                    for o in cards {
                        out.push(FocusTarget::Style {
                            group: name.clone(),
                            value: o.value.clone(),
                        });
                    }
                }
            }
        }
    }
    if view.prev_visible {
        out.push(FocusTarget::Prev);
    }
    out.push(FocusTarget::Next);
    out.push(FocusTarget::Close);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WizardConfig;
    use crate::wizard::WizardEvent;

    fn opened() -> Wizard {
        let cfg = WizardConfig::builtin().unwrap();
        let mut w = Wizard::mount(&cfg).unwrap();
        w.update(WizardEvent::Trigger("hero-use-template".into()))
            .unwrap();
        w
    }

    /// Fills the required fields that sit on the visible step.
    fn fill_current(w: &mut Wizard) {
        for (field, value) in [
            ("fullName", "Ada"),
            ("email", "ada@example.com"),
            ("targetRole", "Engineer"),
            ("summary", "Builds things"),
        ] {
            let here = w
                .current_panel()
                .is_some_and(|p| p.controls.iter().any(|c| c.name() == field));
            if !here {
                continue;
            }
            w.update(WizardEvent::Input {
                field: field.into(),
                value: value.into(),
            })
            .unwrap();
        }
    }

    #[test]
    fn exactly_one_panel_visible_at_every_step() {
        let mut w = opened();
        for expected in 1..=5 {
            let v = wizard_view(&w);
            let visible: Vec<usize> = v
                .panels
                .iter()
                .filter(|p| p.visible)
                .map(|p| p.step)
                .collect();
            assert_eq!(visible, vec![expected]);
            assert_eq!(v.prev_visible, expected != 1);
            assert_eq!(v.next.finish, expected == 5);
            assert_eq!(v.progress_percent, (expected - 1) as f64 / 4.0 * 100.0);
            if expected < 5 {
                fill_current(&mut w);
                w.update(WizardEvent::Next).unwrap();
            }
        }
        let v = wizard_view(&w);
        assert_eq!(v.next.label, "Create My Resume");
        w.update(WizardEvent::Previous).unwrap();
        let v = wizard_view(&w);
        assert_eq!(v.next.label, "Next");
        assert!(!v.next.finish);
    }

    #[test]
    fn flagged_fields_show_in_view() {
        let mut w = opened();
        w.update(WizardEvent::Next).unwrap();
        let v = wizard_view(&w);
        let flagged: Vec<&str> = v
            .active_panel()
            .unwrap()
            .controls
            .iter()
            .filter_map(|c| match c {
                ControlView::Input { name, flagged, .. } if *flagged => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(flagged, vec!["fullName", "email", "targetRole"]);
    }

    #[test]
    fn focus_order_skips_hidden_prev() {
        let mut w = opened();
        let targets = focus_targets(&wizard_view(&w));
        assert!(matches!(targets[0], FocusTarget::Field { .. }));
        assert!(!targets.contains(&FocusTarget::Prev));
        assert_eq!(targets[targets.len() - 2..], [FocusTarget::Next, FocusTarget::Close]);

        fill_current(&mut w);
        w.update(WizardEvent::Next).unwrap();
        let targets = focus_targets(&wizard_view(&w));
        assert_eq!(targets[0], FocusTarget::Zone("resumeFile".into()));
        assert!(targets.contains(&FocusTarget::Prev));
    }

    #[test]
    fn style_view_carries_preview() {
        let mut w = opened();
        for _ in 0..4 {
            fill_current(&mut w);
            w.update(WizardEvent::Next).unwrap();
        }
        w.update(WizardEvent::ChooseStyle {
            group: "styleOptions".into(),
            value: "yellow-modern".into(),
        })
        .unwrap();
        let v = wizard_view(&w);
        let styles = v
            .panels
            .iter()
            .flat_map(|p| p.controls.iter())
            .find_map(|c| match c {
                ControlView::Styles { cards, preview, .. } => Some((cards, preview)),
                _ => None,
            })
            .unwrap();
        assert_eq!(styles.0.iter().filter(|c| c.active).count(), 1);
        assert_eq!(
            styles.1.as_ref().unwrap().src,
            "img/resume_samples/yellow-modern.jpg"
        );
    }
}
