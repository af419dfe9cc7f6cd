use crate::wizard::StepPanel;

/// Checks the required controls of one step panel.
///
/// A step is valid when every required control has non-blank text after
/// trimming. Blank ones are flagged and their names returned; the flag stays
/// until that control is next edited. An empty result means the step passed.
pub fn validate_step(panel: &mut StepPanel) -> Vec<String> {
    let mut invalid = Vec::new();
    for control in &mut panel.controls {
        let Some(v) = control.validatable_mut() else {
            continue;
        };
        if v.required() && v.validation_text().trim().is_empty() {
            v.set_flagged(true);
            invalid.push(v.name().to_string());
        }
    }
    invalid
}
