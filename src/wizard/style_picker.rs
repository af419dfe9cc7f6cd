use crate::error::WizardResult;
use crate::model::OptionDef;
use crate::wizard::selection::RadioGroup;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewImage {
    pub src: String,
    pub alt: String,
}

/// Outcome of picking a style card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StylePick {
    Previewed,
    /// The card has no entry in the preview table; the preview was left alone.
    Unmapped,
}

/// Style cards with a live preview image.
#[derive(Clone, Debug)]
pub struct StylePicker {
    cards: RadioGroup,
    previews: BTreeMap<String, String>,
    preview: Option<PreviewImage>,
}

impl StylePicker {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        mirror_name: impl Into<String>,
        options: Vec<OptionDef>,
        previews: BTreeMap<String, String>,
    ) -> Self {
        Self {
            cards: RadioGroup::new(name, label, mirror_name, options),
            previews,
            preview: None,
        }
    }

    pub fn cards(&self) -> &RadioGroup {
        &self.cards
    }

    pub fn name(&self) -> &str {
        &self.cards.name
    }

    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    pub fn mirror(&self) -> &str {
        self.cards.mirror()
    }

    pub fn pick(&mut self, style: &str) -> WizardResult<StylePick> {
        self.cards.choose(style)?;
        match self.previews.get(style) {
            Some(path) => {
                self.preview = Some(PreviewImage {
                    src: path.clone(),
                    alt: format!("{style} preview"),
                });
                Ok(StylePick::Previewed)
            }
            None => Ok(StylePick::Unmapped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> StylePicker {
        let options = ["purple-modern", "plain"]
            .iter()
            .map(|v| OptionDef {
                value: v.to_string(),
                label: None,
            })
            .collect();
        let mut previews = BTreeMap::new();
        previews.insert(
            "purple-modern".to_string(),
            "img/resume_samples/purple-modern.jpg".to_string(),
        );
        StylePicker::new("styles", "Style", "selectedStyle", options, previews)
    }

    #[test]
    fn mapped_style_updates_preview() {
        let mut p = picker();
        assert_eq!(p.pick("purple-modern").unwrap(), StylePick::Previewed);
        assert_eq!(p.mirror(), "purple-modern");
        let img = p.preview().unwrap();
        assert_eq!(img.src, "img/resume_samples/purple-modern.jpg");
        assert_eq!(img.alt, "purple-modern preview");
    }

    #[test]
    fn unmapped_style_keeps_previous_preview() {
        let mut p = picker();
        p.pick("purple-modern").unwrap();
        assert_eq!(p.pick("plain").unwrap(), StylePick::Unmapped);
        assert_eq!(p.mirror(), "plain");
        assert!(p.cards().is_active("plain"));
        assert!(!p.cards().is_active("purple-modern"));
        assert_eq!(
            p.preview().unwrap().src,
            "img/resume_samples/purple-modern.jpg"
        );
    }
}
