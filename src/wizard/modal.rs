use crate::model::TriggerDef;

/// Visibility of the wizard overlay and the background scroll lock it holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    open: bool,
    scroll_locked: bool,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn open(&mut self) {
        self.open = true;
        self.scroll_locked = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.scroll_locked = false;
    }
}

/// Declared controls that open the modal.
#[derive(Clone, Debug, Default)]
pub struct TriggerSet {
    triggers: Vec<TriggerDef>,
}

impl TriggerSet {
    pub fn new(triggers: Vec<TriggerDef>) -> Self {
        Self { triggers }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.triggers.iter().any(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerDef> {
        self.triggers.iter()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_close_toggle_scroll_lock() {
        let mut m = ModalState::default();
        assert!(!m.is_open() && !m.scroll_locked());
        m.open();
        assert!(m.is_open() && m.scroll_locked());
        m.close();
        assert!(!m.is_open() && !m.scroll_locked());
    }

    #[test]
    fn trigger_lookup_is_exact() {
        let set = TriggerSet::new(vec![TriggerDef {
            id: "hero".into(),
            label: "Use Template".into(),
        }]);
        assert!(set.contains("hero"));
        assert!(!set.contains("Use Template"));
        assert_eq!(set.len(), 1);
    }
}
