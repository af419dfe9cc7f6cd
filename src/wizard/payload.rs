use crate::wizard::upload::SelectedFile;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Flat name → value mapping assembled at submit time, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmissionPayload {
    entries: Vec<(String, String)>,
    attachments: BTreeMap<String, Vec<SelectedFile>>,
}

impl SubmissionPayload {
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        // Later values for a repeated name win, as with a form-data walk
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn attach(&mut self, name: impl Into<String>, files: Vec<SelectedFile>) {
        self.attachments.insert(name.into(), files);
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Files attached to `name`, empty when the zone never received any.
    pub fn attachments(&self, name: &str) -> &[SelectedFile] {
        self.attachments.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Flat name → value object, as a form-data walk would produce.
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        for (k, v) in self.entries() {
            map.insert(k.clone(), JsonValue::String(v.clone()));
        }
        JsonValue::Object(map)
    }

    /// Path list per upload zone, in zone name order. Zones without files are
    /// left out.
    pub fn attachments_json(&self) -> JsonValue {
        let mut map = Map::new();
        for name in self.attachments.keys() {
            let files = self.attachments(name);
            if files.is_empty() {
                continue;
            }
            let paths = files
                .iter()
                .map(|f| JsonValue::String(f.path.to_string_lossy().into_owned()))
                .collect();
            map.insert(name.clone(), JsonValue::Array(paths));
        }
        JsonValue::Object(map)
    }

    /// What gets shown and copied after a submit: the fields plus every
    /// attached file.
    pub fn report(&self) -> JsonValue {
        serde_json::json!({
            "fields": self.to_json(),
            "attachments": self.attachments_json(),
        })
    }
}

#[cfg(test)]
impl SubmissionPayload {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
