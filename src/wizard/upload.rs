use crate::wizard::fields::Validatable;
use std::path::{Path, PathBuf};

/// Reference to a file chosen for an upload zone. The file itself is never read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// Splits text dropped onto a terminal into file references.
///
/// Terminals deliver a drag-and-drop as a paste of shell-quoted paths, one or
/// more separated by whitespace; `file://` prefixes are stripped.
pub fn parse_dropped_paths(text: &str) -> Vec<SelectedFile> {
    let parts = shlex::split(text.trim()).unwrap_or_else(|| vec![text.trim().to_string()]);
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(|p| {
            let p = p.strip_prefix("file://").map(str::to_string).unwrap_or(p);
            SelectedFile::new(Path::new(&p))
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoneTreatment {
    #[default]
    Idle,
    Selected,
}

#[derive(Clone, Debug)]
pub struct UploadZone {
    pub name: String,
    pub label: String,
    pub accept: Option<String>,
    pub required: bool,
    files: Vec<SelectedFile>,
    display: String,
    treatment: ZoneTreatment,
    flagged: bool,
}

impl UploadZone {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            accept: None,
            required: false,
            files: Vec::new(),
            display: String::new(),
            treatment: ZoneTreatment::Idle,
            flagged: false,
        }
    }

    /// Full file list attached to the zone.
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn first(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    /// Name shown in the zone's display element.
    pub fn display_name(&self) -> &str {
        &self.display
    }

    /// Visual treatment, independent of the committed files.
    pub fn treatment(&self) -> ZoneTreatment {
        self.treatment
    }

    /// Commits a new file list. An empty list leaves the zone untouched.
    /// Returns whether anything was committed.
    pub fn select(&mut self, files: Vec<SelectedFile>) -> bool {
        let Some(first) = files.first() else {
            return false;
        };
        self.display = first.name();
        self.files = files;
        self.flagged = false;
        self.treatment = ZoneTreatment::Selected;
        true
    }

    pub fn drag_over(&mut self) {
        self.treatment = ZoneTreatment::Selected;
    }

    pub fn drag_leave(&mut self) {
        self.treatment = ZoneTreatment::Idle;
    }

    /// Drop ends the drag: back to the default look, then selected again only
    /// if the drop carried files.
    pub fn drop_files(&mut self, files: Vec<SelectedFile>) -> bool {
        self.treatment = ZoneTreatment::Idle;
        self.select(files)
    }
}

impl Validatable for UploadZone {
    fn name(&self) -> &str {
        &self.name
    }
    fn required(&self) -> bool {
        self.required
    }
    fn validation_text(&self) -> &str {
        &self.display
    }
    fn flagged(&self) -> bool {
        self.flagged
    }
    fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_matches_chooser() {
        let mut chosen = UploadZone::new("resumeFile", "Resume");
        let mut dropped = UploadZone::new("resumeFile", "Resume");
        chosen.select(vec![SelectedFile::new("/tmp/cv.pdf")]);
        dropped.drag_over();
        dropped.drop_files(vec![SelectedFile::new("/tmp/cv.pdf")]);
        assert_eq!(chosen.display_name(), "cv.pdf");
        assert_eq!(dropped.display_name(), chosen.display_name());
        assert_eq!(dropped.treatment(), chosen.treatment());
        assert_eq!(dropped.treatment(), ZoneTreatment::Selected);
    }

    #[test]
    fn drag_preview_reverts_on_leave() {
        let mut z = UploadZone::new("photoFile", "Photo");
        z.drag_over();
        assert_eq!(z.treatment(), ZoneTreatment::Selected);
        z.drag_leave();
        assert_eq!(z.treatment(), ZoneTreatment::Idle);
        assert!(z.files().is_empty());
    }

    #[test]
    fn multiple_files_surface_first_and_keep_all() {
        let mut z = UploadZone::new("photoFile", "Photo");
        z.select(vec![SelectedFile::new("/a/old.png")]);
        z.drop_files(vec![
            SelectedFile::new("/b/one.png"),
            SelectedFile::new("/b/two.png"),
        ]);
        assert_eq!(z.display_name(), "one.png");
        assert_eq!(z.files().len(), 2);
        assert!(!z.drop_files(Vec::new()));
        assert_eq!(z.display_name(), "one.png");
        assert_eq!(z.files().len(), 2);
        assert_eq!(z.treatment(), ZoneTreatment::Idle);
    }

    #[test]
    fn leaving_after_commit_restores_default_look() {
        let mut z = UploadZone::new("resumeFile", "Resume");
        z.select(vec![SelectedFile::new("/tmp/cv.pdf")]);
        assert_eq!(z.treatment(), ZoneTreatment::Selected);
        z.drag_over();
        z.drag_leave();
        assert_eq!(z.treatment(), ZoneTreatment::Idle);
        assert_eq!(z.display_name(), "cv.pdf");
        assert_eq!(z.first(), Some(&SelectedFile::new("/tmp/cv.pdf")));

        // Choosing again brings the selected look back
        z.select(vec![SelectedFile::new("/tmp/cv2.pdf")]);
        assert_eq!(z.treatment(), ZoneTreatment::Selected);
    }

    #[test]
    fn parses_quoted_and_uri_paths() {
        let files = parse_dropped_paths("'/home/me/My CV.pdf' file:///tmp/photo.png\n");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name(), "My CV.pdf");
        assert_eq!(files[1].path, PathBuf::from("/tmp/photo.png"));
        assert!(parse_dropped_paths("   ").is_empty());
    }
}
