use crate::model::WizardConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "resume-wizard.yaml";

/// Where the active form definition came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(p) => write!(f, "{}", p.display()),
            ConfigSource::Builtin => write!(f, "built-in"),
        }
    }
}

fn read_config(p: &Path) -> Result<WizardConfig> {
    let s = fs::read_to_string(p).with_context(|| format!("reading {p:?}"))?;
    let cfg: WizardConfig = serde_yaml::from_str(&s).with_context(|| format!("parsing {p:?}"))?;
    Ok(cfg)
}

/// Finds the first form definition file, looking at an explicit path, then
/// the working directory, then `.tui/` in any ancestor, then `~/.tui/`.
pub fn discover(explicit: Option<&Path>, cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let candidates = [cwd.join(CONFIG_FILE), cwd.join(".tui").join(CONFIG_FILE)];
    for p in candidates {
        if p.exists() {
            return Some(p);
        }
    }
    let mut cur = cwd;
    while let Some(parent) = cur.parent() {
        let p = parent.join(".tui").join(CONFIG_FILE);
        if p.exists() {
            return Some(p);
        }
        cur = parent;
    }
    if let Some(home) = home {
        let p = home.join(".tui").join(CONFIG_FILE);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

pub fn load_from(
    explicit: Option<&Path>,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<(WizardConfig, ConfigSource)> {
    match discover(explicit, cwd, home) {
        Some(p) => {
            let cfg = read_config(&p)?;
            Ok((cfg, ConfigSource::File(p)))
        }
        None => Ok((WizardConfig::builtin()?, ConfigSource::Builtin)),
    }
}

/// Loads the form definition named by `RESUME_WIZARD_CONFIG`, or discovers one,
/// falling back to the built-in résumé form.
pub fn load_config() -> Result<(WizardConfig, ConfigSource)> {
    let explicit = std::env::var("RESUME_WIZARD_CONFIG").ok().map(PathBuf::from);
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = std::env::var("HOME")
        .ok()
        .or_else(|| std::env::var("USERPROFILE").ok())
        .map(PathBuf::from);
    load_from(explicit.as_deref(), &cwd, home.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SMALL: &str = r#"
title: Small
triggers: [{ id: t, label: Use Template }]
steps:
  - { step: 1, title: Only }
"#;

    #[test]
    fn falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let (cfg, src) = load_from(None, dir.path(), None).unwrap();
        assert_eq!(src, ConfigSource::Builtin);
        assert_eq!(cfg.title, "Build Your Resume");
    }

    #[test]
    fn finds_file_in_ancestor_tui_dir() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join(".tui")).unwrap();
        fs::write(root.path().join(".tui").join(CONFIG_FILE), SMALL).unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        let (cfg, src) = load_from(None, &nested, None).unwrap();
        assert_eq!(cfg.title, "Small");
        assert_eq!(
            src,
            ConfigSource::File(root.path().join(".tui").join(CONFIG_FILE))
        );
    }

    #[test]
    fn explicit_path_wins_and_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("custom.yaml");
        fs::write(&good, SMALL).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "title: [").unwrap();
        let (cfg, _) = load_from(Some(&good), dir.path(), None).unwrap();
        assert_eq!(cfg.steps.len(), 1);

        let err = load_from(None, dir.path(), None).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }

    #[test]
    fn home_dir_is_last_resort() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(".tui")).unwrap();
        fs::write(home.path().join(".tui").join(CONFIG_FILE), SMALL).unwrap();
        let found = discover(None, cwd.path(), Some(home.path()));
        assert_eq!(found, Some(home.path().join(".tui").join(CONFIG_FILE)));
    }
}
