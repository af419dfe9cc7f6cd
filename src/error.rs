use thiserror::Error;

/// Errors raised while mounting a form definition or dispatching events to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// An element the wizard expects to exist is not declared.
    #[error("missing expected element: {0}")]
    MissingElement(String),

    /// Two elements share a name that must be unique.
    #[error("duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("invalid {kind} name '{name}'")]
    InvalidName { kind: &'static str, name: String },

    /// A field declares an attribute its kind does not support.
    #[error("field '{field}': {message}")]
    Unsupported { field: String, message: String },

    /// An event referenced a control the mounted form does not declare.
    #[error("unknown {kind} '{name}'")]
    UnknownControl { kind: &'static str, name: String },

    /// An event targeted a control on a step panel that is not showing.
    #[error("'{name}' is not on the current step ({step})")]
    NotOnStep { name: String, step: usize },
}

impl WizardError {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        WizardError::MissingElement(what.into())
    }

    pub(crate) fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        WizardError::UnknownControl {
            kind,
            name: name.into(),
        }
    }
}

pub type WizardResult<T> = Result<T, WizardError>;
