use thiserror::Error;

/// A validation failure on a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug)]
pub enum RosterError {
    /// Network failure, non-2xx status, or malformed body from the remote
    /// service. Carries the user-facing message; the raw cause is logged.
    #[error("{0}")]
    Transport(String),

    /// Field-level form errors, collected before any request is sent.
    #[error("{}", render_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

fn render_fields(errors: &[FieldError]) -> String {
    let mut out = String::from("Validation failed:");
    for e in errors {
        out.push_str("\n  ");
        out.push_str(&e.to_string());
    }
    out
}

pub type Result<T> = std::result::Result<T, RosterError>;
