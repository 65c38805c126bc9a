use std::fmt::{self, Display};

/// Errors produced by model parsers and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An action payload was present but malformed (e.g. `GO_TO` without an index).
    InvalidAction { kind: String, reason: String },
    /// A value outside of a closed enumeration.
    UnknownVariant { field: &'static str, value: String },
    /// A gallery snapshot needs at least one frame.
    EmptyGallery,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidAction { kind, reason } => {
                write!(f, "invalid {kind} action: {reason}")
            }
            ModelError::UnknownVariant { field, value } => {
                write!(f, "unknown {field}: {value}")
            }
            ModelError::EmptyGallery => {
                write!(f, "a gallery needs at least one frame")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
