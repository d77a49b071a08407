//! Error types for the Glint element analyzer

use thiserror::Error;

/// Fatal diagnostics. Each variant binds to the source line of the violating
/// construct; the umbrella driver resolves lines back to file positions.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Attribute error at line {line}: {message}")]
    Attribute { line: usize, message: String },

    #[error("Slot error at line {line}: {message}")]
    Slot { line: usize, message: String },

    #[error("Binding error at line {line}: {message}")]
    Binding { line: usize, message: String },

    #[error("Event modifier error at line {line}: {message}")]
    EventModifier { line: usize, message: String },

    #[error("Structure error at line {line}: {message}")]
    Structure { line: usize, message: String },

    #[error("Internal compiler invariant violated: {message}")]
    Internal { message: String },
}

pub type Result<T> = std::result::Result<T, CompileError>;

impl CompileError {
    pub fn attribute(line: usize, message: impl Into<String>) -> Self {
        Self::Attribute {
            line,
            message: message.into(),
        }
    }

    pub fn slot(line: usize, message: impl Into<String>) -> Self {
        Self::Slot {
            line,
            message: message.into(),
        }
    }

    pub fn binding(line: usize, message: impl Into<String>) -> Self {
        Self::Binding {
            line,
            message: message.into(),
        }
    }

    pub fn event_modifier(line: usize, message: impl Into<String>) -> Self {
        Self::EventModifier {
            line,
            message: message.into(),
        }
    }

    pub fn structure(line: usize, message: impl Into<String>) -> Self {
        Self::Structure {
            line,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Source line this error binds to, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Attribute { line, .. }
            | Self::Slot { line, .. }
            | Self::Binding { line, .. }
            | Self::EventModifier { line, .. }
            | Self::Structure { line, .. } => Some(*line),
            Self::Internal { .. } => None,
        }
    }
}
