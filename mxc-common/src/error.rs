//! Error handling for the Mx* compiler
//!
//! Each phase defines its own error enum and converts into `CompilerError`
//! at the crate boundary.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Invalid input: {message}")]
    InputError { message: String },

    #[error("Code generation error at {location}: {message}")]
    CodegenError {
        location: SourceLocation,
        message: String,
    },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    pub fn input_error(message: impl Into<String>) -> Self {
        CompilerError::InputError {
            message: message.into(),
        }
    }

    pub fn codegen_error(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::CodegenError {
            location,
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        CompilerError::InternalError {
            message: message.into(),
        }
    }

    /// Source location of the failure, when the phase recorded one
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            CompilerError::CodegenError { location, .. } => Some(location),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<String> for CompilerError {
    fn from(message: String) -> Self {
        CompilerError::InternalError { message }
    }
}
