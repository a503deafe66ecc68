//! Code generation error types
//!
//! Every fault aborts lowering. They fall into three classes, see
//! `FaultKind`.

use mxc_common::{CompilerError, SourceLocation};
use thiserror::Error;
use crate::typed_ast::BinaryOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// A constant expression cannot be evaluated
    ConstantEvaluation,
    /// The tree contains something semantic resolution should have rejected
    ConsistencyViolation,
    /// A name is missing from the module's tables
    Lookup,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("Division by zero in constant expression at {location}")]
    DivisionByZero { location: SourceLocation },

    #[error("'this' used outside of a class at {location}")]
    ThisOutsideClass { location: SourceLocation },

    #[error("'break' outside of a loop at {location}")]
    BreakOutsideLoop { location: SourceLocation },

    #[error("'continue' outside of a loop at {location}")]
    ContinueOutsideLoop { location: SourceLocation },

    #[error("Control reaches end of non-void function '{function}' at {location}")]
    MissingReturn {
        function: String,
        location: SourceLocation,
    },

    #[error("Logical operator '{op}' reached arithmetic lowering at {location}")]
    UnsplitLogicalOperator {
        op: BinaryOp,
        location: SourceLocation,
    },

    #[error("Invalid operands for '{op}' at {location}: {message}")]
    InvalidOperands {
        op: String,
        message: String,
        location: SourceLocation,
    },

    #[error("Invalid lvalue at {location}")]
    InvalidLvalue { location: SourceLocation },

    #[error("Undefined function '{name}' at {location}")]
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("Undefined global variable '{name}' at {location}")]
    UndefinedGlobal {
        name: String,
        location: SourceLocation,
    },

    #[error("Undefined class '{name}' at {location}")]
    UndefinedClass {
        name: String,
        location: SourceLocation,
    },

    #[error("Undefined local variable '{name}' at {location}")]
    UndefinedLocal {
        name: String,
        location: SourceLocation,
    },
}

impl CodegenError {
    pub fn kind(&self) -> FaultKind {
        match self {
            CodegenError::DivisionByZero { .. } => FaultKind::ConstantEvaluation,
            CodegenError::ThisOutsideClass { .. }
            | CodegenError::BreakOutsideLoop { .. }
            | CodegenError::ContinueOutsideLoop { .. }
            | CodegenError::MissingReturn { .. }
            | CodegenError::UnsplitLogicalOperator { .. }
            | CodegenError::InvalidOperands { .. }
            | CodegenError::InvalidLvalue { .. } => FaultKind::ConsistencyViolation,
            CodegenError::UndefinedFunction { .. }
            | CodegenError::UndefinedGlobal { .. }
            | CodegenError::UndefinedClass { .. }
            | CodegenError::UndefinedLocal { .. } => FaultKind::Lookup,
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            CodegenError::DivisionByZero { location }
            | CodegenError::ThisOutsideClass { location }
            | CodegenError::BreakOutsideLoop { location }
            | CodegenError::ContinueOutsideLoop { location }
            | CodegenError::MissingReturn { location, .. }
            | CodegenError::UnsplitLogicalOperator { location, .. }
            | CodegenError::InvalidOperands { location, .. }
            | CodegenError::InvalidLvalue { location }
            | CodegenError::UndefinedFunction { location, .. }
            | CodegenError::UndefinedGlobal { location, .. }
            | CodegenError::UndefinedClass { location, .. }
            | CodegenError::UndefinedLocal { location, .. } => location,
        }
    }
}

impl From<CodegenError> for CompilerError {
    fn from(err: CodegenError) -> Self {
        CompilerError::CodegenError {
            location: err.location().clone(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_kinds() {
        let loc = SourceLocation::new_simple(2, 5);
        assert_eq!(CodegenError::DivisionByZero { location: loc.clone() }.kind(), FaultKind::ConstantEvaluation);
        assert_eq!(CodegenError::BreakOutsideLoop { location: loc.clone() }.kind(), FaultKind::ConsistencyViolation);
        assert_eq!(
            CodegenError::UndefinedGlobal { name: "g".to_string(), location: loc }.kind(),
            FaultKind::Lookup
        );
    }

    #[test]
    fn test_conversion_keeps_location() {
        let loc = SourceLocation::new("a.mx", 3, 1);
        let err: CompilerError = CodegenError::ContinueOutsideLoop { location: loc.clone() }.into();
        assert_eq!(err.location(), Some(&loc));
        assert!(err.to_string().contains("'continue' outside of a loop"));
    }
}
