//! Mx* Compiler - Common Types and Utilities
//!
//! This crate contains shared identifiers, error definitions, and source
//! locations used across all components of the Mx* compiler.

pub mod error;
pub mod types;
pub mod source_loc;

pub use error::CompilerError;
pub use types::*;
pub use source_loc::SourceLocation;
