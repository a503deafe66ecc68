//! Source location tracking for error reporting
//!
//! Every typed syntax tree node carries the location it came from so that a
//! fault raised during lowering can point back at the offending construct.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0, 0)
    }

    pub fn new_simple(line: u32, column: u32) -> Self {
        Self::new("<input>", line, column)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::dummy()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = SourceLocation::new("main.mx", 3, 14);
        assert_eq!(format!("{}", loc), "main.mx:3:14");
        assert_eq!(format!("{}", SourceLocation::new_simple(1, 2)), "<input>:1:2");
    }

    #[test]
    fn test_default_is_dummy() {
        assert_eq!(SourceLocation::default(), SourceLocation::dummy());
    }
}
