//! Mx* source-level types
//!
//! Every value of every type occupies one machine slot: integers and
//! booleans are stored directly, strings, arrays and objects as pointers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size in bytes of one value slot (register width, array element, field)
pub const REG_SIZE: i64 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Void,
    /// Type of the `null` literal
    Null,
    Bool,
    Int,
    String,
    Class(String),
    Array(Box<Type>),
}

impl Type {
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::String)
    }

    /// Element type of an array, `None` for everything else
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// Wraps `base` in `dims` levels of array
    pub fn array_of(base: Type, dims: usize) -> Type {
        (0..dims).fold(base, |ty, _| Type::Array(Box::new(ty)))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Null => write!(f, "null"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::String => write!(f, "string"),
            Type::Class(name) => write!(f, "{}", name),
            Type::Array(elem) => write!(f, "{}[]", elem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_of() {
        let ty = Type::array_of(Type::Int, 2);
        assert_eq!(format!("{}", ty), "int[][]");
        assert_eq!(ty.element_type(), Some(&Type::Array(Box::new(Type::Int))));
        assert_eq!(Type::Int.element_type(), None);
    }
}
