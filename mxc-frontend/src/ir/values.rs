//! IR Value Representations
//!
//! Defines values that can be used as operands in IR instructions:
//! immediates, virtual registers, interned strings and global slots.

use mxc_common::{StaticId, StringId, TempId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR Value - represents operands in IR instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Compile-time integer
    Imm(i64),

    /// Virtual register of the current function
    Reg(TempId),

    /// Address of an interned string in the module's pool
    Str(StringId),

    /// Global variable slot
    Static(StaticId),
}

impl Value {
    pub fn as_imm(&self) -> Option<i64> {
        match self {
            Value::Imm(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_imm(&self) -> bool {
        matches!(self, Value::Imm(_))
    }

    pub fn as_register(&self) -> Option<Register> {
        match self {
            Value::Reg(id) => Some(Register::Virtual(*id)),
            Value::Static(id) => Some(Register::Static(*id)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Imm(val) => write!(f, "{val}"),
            Value::Reg(id) => write!(f, "%{id}"),
            Value::Str(id) => write!(f, "@str.{id}"),
            Value::Static(id) => write!(f, "@static.{id}"),
        }
    }
}

/// Destination of a value-producing instruction. Immediates and strings
/// can never be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    Virtual(TempId),
    Static(StaticId),
}

impl Register {
    pub fn as_virtual(&self) -> Option<TempId> {
        match self {
            Register::Virtual(id) => Some(*id),
            Register::Static(_) => None,
        }
    }
}

impl From<Register> for Value {
    fn from(reg: Register) -> Self {
        match reg {
            Register::Virtual(id) => Value::Reg(id),
            Register::Static(id) => Value::Static(id),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(*self))
    }
}

/// Register arena entry; the name is for debugging only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualRegister {
    pub id: TempId,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticString {
    pub id: StringId,
    pub value: String,
}

/// A global variable's storage slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticData {
    pub id: StaticId,
    pub name: String,
    pub size: i64,
}
