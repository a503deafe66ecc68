//! Typed program: the top-level items handed over by the resolver

use mxc_common::{LocalId, SourceLocation};
use serde::{Deserialize, Serialize};
use crate::types::Type;
use super::{TypedExpr, TypedStmt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedParameter {
    pub name: String,
    pub id: LocalId,
    pub param_type: Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedFunction {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<TypedParameter>,
    pub body: Vec<TypedStmt>,
    #[serde(default)]
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedGlobal {
    pub name: String,
    pub var_type: Type,
    pub initializer: Option<TypedExpr>,
    #[serde(default)]
    pub location: SourceLocation,
}

/// A class with its precomputed layout. The constructor, if any, is the
/// method named like the class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedClass {
    pub name: String,
    /// Instance size in bytes
    pub size: i64,
    pub methods: Vec<TypedFunction>,
    #[serde(default)]
    pub location: SourceLocation,
}

impl TypedClass {
    pub fn constructor(&self) -> Option<&TypedFunction> {
        self.methods.iter().find(|m| m.name == self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedTopLevelItem {
    GlobalVariable(TypedGlobal),
    Function(TypedFunction),
    Class(TypedClass),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypedProgram {
    pub items: Vec<TypedTopLevelItem>,
}

impl TypedProgram {
    pub fn new(items: Vec<TypedTopLevelItem>) -> Self {
        Self { items }
    }

    /// Global variable declarations in declaration order
    pub fn globals(&self) -> impl Iterator<Item = &TypedGlobal> {
        self.items.iter().filter_map(|item| match item {
            TypedTopLevelItem::GlobalVariable(global) => Some(global),
            _ => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &TypedFunction> {
        self.items.iter().filter_map(|item| match item {
            TypedTopLevelItem::Function(func) => Some(func),
            _ => None,
        })
    }

    pub fn classes(&self) -> impl Iterator<Item = &TypedClass> {
        self.items.iter().filter_map(|item| match item {
            TypedTopLevelItem::Class(class) => Some(class),
            _ => None,
        })
    }
}
