//! Runtime library entry points
//!
//! Every module starts with one body-less function per built-in. They take
//! the first function ids, in catalogue order, so `Builtin as FunctionId`
//! is the built-in's id in any module.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Builtin {
    Print,
    Println,
    PrintInt,
    PrintlnInt,
    GetString,
    GetInt,
    ToString,
    StringLength,
    StringSubstring,
    StringParseInt,
    StringOrd,
    StringConcat,
    StringEqual,
    StringInequal,
    StringLess,
    StringLessEqual,
    ArraySize,
    Malloc,
}

impl Builtin {
    pub const ALL: [Builtin; 18] = [
        Builtin::Print,
        Builtin::Println,
        Builtin::PrintInt,
        Builtin::PrintlnInt,
        Builtin::GetString,
        Builtin::GetInt,
        Builtin::ToString,
        Builtin::StringLength,
        Builtin::StringSubstring,
        Builtin::StringParseInt,
        Builtin::StringOrd,
        Builtin::StringConcat,
        Builtin::StringEqual,
        Builtin::StringInequal,
        Builtin::StringLess,
        Builtin::StringLessEqual,
        Builtin::ArraySize,
        Builtin::Malloc,
    ];

    /// Name the function is registered under in the module
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Println => "println",
            Builtin::PrintInt => "printInt",
            Builtin::PrintlnInt => "printlnInt",
            Builtin::GetString => "getString",
            Builtin::GetInt => "getInt",
            Builtin::ToString => "toString",
            Builtin::StringLength => "string.length",
            Builtin::StringSubstring => "string.substring",
            Builtin::StringParseInt => "string.parseInt",
            Builtin::StringOrd => "string.ord",
            Builtin::StringConcat => "string.concat",
            Builtin::StringEqual => "string.eq",
            Builtin::StringInequal => "string.ne",
            Builtin::StringLess => "string.lt",
            Builtin::StringLessEqual => "string.le",
            Builtin::ArraySize => "array.size",
            Builtin::Malloc => "malloc",
        }
    }

    /// Linkage symbol in the runtime library
    pub fn symbol(&self) -> &'static str {
        match self {
            Builtin::Print => "__mx_print",
            Builtin::Println => "__mx_println",
            Builtin::PrintInt => "__mx_printInt",
            Builtin::PrintlnInt => "__mx_printlnInt",
            Builtin::GetString => "__mx_getString",
            Builtin::GetInt => "__mx_getInt",
            Builtin::ToString => "__mx_toString",
            Builtin::StringLength => "__mx_string_length",
            Builtin::StringSubstring => "__mx_string_substring",
            Builtin::StringParseInt => "__mx_string_parseInt",
            Builtin::StringOrd => "__mx_string_ord",
            Builtin::StringConcat => "__mx_string_concat",
            Builtin::StringEqual => "__mx_string_eq",
            Builtin::StringInequal => "__mx_string_ne",
            Builtin::StringLess => "__mx_string_lt",
            Builtin::StringLessEqual => "__mx_string_le",
            Builtin::ArraySize => "__mx_array_size",
            Builtin::Malloc => "malloc",
        }
    }

    pub fn has_return_value(&self) -> bool {
        !matches!(self, Builtin::Print | Builtin::Println | Builtin::PrintInt | Builtin::PrintlnInt)
    }
}
