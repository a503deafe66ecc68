//! Common identifier types used throughout the compiler
//!
//! IR entities live in per-function or per-module arenas and are referred
//! to by index. These aliases name what an index points into.

/// Basic block identifier, an index into its function's block arena
pub type LabelId = u32;

/// Virtual register identifier, an index into its function's register arena
pub type TempId = u32;

/// Function identifier, an index into the module's function table
pub type FunctionId = u32;

/// Interned string identifier, an index into the module's string pool
pub type StringId = u32;

/// Global variable slot identifier, an index into the module's static data list
pub type StaticId = u32;

/// Identity of a `for` statement, assigned by the resolver
pub type LoopId = u32;

/// Identity of a local variable or parameter, assigned by the resolver
pub type LocalId = u32;

/// Converts an arena id back into a vector index.
#[inline]
pub fn index_of(id: u32) -> usize {
    id as usize
}

/// Converts a vector length into the id of the next element.
///
/// Arenas never grow past `u32::MAX` entries in practice; a larger program
/// is an internal error rather than something to recover from.
#[inline]
pub fn next_id(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("IR arena overflow: {len} entries"))
}
