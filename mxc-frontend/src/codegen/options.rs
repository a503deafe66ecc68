//! Lowering configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodegenOptions {
    /// Function that calls the global initializer before anything else
    /// and returns 0 when control falls off its end
    pub entry_point: String,
    /// Lower `print(toString(n))` to `printInt(n)` (and the `println` pair)
    pub print_int_fast_path: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            entry_point: "main".to_string(),
            print_int_fast_path: true,
        }
    }
}
