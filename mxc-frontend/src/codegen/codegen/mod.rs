//! Whole-program lowering
//!
//! Runs in three passes so that no body is lowered before every name it
//! can refer to exists: register all functions and methods, lay out the
//! globals and build their initializer, then lower the bodies. Call-graph
//! sets are computed last.

mod function_gen;
mod global_gen;

use log::debug;
use std::collections::HashMap;
use crate::codegen::{ClassInfo, CodegenError, CodegenOptions, ProgramInfo};
use crate::ir::Module;
use crate::typed_ast::{TypedProgram, TypedTopLevelItem};

/// Name of the synthetic function that runs global initializers
pub const GLOBAL_INIT_FUNCTION: &str = "_init_globals";

/// Module-level symbol of a method
pub fn method_symbol(class: &str, method: &str) -> String {
    format!("{class}.{method}")
}

/// Typed code generator - transforms a typed program to IR
pub struct IrGenerator {
    module: Module,
    options: CodegenOptions,
}

impl IrGenerator {
    pub fn new(module_name: String) -> Self {
        Self::with_options(module_name, CodegenOptions::default())
    }

    pub fn with_options(module_name: String, options: CodegenOptions) -> Self {
        Self {
            module: Module::new(module_name),
            options,
        }
    }

    /// Generate IR module from a typed program
    pub fn generate(mut self, program: &TypedProgram) -> Result<Module, CodegenError> {
        let classes = self.declare_functions(program);
        let init_function = self.module.declare_function(GLOBAL_INIT_FUNCTION, false);
        let info = ProgramInfo {
            classes,
            options: self.options.clone(),
            init_function,
        };

        let globals: Vec<_> = program.globals().collect();
        for global in &globals {
            global_gen::declare_global(&mut self.module, global);
        }
        global_gen::generate_global_initializer(&mut self.module, &info, &globals)?;

        for item in &program.items {
            match item {
                TypedTopLevelItem::Function(func) => {
                    function_gen::generate_function(&mut self.module, &info, func, None)?;
                }
                TypedTopLevelItem::Class(class) => {
                    for method in &class.methods {
                        function_gen::generate_function(&mut self.module, &info, method, Some(&class.name))?;
                    }
                }
                TypedTopLevelItem::GlobalVariable(_) => {}
            }
        }

        self.module.update_callee_set();
        debug!(
            "module '{}': {} user function(s), {} global(s), {} string(s)",
            self.module.name,
            self.module.user_functions().count(),
            self.module.static_data.len(),
            self.module.static_strings.len()
        );
        Ok(self.module)
    }

    fn declare_functions(&mut self, program: &TypedProgram) -> HashMap<String, ClassInfo> {
        for func in program.functions() {
            self.module.declare_function(&func.name, !func.return_type.is_void());
        }

        let mut classes = HashMap::new();
        for class in program.classes() {
            for method in &class.methods {
                self.module
                    .declare_function(&method_symbol(&class.name, &method.name), !method.return_type.is_void());
            }
            let constructor = class
                .constructor()
                .and_then(|ctor| self.module.function_id(&method_symbol(&class.name, &ctor.name)));
            classes.insert(class.name.clone(), ClassInfo { size: class.size, constructor });
        }
        classes
    }
}
