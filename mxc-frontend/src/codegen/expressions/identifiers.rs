//! Identifier code generation

use mxc_common::SourceLocation;
use super::ExpressionGenerator;
use crate::codegen::CodegenError;
use crate::ir::{Register, Value};
use crate::typed_ast::Storage;

pub fn generate_identifier(
    gen: &mut ExpressionGenerator,
    name: &str,
    storage: &Storage,
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    match storage {
        Storage::Member { offset } => {
            let this = this_value(gen, location)?;
            Ok(gen.ctx.builder.build_load(this, *offset))
        }
        _ => identifier_register(gen, name, storage, location).map(Value::from),
    }
}

/// Register or global slot holding a non-member identifier
pub fn identifier_register(
    gen: &mut ExpressionGenerator,
    name: &str,
    storage: &Storage,
    location: &SourceLocation,
) -> Result<Register, CodegenError> {
    match storage {
        Storage::Local(id) => gen
            .ctx
            .locals
            .get(id)
            .map(|reg| Register::Virtual(*reg))
            .ok_or_else(|| CodegenError::UndefinedLocal {
                name: name.to_string(),
                location: location.clone(),
            }),
        Storage::Global => gen
            .module
            .static_data_id(name)
            .map(Register::Static)
            .ok_or_else(|| CodegenError::UndefinedGlobal {
                name: name.to_string(),
                location: location.clone(),
            }),
        Storage::Member { .. } => Err(CodegenError::InvalidLvalue {
            location: location.clone(),
        }),
    }
}

pub fn this_value(gen: &mut ExpressionGenerator, location: &SourceLocation) -> Result<Value, CodegenError> {
    gen.ctx
        .this_register
        .map(Value::Reg)
        .ok_or_else(|| CodegenError::ThisOutsideClass {
            location: location.clone(),
        })
}
