use super::helpers::{EmitContext, STATUS_FIELD};
use super::types::format_field_declaration;
use crate::error::GenResult;
use puffs_types::Struct;
use std::fmt::Write;

/* Outcome codes shared by every suspendible struct of a package */
pub const STATUS_CODES: [(&str, i32); 3] = [("ok", 0), ("short_output", -1), ("short_input", -2)];

pub fn emit_status_enum(output: &mut String, cx: &EmitContext) {
    let status_type = cx.status_type();
    output.push_str("typedef enum {\n");
    for (name, value) in STATUS_CODES {
        writeln!(output, "  {}_{} = {},", status_type, name, value).unwrap();
    }
    write!(output, "}} {};\n\n", status_type).unwrap();
}

/// Emits `typedef struct { ... } <layout>;` for one struct.
///
/// Suspendible structs expose their status as member zero. Fields are lowered
/// into a scratch buffer first, so a failing field leaves `output` untouched.
pub fn emit_struct(output: &mut String, cx: &EmitContext, structure: &Struct) -> GenResult<()> {
    let struct_name = cx.ids.name(structure.name);
    let mut body = String::from("typedef struct {\n");

    if structure.suspendible {
        writeln!(body, "  {} {};", cx.status_type(), STATUS_FIELD).unwrap();
    }
    for field in &structure.fields {
        let declaration = format_field_declaration(cx.type_names, cx.ids, &struct_name, field)?;
        writeln!(body, "  {};", declaration).unwrap();
    }
    write!(body, "}} {};\n\n", cx.layout_name(&struct_name)).unwrap();

    tracing::debug!(
        structure = %struct_name,
        fields = structure.fields.len(),
        suspendible = structure.suspendible,
        "emitted struct"
    );
    output.push_str(&body);
    Ok(())
}
