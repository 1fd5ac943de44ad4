use super::helpers::FIELD_PREFIX;
use crate::error::{GenError, GenResult};
use puffs_types::ident::*;
use puffs_types::{Field, IdMap, TypeExpr};
use std::collections::HashMap;
use std::fmt::Write;

/* Primitive key -> C type name. Built once, read-only afterwards. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CTypeNames {
    names: HashMap<Id, String>,
}

impl Default for CTypeNames {
    fn default() -> Self {
        Self::empty()
            .with(KEY_I8, "int8_t")
            .with(KEY_I16, "int16_t")
            .with(KEY_I32, "int32_t")
            .with(KEY_I64, "int64_t")
            .with(KEY_U8, "uint8_t")
            .with(KEY_U16, "uint16_t")
            .with(KEY_U32, "uint32_t")
            .with(KEY_U64, "uint64_t")
            .with(KEY_USIZE, "size_t")
            .with(KEY_BOOL, "bool")
    }
}

impl CTypeNames {
    pub fn empty() -> Self {
        Self { names: HashMap::new() }
    }

    pub fn with(mut self, key: Id, c_name: impl Into<String>) -> Self {
        self.names.insert(key, c_name.into());
        self
    }

    pub fn get(&self, key: Id) -> Option<&str> {
        self.names.get(&key).map(String::as_str)
    }
}

/// A field type lowered to C: base type name plus array extents, outermost
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CType<'n> {
    pub base: &'n str,
    pub extents: Vec<u64>,
}

/* Walks the decorator chain outermost-in. Array extents are deferred until
 * the terminal primitive is found; any other decorator fails the whole type. */
pub fn lower_type<'n>(type_names: &'n CTypeNames, ty: &TypeExpr) -> Option<CType<'n>> {
    let mut extents = Vec::new();
    let mut node = ty;
    loop {
        match node {
            TypeExpr::Array { length, inner } => {
                extents.push(*length);
                node = &**inner;
            }
            TypeExpr::Primitive(key) => {
                let base = type_names.get(*key)?;
                return Some(CType { base, extents });
            }
            TypeExpr::Unsupported { .. } => return None,
        }
    }
}

/// Renders `<c-type> f_<name>[N]...` for one field of `structure`.
pub fn format_field_declaration(
    type_names: &CTypeNames,
    ids: &IdMap,
    structure: &str,
    field: &Field,
) -> GenResult<String> {
    let field_name = ids.name(field.name);
    let Some(c_type) = lower_type(type_names, &field.ty) else {
        return Err(GenError::UnconvertibleType {
            structure: structure.to_string(),
            field: field_name,
            type_text: field.ty.source_text(ids),
        });
    };

    let mut declaration = format!("{} {}{}", c_type.base, FIELD_PREFIX, field_name);
    for extent in &c_type.extents {
        write!(declaration, "[{}]", extent).unwrap();
    }
    Ok(declaration)
}
