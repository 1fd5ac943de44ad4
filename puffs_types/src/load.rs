/* Loading checked declaration files into the in-memory model */

use crate::ident::IdMap;
use crate::schema::{DeclSpec, FileSpec, StructSpec, TypeSpec};
use crate::types::{Const, Decl, Field, File, Func, Struct, TypeExpr};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

/// One loaded source file together with the package it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub package: String,
    pub file: File,
}

/// Reads and lowers a declaration file, interning every name into `ids`.
pub fn load_file(path: &Path, ids: &mut IdMap) -> Result<LoadedFile, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let default_path = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    load_str(&content, &default_path, ids).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses one YAML document. `default_path` names the file when the document
/// does not carry a `path` of its own.
pub fn load_str(content: &str, default_path: &str, ids: &mut IdMap) -> Result<LoadedFile, serde_yml::Error> {
    let spec: FileSpec = serde_yml::from_str(content)?;
    Ok(lower_file(spec, default_path, ids))
}

pub fn lower_file(spec: FileSpec, default_path: &str, ids: &mut IdMap) -> LoadedFile {
    let decls = spec.decls.iter().map(|decl| lower_decl(decl, ids)).collect();
    LoadedFile {
        package: spec.package,
        file: File {
            path: spec.path.unwrap_or_else(|| default_path.to_string()),
            decls,
        },
    }
}

fn lower_decl(spec: &DeclSpec, ids: &mut IdMap) -> Decl {
    match spec {
        DeclSpec::Struct(s) => Decl::Struct(lower_struct(s, ids)),
        DeclSpec::Func(f) => Decl::Func(Func { name: ids.intern(&f.name) }),
        DeclSpec::Const(c) => Decl::Const(Const {
            name: ids.intern(&c.name),
            value: c.value,
        }),
    }
}

fn lower_struct(spec: &StructSpec, ids: &mut IdMap) -> Struct {
    let name = ids.intern(&spec.name);
    let fields = spec
        .fields
        .iter()
        .map(|field| Field {
            name: ids.intern(&field.name),
            ty: lower_type(&field.field_type, ids),
        })
        .collect();
    Struct {
        name,
        fields,
        suspendible: spec.suspendible,
    }
}

/* Anything the C backend cannot express collapses into `Unsupported`, keeping
 * its full source spelling for diagnostics. */
pub fn lower_type(spec: &TypeSpec, ids: &mut IdMap) -> TypeExpr {
    match spec {
        TypeSpec::Primitive(name) => TypeExpr::Primitive(ids.intern(name)),
        TypeSpec::Array(array) => TypeExpr::array(array.length, lower_type(&array.element, ids)),
        TypeSpec::Qualified(_) | TypeSpec::Decorated(_) => TypeExpr::unsupported(spec.source_text()),
    }
}
