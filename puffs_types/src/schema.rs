/* Interchange schema for checked declaration files.
 *
 * One YAML document describes one source file of a package. The loader in
 * `load.rs` interns every name and lowers these specs into `types.rs`. */

use serde_derive::Deserialize;

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ArraySpec {
    pub length: u64,
    pub element: Box<TypeSpec>,
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct QualifiedSpec {
    pub package: String,
    pub name: String,
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DecoratedSpec {
    pub decorator: String,
    pub inner: Box<TypeSpec>,
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum TypeSpec {
    Primitive(String),
    Array(ArraySpec),
    Qualified(QualifiedSpec),
    Decorated(DecoratedSpec),
}

impl TypeSpec {
    /* Source spelling, as the checker would print it */
    pub fn source_text(&self) -> String {
        match self {
            TypeSpec::Primitive(name) => name.clone(),
            TypeSpec::Array(array) => format!("[{}] {}", array.length, array.element.source_text()),
            TypeSpec::Qualified(q) => format!("{}.{}", q.package, q.name),
            TypeSpec::Decorated(d) => format!("{} {}", d.decorator, d.inner.source_text()),
        }
    }
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeSpec,
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct StructSpec {
    pub name: String,
    #[serde(default)]
    pub suspendible: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FuncSpec {
    pub name: String,
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ConstSpec {
    pub name: String,
    pub value: i64,
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum DeclSpec {
    Struct(StructSpec),
    Func(FuncSpec),
    Const(ConstSpec),
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FileSpec {
    pub package: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, with = "serde_yml::with::singleton_map_recursive")]
    pub decls: Vec<DeclSpec>,
}
