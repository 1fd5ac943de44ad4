use crate::ident::{Id, IdMap};

/* A field's type as a chain of decorators, outermost first */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /* Terminal primitive key, e.g. `u32` */
    Primitive(Id),
    /* `[length] inner` */
    Array { length: u64, inner: Box<TypeExpr> },
    /* Package-qualified name or any decorator with no C counterpart.
     * `spelling` is the node's source text, including whatever it wraps. */
    Unsupported { spelling: String },
}

impl TypeExpr {
    pub fn array(length: u64, inner: TypeExpr) -> Self {
        TypeExpr::Array { length, inner: Box::new(inner) }
    }

    pub fn unsupported(spelling: impl Into<String>) -> Self {
        TypeExpr::Unsupported { spelling: spelling.into() }
    }

    /// Renders the type back into source syntax, e.g. `[4] [2] u8`.
    pub fn source_text(&self, ids: &IdMap) -> String {
        match self {
            TypeExpr::Primitive(id) => ids.name(*id),
            TypeExpr::Array { length, inner } => format!("[{}] {}", length, inner.source_text(ids)),
            TypeExpr::Unsupported { spelling } => spelling.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: Id,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub name: Id,
    pub fields: Vec<Field>,
    /* Carries resumable-computation state: gets a status slot and lifecycle hooks */
    pub suspendible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    pub name: Id,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Const {
    pub name: Id,
    pub value: i64,
}

/* Top-level declaration of one compilation unit */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Struct(Struct),
    Func(Func),
    Const(Const),
}

impl Decl {
    pub fn name(&self) -> Id {
        match self {
            Decl::Struct(s) => s.name,
            Decl::Func(f) => f.name,
            Decl::Const(c) => c.name,
        }
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Decl::Struct(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub path: String,
    pub decls: Vec<Decl>,
}

impl File {
    /// Struct declarations in source order.
    pub fn structs(&self) -> impl Iterator<Item = &Struct> {
        self.decls.iter().filter_map(Decl::as_struct)
    }
}

/* Files sharing one package name, in the order they were supplied */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub files: Vec<File>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), files: Vec::new() }
    }

    pub fn structs(&self) -> impl Iterator<Item = &Struct> {
        self.files.iter().flat_map(File::structs)
    }
}
