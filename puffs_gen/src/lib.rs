//! Puffs C Generator
//!
//! Lowers checked Puffs declarations to C: one `typedef struct` per struct
//! declaration, a package-scoped status enum, and constructor/destructor
//! scaffolding for suspendible structs.

pub mod cmds;
pub mod codegen;
pub mod config;
pub mod error;
pub mod format;

pub use codegen::OutputMode;
pub use codegen::c::{CCodeGenerator, CCodeGeneratorOptions, Stage};
pub use error::{FormatError, GenError, GenResult};
pub use format::{CommandFormatter, Formatter, Passthrough};
