//! Puffs Declaration Model
//!
//! This crate contains the checked-declaration model consumed by the C
//! generator: the identifier table, declarations and the type decorator
//! chain, plus the YAML interchange schema and its loader.

pub mod ident;
pub mod load;
pub mod schema;
pub mod types;

// Re-export commonly used types at the crate root
pub use ident::*;
pub use load::{LoadError, LoadedFile, load_file, load_str};
pub use types::*;
