pub mod codegen;
pub mod common;
pub mod inspect;
