pub mod helpers;
pub mod lifecycle;
pub mod structs;
pub mod types;

// Re-export main public functions
pub use helpers::EmitContext;
pub use lifecycle::{LifecycleHooks, NoHooks, emit_bodies, emit_prototypes};
pub use structs::{emit_status_enum, emit_struct};
pub use types::{CTypeNames, format_field_declaration, lower_type};
