use super::helpers::EmitContext;
use puffs_types::Struct;
use std::fmt::Write;

/// Extension points of the constructor/destructor bodies.
///
/// The generated constructor zero-fills the whole struct and then calls
/// `write_field_defaults`; the destructor body is exactly what
/// `write_teardown` writes. Neither step is defined yet, so the default
/// implementations write nothing.
pub trait LifecycleHooks {
    fn write_field_defaults(&self, _output: &mut String, _cx: &EmitContext, _structure: &Struct) {}

    fn write_teardown(&self, _output: &mut String, _cx: &EmitContext, _structure: &Struct) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl LifecycleHooks for NoHooks {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Constructor,
    Destructor,
}

impl Lifecycle {
    pub const ALL: [Lifecycle; 2] = [Lifecycle::Constructor, Lifecycle::Destructor];

    pub fn suffix(self) -> &'static str {
        match self {
            Lifecycle::Constructor => "constructor",
            Lifecycle::Destructor => "destructor",
        }
    }
}

fn signature(cx: &EmitContext, structure: &Struct, lifecycle: Lifecycle) -> String {
    let layout = cx.layout_name(&cx.ids.name(structure.name));
    format!("void {}_{}({} *self)", layout, lifecycle.suffix(), layout)
}

pub fn emit_prototypes(output: &mut String, cx: &EmitContext, structure: &Struct) {
    if !structure.suspendible {
        return;
    }
    for lifecycle in Lifecycle::ALL {
        write!(output, "{};\n\n", signature(cx, structure, lifecycle)).unwrap();
    }
}

pub fn emit_bodies(output: &mut String, cx: &EmitContext, structure: &Struct, hooks: &dyn LifecycleHooks) {
    if !structure.suspendible {
        return;
    }
    for lifecycle in Lifecycle::ALL {
        writeln!(output, "{} {{", signature(cx, structure, lifecycle)).unwrap();
        match lifecycle {
            Lifecycle::Constructor => {
                output.push_str("  memset(self, 0, sizeof(*self));\n");
                hooks.write_field_defaults(output, cx, structure);
            }
            Lifecycle::Destructor => hooks.write_teardown(output, cx, structure),
        }
        output.push_str("}\n\n");
    }
}
