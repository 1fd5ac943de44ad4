use crate::codegen::OutputMode;
use crate::codegen::c_gen::types::CTypeNames;
use puffs_types::IdMap;
use std::fmt::Write;

/* User fields are prefixed so they never collide with `status` */
pub const FIELD_PREFIX: &str = "f_";
pub const STATUS_FIELD: &str = "status";

/* Everything an emitter needs to name and lower one package's structs */
pub struct EmitContext<'a> {
    pub prefix: &'a str,
    pub package: &'a str,
    pub ids: &'a IdMap,
    pub type_names: &'a CTypeNames,
}

impl<'a> EmitContext<'a> {
    /* `<prefix>_<package>_<struct>` */
    pub fn layout_name(&self, struct_name: &str) -> String {
        format!("{}_{}_{}", self.prefix, c_package(self.package), struct_name)
    }

    pub fn status_type(&self) -> String {
        format!("{}_{}_status", self.prefix, c_package(self.package))
    }
}

/* Dotted package paths ("std.gif") become one C identifier component */
pub fn c_package(package: &str) -> String {
    package.replace('.', "_")
}

pub fn include_guard(prefix: &str, package: &str) -> String {
    format!("{}_{}_H", prefix, c_package(package)).to_uppercase()
}

pub fn write_section(output: &mut String, title: &str) {
    write!(output, "// ---------------- {}\n\n", title).unwrap();
}

pub fn write_preamble(output: &mut String, prefix: &str, package: &str, mode: OutputMode) {
    let guard = include_guard(prefix, package);
    write!(output, "// Code generated by puffs-gen-{}. DO NOT EDIT.\n\n", mode.extension()).unwrap();
    write!(output, "#ifndef {}\n#define {}\n\n", guard, guard).unwrap();
    output.push_str("#include <stdbool.h>\n");
    output.push_str("#include <stddef.h>\n");
    output.push_str("#include <stdint.h>\n");
    if mode == OutputMode::Source {
        output.push_str("#include <string.h>\n");
    }
    output.push_str("\n#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");
}

pub fn write_epilogue(output: &mut String, prefix: &str, package: &str) {
    output.push_str("#ifdef __cplusplus\n}  // extern \"C\"\n#endif\n\n");
    write!(output, "#endif  // {}\n\n", include_guard(prefix, package)).unwrap();
}
