/* C Code Generation Tests
 *
 * These tests drive the generator end to end from YAML declaration files:
 * plain and suspendible structs, arrays, unsupported types, both output
 * modes, and the codegen command writing files to disk.
 */

use puffs_gen::cmds::codegen::{CodegenArgs, run};
use puffs_gen::config::Emit;
use puffs_gen::{CCodeGenerator, CCodeGeneratorOptions, GenError, OutputMode, Passthrough};
use puffs_types::{File, IdMap, load_str};
use std::fs;
use std::process::Command;

/* Helper to load one YAML document into (package, files) */
fn load(yaml: &str, ids: &mut IdMap) -> (String, Vec<File>) {
    let loaded = load_str(yaml, "test.yaml", ids).expect("Failed to load declarations");
    (loaded.package, vec![loaded.file])
}

fn generate(yaml: &str, mode: OutputMode) -> Result<String, GenError> {
    let mut ids = IdMap::new();
    let (package, files) = load(yaml, &mut ids);
    let generator = CCodeGenerator::new(
        CCodeGeneratorOptions {
            mode,
            ..Default::default()
        },
        &Passthrough,
    );
    generator.generate(&package, &ids, &files)
}

/* Text between `typedef struct {` and the closing `} <layout>;` */
fn struct_body<'a>(c_code: &'a str, layout: &str) -> Vec<&'a str> {
    let end = c_code
        .find(&format!("}} {};", layout))
        .unwrap_or_else(|| panic!("struct {} not found", layout));
    let start = c_code[..end].rfind("typedef struct {").expect("struct opener") + "typedef struct {".len();
    c_code[start..end].lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/* Syntax-check with gcc when it is installed; skipped otherwise */
fn check_c_syntax(c_code: &str, test_name: &str) -> Result<(), String> {
    if Command::new("gcc").arg("--version").output().is_err() {
        eprintln!("gcc not available, skipping C syntax check for {}", test_name);
        return Ok(());
    }
    let temp_dir = tempfile::tempdir().map_err(|e| format!("Failed to create temp dir: {}", e))?;
    let c_file = temp_dir.path().join(format!("{}.c", test_name));
    fs::write(&c_file, c_code).map_err(|e| format!("Failed to write C file: {}", e))?;

    let output = Command::new("gcc")
        .arg("-fsyntax-only")
        .arg("-std=c11")
        .arg("-Wall")
        .arg("-Werror")
        .arg(&c_file)
        .output()
        .map_err(|e| format!("Failed to run gcc: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("GCC compilation failed:\n{}", stderr));
    }
    Ok(())
}

const POINT: &str = r#"
package: xyz
decls:
  - struct:
      name: point
      fields:
        - name: x
          type:
            primitive: u32
        - name: y
          type:
            primitive: u32
"#;

const DECODER: &str = r#"
package: xyz
decls:
  - struct:
      name: decoder
      suspendible: true
"#;

const ALL_PRIMITIVES: &str = r#"
package: prims
decls:
  - struct:
      name: all
      suspendible: true
      fields:
        - { name: a, type: { primitive: i8 } }
        - { name: b, type: { primitive: i16 } }
        - { name: c, type: { primitive: i32 } }
        - { name: d, type: { primitive: i64 } }
        - { name: e, type: { primitive: u8 } }
        - { name: f, type: { primitive: u16 } }
        - { name: g, type: { primitive: u32 } }
        - { name: h, type: { primitive: u64 } }
        - { name: i, type: { primitive: usize } }
        - { name: j, type: { primitive: bool } }
        - name: k
          type:
            array:
              length: 2
              element:
                array:
                  length: 3
                  element:
                    primitive: u8
"#;

#[test]
fn test_c_plain_struct() {
    let c_code = generate(POINT, OutputMode::Header).expect("generation failed");

    assert_eq!(
        struct_body(&c_code, "puffs_xyz_point"),
        vec!["uint32_t f_x;", "uint32_t f_y;"]
    );
    assert!(!c_code.contains("puffs_xyz_point_constructor"));
    assert!(!c_code.contains("puffs_xyz_point_destructor"));
}

#[test]
fn test_c_suspendible_struct_without_fields() {
    let header = generate(DECODER, OutputMode::Header).expect("generation failed");
    assert_eq!(
        struct_body(&header, "puffs_xyz_decoder"),
        vec!["puffs_xyz_status status;"]
    );
    assert!(header.contains("void puffs_xyz_decoder_constructor(puffs_xyz_decoder *self);"));
    assert!(header.contains("void puffs_xyz_decoder_destructor(puffs_xyz_decoder *self);"));
    assert!(!header.contains("memset"));

    let source = generate(DECODER, OutputMode::Source).expect("generation failed");
    assert!(source.starts_with("// Code generated by puffs-gen-c. DO NOT EDIT.\n"));
    assert!(source.contains(
        "void puffs_xyz_decoder_constructor(puffs_xyz_decoder *self) {\n  memset(self, 0, sizeof(*self));\n}"
    ));
    assert!(source.contains("void puffs_xyz_decoder_destructor(puffs_xyz_decoder *self) {\n}"));
}

#[test]
fn test_c_status_field_comes_first() {
    let yaml = r#"
package: xyz
decls:
  - struct:
      name: reader
      suspendible: true
      fields:
        - { name: z, type: { primitive: u64 } }
        - { name: a, type: { primitive: bool } }
"#;
    let c_code = generate(yaml, OutputMode::Header).expect("generation failed");
    assert_eq!(
        struct_body(&c_code, "puffs_xyz_reader"),
        vec!["puffs_xyz_status status;", "uint64_t f_z;", "bool f_a;"]
    );
}

#[test]
fn test_c_array_fields() {
    let yaml = r#"
package: xyz
decls:
  - struct:
      name: s
      fields:
        - name: name
          type:
            array:
              length: 4
              element:
                primitive: i8
"#;
    let c_code = generate(yaml, OutputMode::Header).expect("generation failed");
    assert_eq!(struct_body(&c_code, "puffs_xyz_s"), vec!["int8_t f_name[4];"]);

    let nested = generate(ALL_PRIMITIVES, OutputMode::Header).expect("generation failed");
    assert!(nested.contains("uint8_t f_k[2][3];"));
}

#[test]
fn test_c_status_enum_once_per_package() {
    let c_code = generate(ALL_PRIMITIVES, OutputMode::Source).expect("generation failed");
    assert_eq!(c_code.matches("typedef enum {").count(), 1);
    assert!(c_code.contains("puffs_prims_status_ok = 0,"));
    assert!(c_code.contains("puffs_prims_status_short_output = -1,"));
    assert!(c_code.contains("puffs_prims_status_short_input = -2,"));

    let plain = generate(POINT, OutputMode::Header).expect("generation failed");
    assert!(plain.contains("} puffs_xyz_status;"));
}

#[test]
fn test_c_unsupported_type_aborts_run() {
    let yaml = r#"
package: xyz
decls:
  - struct:
      name: first
      fields:
        - { name: a, type: { primitive: u8 } }
  - struct:
      name: decoder
      suspendible: true
      fields:
        - name: src
          type:
            qualified:
              package: base
              name: io_reader
  - struct:
      name: later
      fields:
        - { name: b, type: { primitive: u8 } }
"#;
    match generate(yaml, OutputMode::Source) {
        Err(GenError::UnconvertibleType { structure, field, type_text }) => {
            assert_eq!(structure, "decoder");
            assert_eq!(field, "src");
            assert_eq!(type_text, "base.io_reader");
        }
        other => panic!("expected UnconvertibleType, got {:?}", other),
    }
}

#[test]
fn test_c_generation_is_deterministic() {
    let first = generate(ALL_PRIMITIVES, OutputMode::Source).expect("generation failed");
    let second = generate(ALL_PRIMITIVES, OutputMode::Source).expect("generation failed");
    assert_eq!(first, second);
}

#[test]
fn test_c_output_compiles() {
    let header = generate(ALL_PRIMITIVES, OutputMode::Header).expect("generation failed");
    check_c_syntax(&header, "all_primitives_header").expect("header should compile");

    let source = generate(ALL_PRIMITIVES, OutputMode::Source).expect("generation failed");
    check_c_syntax(&source, "all_primitives_source").expect("source should compile");
}

#[test]
fn test_codegen_command_writes_units_per_package() {
    let dir = tempfile::tempdir().unwrap();
    let point = dir.path().join("point.yaml");
    let decoder = dir.path().join("decoder.yaml");
    let prims = dir.path().join("prims.yaml");
    fs::write(&point, POINT).unwrap();
    fs::write(&decoder, DECODER).unwrap();
    fs::write(&prims, ALL_PRIMITIVES).unwrap();
    let output_dir = dir.path().join("out");

    let written = run(CodegenArgs {
        files: vec![point, decoder, prims],
        output_dir: output_dir.clone(),
        emit: Some(Emit::Both),
        no_format: true,
        ..Default::default()
    })
    .expect("codegen failed");

    assert_eq!(
        written,
        vec![
            output_dir.join("xyz.h"),
            output_dir.join("xyz.c"),
            output_dir.join("prims.h"),
            output_dir.join("prims.c"),
        ]
    );

    let header = fs::read_to_string(output_dir.join("xyz.h")).unwrap();
    assert!(header.contains("} puffs_xyz_point;"));
    assert!(header.contains("} puffs_xyz_decoder;"));
    assert!(header.find("} puffs_xyz_point;") < header.find("} puffs_xyz_decoder;"));
}

#[test]
fn test_codegen_command_writes_nothing_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.yaml");
    let bad = dir.path().join("bad.yaml");
    fs::write(&good, POINT).unwrap();
    fs::write(
        &bad,
        "package: other\ndecls:\n  - struct:\n      name: s\n      fields:\n        - { name: p, type: { decorated: { decorator: ptr, inner: { primitive: u8 } } } }\n",
    )
    .unwrap();
    let output_dir = dir.path().join("out");

    let err = run(CodegenArgs {
        files: vec![good, bad],
        output_dir: output_dir.clone(),
        no_format: true,
        ..Default::default()
    })
    .unwrap_err();

    assert!(format!("{:#}", err).contains("cannot convert Puffs type \"ptr u8\" to C"));
    assert!(!output_dir.exists());
}

#[cfg(unix)]
#[test]
fn test_codegen_command_with_other_formatter() {
    let dir = tempfile::tempdir().unwrap();
    let point = dir.path().join("point.yaml");
    fs::write(&point, POINT).unwrap();
    let output_dir = dir.path().join("out");

    run(CodegenArgs {
        files: vec![point],
        output_dir: output_dir.clone(),
        emit: Some(Emit::Header),
        formatter: Some("cat".to_string()),
        ..Default::default()
    })
    .expect("codegen through cat failed");

    let header = fs::read_to_string(output_dir.join("xyz.h")).unwrap();
    assert_eq!(header, generate(POINT, OutputMode::Header).unwrap());
}

#[test]
fn test_codegen_command_write_failure_leaves_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let point = dir.path().join("point.yaml");
    fs::write(&point, POINT).unwrap();
    let output_dir = dir.path().join("out");
    /* A directory where the .c staging file should go makes that write fail */
    fs::create_dir_all(output_dir.join("xyz.c.tmp")).unwrap();

    let err = run(CodegenArgs {
        files: vec![point],
        output_dir: output_dir.clone(),
        emit: Some(Emit::Both),
        no_format: true,
        ..Default::default()
    })
    .unwrap_err();

    assert!(format!("{:#}", err).contains("xyz.c.tmp"));
    assert!(!output_dir.join("xyz.h").exists());
    assert!(!output_dir.join("xyz.h.tmp").exists());
    assert!(!output_dir.join("xyz.c").exists());
}
