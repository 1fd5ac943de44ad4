/* Inspect command - show how each struct field lowers to C, without writing files */

use super::common::load_packages;
use crate::codegen::c_gen::{CTypeNames, EmitContext, format_field_declaration};
use crate::codegen::c_gen::helpers::{STATUS_FIELD, c_package};
use crate::config::{GenConfig, Overrides};
use puffs_types::{IdMap, Package};
use serde_derive::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FieldReport {
    pub name: String,
    pub source_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_declaration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StructReport {
    pub name: String,
    pub layout: String,
    pub suspendible: bool,
    pub fields: Vec<FieldReport>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PackageReport {
    pub package: String,
    pub structs: Vec<StructReport>,
}

/* Unlike codegen, every field is reported, including the ones that fail */
pub fn inspect_package(prefix: &str, package: &Package, ids: &IdMap, type_names: &CTypeNames) -> PackageReport {
    let cx = EmitContext {
        prefix,
        package: &package.name,
        ids,
        type_names,
    };
    let structs = package
        .structs()
        .map(|structure| {
            let struct_name = ids.name(structure.name);
            let fields = structure
                .fields
                .iter()
                .map(|field| {
                    let lowered = format_field_declaration(type_names, ids, &struct_name, field);
                    FieldReport {
                        name: ids.name(field.name),
                        source_type: field.ty.source_text(ids),
                        c_declaration: lowered.as_ref().ok().cloned(),
                        error: lowered.err().map(|e| e.to_string()),
                    }
                })
                .collect();
            StructReport {
                layout: cx.layout_name(&struct_name),
                name: struct_name,
                suspendible: structure.suspendible,
                fields,
            }
        })
        .collect();

    PackageReport {
        package: package.name.clone(),
        structs,
    }
}

fn render_text(report: &PackageReport, prefix: &str) -> String {
    let status_type = format!("{}_{}_status", prefix, c_package(&report.package));
    let mut output = format!("package {}\n", report.package);
    for structure in &report.structs {
        let marker = if structure.suspendible { " (suspendible)" } else { "" };
        writeln!(output, "  struct {} -> {}{}", structure.name, structure.layout, marker).unwrap();
        if structure.suspendible {
            writeln!(output, "    {} {};", status_type, STATUS_FIELD).unwrap();
        }
        for field in &structure.fields {
            match (&field.c_declaration, &field.error) {
                (Some(declaration), _) => writeln!(output, "    {};", declaration).unwrap(),
                (None, Some(error)) => writeln!(output, "    [✗] {}: {}", field.name, error).unwrap(),
                (None, None) => {}
            }
        }
    }
    output
}

/* Execute the inspect command. The prefix resolves the same way as for
 * codegen: `--prefix`, else the config file, else the default. */
pub fn run(files: Vec<PathBuf>, config: Option<&Path>, prefix: Option<String>, json: bool) -> anyhow::Result<String> {
    let config = GenConfig::resolve(
        config,
        &Overrides {
            prefix,
            ..Default::default()
        },
    )?;
    let prefix = config.prefix.as_str();
    let mut ids = IdMap::new();
    let packages = load_packages(&files, &mut ids)?;
    let type_names = CTypeNames::default();

    let reports: Vec<PackageReport> = packages
        .iter()
        .map(|package| inspect_package(prefix, package, &ids, &type_names))
        .collect();

    if json {
        Ok(serde_json::to_string_pretty(&reports)?)
    } else {
        Ok(reports.iter().map(|report| render_text(report, prefix)).collect::<Vec<_>>().join("\n"))
    }
}
