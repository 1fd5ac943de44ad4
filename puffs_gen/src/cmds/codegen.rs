/* Codegen command - generate C headers and sources from declaration files */

use super::common::load_packages;
use crate::codegen::OutputMode;
use crate::codegen::c::{CCodeGenerator, CCodeGeneratorOptions};
use crate::config::{Emit, GenConfig, Overrides};
use anyhow::Context;
use puffs_types::IdMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct CodegenArgs {
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub emit: Option<Emit>,
    pub prefix: Option<String>,
    pub no_format: bool,
    pub formatter: Option<String>,
    pub style: Option<String>,
}

impl CodegenArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            emit: self.emit,
            prefix: self.prefix.clone(),
            formatter: self.formatter.clone(),
            style: self.style.clone(),
            no_format: self.no_format,
        }
    }
}

/* Command-line flags win over the config file */
pub fn resolve_config(args: &CodegenArgs) -> anyhow::Result<GenConfig> {
    Ok(GenConfig::resolve(args.config.as_deref(), &args.overrides())?)
}

/* `<path>.tmp` in the same directory as the final file */
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        let _ = std::fs::remove_file(tmp);
    }
}

fn modes(emit: Emit) -> &'static [OutputMode] {
    match emit {
        Emit::Header => &[OutputMode::Header],
        Emit::Source => &[OutputMode::Source],
        Emit::Both => &[OutputMode::Header, OutputMode::Source],
    }
}

/* Execute the codegen command. Every unit is generated, then written to a
 * `.tmp` sibling, and only renamed into place once all writes succeeded. A
 * generation or write failure leaves no generated file behind. */
pub fn run(args: CodegenArgs) -> anyhow::Result<Vec<PathBuf>> {
    let config = resolve_config(&args)?;
    tracing::info!(
        files = args.files.len(),
        output = %args.output_dir.display(),
        emit = ?config.emit,
        prefix = %config.prefix,
        formatter = config.formatter.enabled,
        "starting code generation"
    );

    let mut ids = IdMap::new();
    let packages = load_packages(&args.files, &mut ids)?;
    let formatter = config.formatter.build();

    let mut units = Vec::new();
    for package in &packages {
        for &mode in modes(config.emit) {
            let generator = CCodeGenerator::new(
                CCodeGeneratorOptions {
                    prefix: config.prefix.clone(),
                    mode,
                },
                formatter.as_ref(),
            );
            let text = generator
                .generate(&package.name, &ids, &package.files)
                .with_context(|| format!("generating package '{}'", package.name))?;
            let path = args
                .output_dir
                .join(format!("{}.{}", package.name, mode.extension()));
            units.push((path, text));
        }
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(units.len());
    for (path, text) in units {
        let tmp = staging_path(&path);
        if let Err(source) = std::fs::write(&tmp, text) {
            discard(&staged);
            let _ = std::fs::remove_file(&tmp);
            return Err(anyhow::Error::new(source).context(format!("writing {}", tmp.display())));
        }
        staged.push((tmp, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (tmp, path) in &staged {
        std::fs::rename(tmp, path).with_context(|| format!("moving {} into place", tmp.display()))?;
        tracing::info!(path = %path.display(), "wrote generated file");
        written.push(path.clone());
    }

    Ok(written)
}
