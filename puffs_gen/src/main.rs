use clap::{Parser, Subcommand};
use puffs_gen::cmds;
use puffs_gen::config::Emit;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "puffs-gen")]
#[command(about = "Lower checked Puffs declarations to C headers and sources", long_about = None)]
struct Cli {
    /* Log generation stages (overridden by RUST_LOG) */
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate C code from declaration files */
    Codegen {
        /* Input YAML files containing checked declarations */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Output directory for generated code */
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DIR",
            default_value = "generated"
        )]
        output_dir: PathBuf,

        /* Which translation units to write */
        #[arg(short = 'm', long = "mode", value_enum)]
        emit: Option<Emit>,

        /* Prefix of every generated C name */
        #[arg(long = "prefix")]
        prefix: Option<String>,

        /* Write unformatted output instead of running the formatter */
        #[arg(long = "no-format")]
        no_format: bool,

        /* Formatter program (default clang-format) */
        #[arg(long = "formatter", value_name = "PROGRAM")]
        formatter: Option<String>,

        /* Formatter style, passed as -style=<STYLE> */
        #[arg(long = "style")]
        style: Option<String>,

        /* YAML config file (default ./puffs-gen.yaml if present) */
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /* Show how each struct field lowers to C */
    Inspect {
        /* Input YAML files containing checked declarations */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Prefix of every generated C name */
        #[arg(long = "prefix")]
        prefix: Option<String>,

        /* YAML config file (default ./puffs-gen.yaml if present) */
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /* Print the report as JSON */
        #[arg(long = "json")]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Codegen {
            files,
            output_dir,
            emit,
            prefix,
            no_format,
            formatter,
            style,
            config,
        } => {
            let written = cmds::codegen::run(cmds::codegen::CodegenArgs {
                files,
                output_dir,
                config,
                emit,
                prefix,
                no_format,
                formatter,
                style,
            })?;
            for path in &written {
                println!("[✓] Generated {}", path.display());
            }
        }

        Commands::Inspect {
            files,
            prefix,
            config,
            json,
        } => {
            println!("{}", cmds::inspect::run(files, config.as_deref(), prefix, json)?);
        }
    }

    Ok(())
}
