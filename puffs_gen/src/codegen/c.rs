use crate::codegen::OutputMode;
use crate::codegen::c_gen::helpers::{write_epilogue, write_preamble, write_section};
use crate::codegen::c_gen::{
    CTypeNames, EmitContext, LifecycleHooks, NoHooks, emit_bodies, emit_prototypes, emit_status_enum,
    emit_struct,
};
use crate::config::DEFAULT_PREFIX;
use crate::error::GenResult;
use crate::format::Formatter;
use puffs_types::{File, IdMap, Struct};

static NO_HOOKS: NoHooks = NoHooks;

/// Progress of one generation run. Header runs end at `HeaderDone`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Stage {
    Init,
    StatusEnumWritten,
    StructsWritten,
    PrototypesWritten,
    HeaderDone,
    BodiesWritten,
    Done,
}

impl Stage {
    pub fn next(self, mode: OutputMode) -> Option<Stage> {
        match (self, mode) {
            (Stage::Init, _) => Some(Stage::StatusEnumWritten),
            (Stage::StatusEnumWritten, _) => Some(Stage::StructsWritten),
            (Stage::StructsWritten, _) => Some(Stage::PrototypesWritten),
            (Stage::PrototypesWritten, OutputMode::Header) => Some(Stage::HeaderDone),
            (Stage::PrototypesWritten, OutputMode::Source) => Some(Stage::BodiesWritten),
            (Stage::BodiesWritten, OutputMode::Source) => Some(Stage::Done),
            _ => None,
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, Stage::HeaderDone | Stage::Done)
    }
}

/* Accumulated text plus where the run is in the stage sequence */
struct Emission {
    output: String,
    stage: Stage,
    mode: OutputMode,
}

impl Emission {
    fn new(mode: OutputMode) -> Self {
        Self {
            output: String::new(),
            stage: Stage::Init,
            mode,
        }
    }

    fn advance(&mut self) {
        match self.stage.next(self.mode) {
            Some(next) => {
                tracing::trace!(from = ?self.stage, to = ?next, "stage");
                self.stage = next;
            }
            None => debug_assert!(false, "no stage after {:?} in {:?} mode", self.stage, self.mode),
        }
    }
}

pub struct CCodeGeneratorOptions {
    pub prefix: String,
    pub mode: OutputMode,
}

impl Default for CCodeGeneratorOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            mode: OutputMode::Header,
        }
    }
}

/// Lowers a package's struct declarations to C.
///
/// `generate` is a pure function of its inputs apart from the formatter: the
/// same package, identifier table and declaration order always produce the
/// same text.
pub struct CCodeGenerator<'a> {
    options: CCodeGeneratorOptions,
    type_names: CTypeNames,
    formatter: &'a dyn Formatter,
    hooks: &'a dyn LifecycleHooks,
}

impl<'a> CCodeGenerator<'a> {
    pub fn new(options: CCodeGeneratorOptions, formatter: &'a dyn Formatter) -> Self {
        Self {
            options,
            type_names: CTypeNames::default(),
            formatter,
            hooks: &NO_HOOKS,
        }
    }

    pub fn with_type_names(mut self, type_names: CTypeNames) -> Self {
        self.type_names = type_names;
        self
    }

    pub fn with_hooks(mut self, hooks: &'a dyn LifecycleHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.options.mode
    }

    /// Renders the package and hands the text to the formatter. Formatter
    /// output and failures are returned as-is.
    pub fn generate(&self, package: &str, ids: &IdMap, files: &[File]) -> GenResult<String> {
        let raw = self.render(package, ids, files)?;
        Ok(self.formatter.format(&raw)?)
    }

    /// Renders the unformatted text. The first unconvertible field aborts the
    /// run with nothing emitted.
    pub fn render(&self, package: &str, ids: &IdMap, files: &[File]) -> GenResult<String> {
        let prefix = self.options.prefix.as_str();
        let mode = self.options.mode;
        let cx = EmitContext {
            prefix,
            package,
            ids,
            type_names: &self.type_names,
        };
        let structs: Vec<&Struct> = files.iter().flat_map(File::structs).collect();
        tracing::debug!(package, ?mode, structs = structs.len(), "rendering package");

        let mut emission = Emission::new(mode);
        write_preamble(&mut emission.output, prefix, package, mode);

        write_section(&mut emission.output, "Status Codes");
        emit_status_enum(&mut emission.output, &cx);
        emission.advance();

        write_section(&mut emission.output, "Structs");
        for structure in &structs {
            emit_struct(&mut emission.output, &cx, structure)?;
        }
        emission.advance();

        write_section(&mut emission.output, "Constructor and Destructor Prototypes");
        for structure in &structs {
            emit_prototypes(&mut emission.output, &cx, structure);
        }
        emission.advance();

        /* The header part ends here; a .c file continues with the bodies */
        write_epilogue(&mut emission.output, prefix, package);
        if mode == OutputMode::Header {
            emission.advance();
            return Ok(emission.output);
        }

        write_section(&mut emission.output, "Constructor and Destructor Implementations");
        for structure in &structs {
            emit_bodies(&mut emission.output, &cx, structure, self.hooks);
        }
        emission.advance();
        emission.advance();
        debug_assert!(emission.stage.is_final());
        Ok(emission.output)
    }
}
