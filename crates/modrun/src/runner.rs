use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tracing::{debug, warn};
use wasmtime::{Config, Engine, Linker, Module, Store};

use crate::{
    abort::AbortSignal,
    error::RunError,
    format::ModuleFormat,
    host::{self, HostState},
};

pub const DEFAULT_ENTRY: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Export invoked after instantiation. Must have type `() -> i32`.
    pub entry: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            entry: DEFAULT_ENTRY.to_string(),
        }
    }
}

/// How a run ended, short of an error in the host itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Finished { result: i32 },
    Aborted(AbortSignal),
    MissingEntry { name: String },
}

impl RunOutcome {
    /// Writes the user-facing summary: the result line goes to `out`, the
    /// abort block and the missing entry message go to `err`.
    pub fn report<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> io::Result<()> {
        match self {
            RunOutcome::Finished { result } => {
                writeln!(out)?;
                writeln!(out, "program finished with exit code: {result}")
            }
            RunOutcome::Aborted(signal) => signal.write_block(err),
            RunOutcome::MissingEntry { name } => {
                writeln!(err, "entry point '{name}' was not found in the wasm module")
            }
        }
    }
}

/// Reads a module file fully into memory.
pub fn read_module(path: &Path) -> Result<Vec<u8>, RunError> {
    fs::read(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads modules against the fixed host import table and runs their entry
/// point. The engine and linker are shared across runs; every run gets its own
/// store, so nothing a module does is visible to the next run.
pub struct Runner<W> {
    engine: Engine,
    linker: Linker<HostState<W>>,
    options: RunOptions,
}

impl<W> Runner<W>
where
    W: Write + Send + 'static,
{
    pub fn new(options: RunOptions) -> Result<Self, RunError> {
        let mut config = Config::new();
        config.async_support(true);
        let engine = Engine::new(&config).map_err(RunError::Engine)?;

        let mut linker = Linker::new(&engine);
        host::define_imports(&mut linker).map_err(RunError::Engine)?;

        Ok(Self {
            engine,
            linker,
            options,
        })
    }

    pub async fn run_file(&self, path: &Path, out: W) -> Result<RunOutcome, RunError> {
        debug!(path = %path.display(), "reading module");
        let bytes = read_module(path)?;
        self.run_bytes(&bytes, out).await
    }

    pub async fn run_bytes(&self, bytes: &[u8], out: W) -> Result<RunOutcome, RunError> {
        let format = ModuleFormat::detect(bytes)?;
        debug!(?format, len = bytes.len(), "instantiating module");

        // text modules are translated to binary by the engine
        let module = Module::new(&self.engine, bytes).map_err(RunError::Instantiate)?;
        let mut store = Store::new(&self.engine, HostState::new(out));

        // a start function may already abort during instantiation
        let instance = match self.linker.instantiate_async(&mut store, &module).await {
            Ok(instance) => instance,
            Err(err) => return aborted_or(err, RunError::Instantiate),
        };

        let name = &self.options.entry;
        debug!(entry = %name, "resolving entry point");
        let Some(func) = instance.get_func(&mut store, name) else {
            warn!(entry = %name, "entry point not exported");
            return Ok(RunOutcome::MissingEntry { name: name.clone() });
        };
        let entry = func
            .typed::<(), i32>(&store)
            .map_err(|source| RunError::EntrySignature {
                name: name.clone(),
                source,
            })?;

        debug!(entry = %name, "invoking entry point");
        match entry.call_async(&mut store, ()).await {
            Ok(result) => {
                debug!(result, "entry point returned");
                Ok(RunOutcome::Finished { result })
            }
            Err(err) => aborted_or(err, RunError::Trap),
        }
    }
}

// an abort surfaces as a trap wrapping the signal; anything else is a real failure
fn aborted_or(
    err: anyhow::Error,
    wrap: fn(anyhow::Error) -> RunError,
) -> Result<RunOutcome, RunError> {
    match err.downcast_ref::<AbortSignal>() {
        Some(signal) => {
            debug!(code = signal.code, "module aborted");
            Ok(RunOutcome::Aborted(*signal))
        }
        None => Err(wrap(err)),
    }
}
