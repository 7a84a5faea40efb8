use std::{fmt::Display, io::Write};

use wasmtime::{Caller, Linker};

use crate::abort::AbortSignal;

pub const IMPORT_MODULE: &str = "env";
pub const ABORT: &str = "abort";
pub const LOG_I32: &str = "console_log_i32";
pub const LOG_F64: &str = "console_log_f64";

// names used by older compiler output for the same two handlers
const LEGACY_LOG_I32: &str = "print_u";
const LEGACY_LOG_F64: &str = "print_d";

/// Per-run store data. Owns the sink that the logging imports write to.
pub struct HostState<W> {
    out: W,
}

impl<W: Write> HostState<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    // write failures on the output stream are not reported back to the module
    fn print_line(&mut self, value: impl Display) {
        _ = writeln!(self.out, "{value}");
    }
}

/// Registers the host import table on `linker`.
///
/// `abort` never returns to the module: it raises an [`AbortSignal`] trap that
/// the runner recovers once execution has unwound. The two logging handlers
/// print a single value per line.
pub fn define_imports<W>(linker: &mut Linker<HostState<W>>) -> anyhow::Result<()>
where
    W: Write + Send + 'static,
{
    linker.func_wrap(IMPORT_MODULE, ABORT, |code: i32| -> anyhow::Result<()> {
        tracing::debug!(code, "module called abort");
        Err(AbortSignal::new(code).into())
    })?;
    linker.func_wrap(
        IMPORT_MODULE,
        LOG_I32,
        |mut caller: Caller<'_, HostState<W>>, value: i32| {
            caller.data_mut().print_line(value);
        },
    )?;
    linker.func_wrap(
        IMPORT_MODULE,
        LOG_F64,
        |mut caller: Caller<'_, HostState<W>>, value: f64| {
            caller.data_mut().print_line(value);
        },
    )?;

    linker.alias(IMPORT_MODULE, LOG_I32, IMPORT_MODULE, LEGACY_LOG_I32)?;
    linker.alias(IMPORT_MODULE, LOG_F64, IMPORT_MODULE, LEGACY_LOG_F64)?;

    Ok(())
}
