use std::io::{self, Write};

use thiserror::Error;

pub const DIVISION_BY_ZERO: i32 = 1;
pub const ADDITION_OVERFLOW: i32 = 2;
pub const SELF_RECURSION: i32 = 3;

/// Maps an abort code raised by a compiled module to the message shown to the
/// user. Codes are assigned by the compiler's runtime checks.
pub fn abort_message(code: i32) -> &'static str {
    match code {
        DIVISION_BY_ZERO => "Runtime error: division by zero.",
        ADDITION_OVERFLOW => "Runtime error: integer overflow in addition.",
        SELF_RECURSION => {
            "Runtime error: recursion detected. A function cannot invoke itself."
        }
        _ => "Unknown error in wasm module.",
    }
}

/// Raised by the `env.abort` import. It travels out of the module as a trap,
/// so execution of the module never resumes after an abort.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("wasm module aborted with code {code}")]
pub struct AbortSignal {
    pub code: i32,
}

impl AbortSignal {
    pub fn new(code: i32) -> Self {
        Self { code }
    }

    pub fn message(&self) -> &'static str {
        abort_message(self.code)
    }

    pub fn exit_status(&self) -> i32 {
        self.code
    }

    pub fn write_block<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "--- ABORT ---")?;
        writeln!(w, "{}", self.message())?;
        writeln!(w, "-------------")
    }
}
