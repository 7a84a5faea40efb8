use byteorder::{ByteOrder, LE};

use crate::error::RunError;

pub const WASM_MAGIC: [u8; 4] = *b"\0asm";
pub const WASM_VERSION: u32 = 1;
const HEADER_LEN: usize = 8;

/// Encoding of a module file as found on disk.
///
/// Binary modules are handed to the engine as-is. Text modules (`.wat`, what
/// the compiler writes before `wat2wasm`) are translated by the engine while
/// compiling, so both can be run directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    Binary { version: u32 },
    Text,
}

impl ModuleFormat {
    pub fn detect(bytes: &[u8]) -> Result<Self, RunError> {
        if bytes.starts_with(&WASM_MAGIC) {
            if bytes.len() < HEADER_LEN {
                return Err(RunError::Truncated(bytes.len()));
            }
            let version = LE::read_u32(&bytes[4..HEADER_LEN]);
            if version != WASM_VERSION {
                return Err(RunError::UnsupportedVersion(version));
            }
            return Ok(ModuleFormat::Binary { version });
        }

        match std::str::from_utf8(bytes) {
            Ok(text) if starts_with_sexpr(text) => Ok(ModuleFormat::Text),
            _ => Err(RunError::UnknownFormat),
        }
    }
}

// skips whitespace and `;;` line comments; block comments `(; ;)` already
// start with a paren
fn starts_with_sexpr(text: &str) -> bool {
    let mut rest = text.trim_start();
    while let Some(comment) = rest.strip_prefix(";;") {
        rest = match comment.find('\n') {
            Some(end) => comment[end + 1..].trim_start(),
            None => "",
        };
    }
    rest.starts_with('(')
}
