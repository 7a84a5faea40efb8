use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to read wasm module `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("wasm module is empty or is neither binary wasm nor wasm text")]
    UnknownFormat,
    #[error("binary wasm module is truncated ({0} bytes, header needs 8)")]
    Truncated(usize),
    #[error("unsupported binary wasm version {0} (only version 1 is understood)")]
    UnsupportedVersion(u32),
    #[error("failed to set up the wasm engine")]
    Engine(#[source] anyhow::Error),
    #[error("failed to instantiate the wasm module")]
    Instantiate(#[source] anyhow::Error),
    #[error("entry point `{name}` must take no parameters and return a single i32")]
    EntrySignature {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("wasm module trapped")]
    Trap(#[source] anyhow::Error),
}
