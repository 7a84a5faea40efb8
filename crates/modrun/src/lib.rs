pub mod abort;
pub mod error;
pub mod format;
pub mod host;
pub mod runner;

pub use abort::{abort_message, AbortSignal};
pub use error::RunError;
pub use format::ModuleFormat;
pub use host::HostState;
pub use runner::{read_module, RunOptions, RunOutcome, Runner, DEFAULT_ENTRY};
