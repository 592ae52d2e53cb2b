use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the interpreter.
///
/// Unrecognized opcodes are not errors; they execute as no-ops.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to load ROM from {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read ROM: {0}")]
    Read(#[from] io::Error),

    #[error("stack overflow: call at {pc:#06X} exceeds a depth of {depth}")]
    StackOverflow { pc: u16, depth: usize },

    #[error("stack underflow: return at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },
}
