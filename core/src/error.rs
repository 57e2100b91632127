use std::io;

use thiserror::Error;

/// Failures surfaced by the interpreter.
///
/// Unrecognized opcodes are deliberately absent: they are skipped with a warning.
#[derive(Debug, Error)]
pub enum Chip8Error {
    /// The ROM doesn't fit between the program start and the end of memory.
    #[error("rom of {size} bytes exceeds the {capacity} bytes available for programs")]
    RomTooLarge { size: usize, capacity: usize },

    /// A call was made with all stack slots in use.
    #[error("stack overflow: call at {address:#05X} exceeds the maximum call depth")]
    StackOverflow { address: u16 },

    /// A return was made with no active subroutine.
    #[error("stack underflow: return at {address:#05X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("unable to read rom")]
    Io(#[from] io::Error),
}
