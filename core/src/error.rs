use thiserror::Error;

/// Errors surfaced while loading a ROM. No instruction runs after one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is {len} bytes but at most {max} bytes fit in memory")]
    TooLarge { len: usize, max: usize },
    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),
}

/// Faults raised by the CPU while stepping.
///
/// The instruction that raised a fault has no effect: the PC still points at it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Fault {
    #[error("CALL at {pc:#05X} exceeds the maximum nesting depth")]
    StackOverflow { pc: u16 },
    #[error("RET at {pc:#05X} with an empty stack")]
    StackUnderflow { pc: u16 },
    #[error("no program has been loaded")]
    NoProgram,
}
