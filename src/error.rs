use std::{fmt, io, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The input file could not be opened, stat'ed or mapped.
    InputUnavailable { path: PathBuf, source: io::Error },

    /// A local table ran out of free slots for a new key.
    CapacityExhausted { slots: usize },

    /// A line does not match `<key>;[-]D{1,2}.D`.
    MalformedRecord { offset: usize, reason: &'static str },

    InvalidConfig(&'static str),

    WorkerPanicked,

    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputUnavailable { path, source } => {
                write!(f, "cannot read input {}: {}", path.display(), source)
            }
            Error::CapacityExhausted { slots } => {
                write!(f, "aggregation table is full ({} slots)", slots)
            }
            Error::MalformedRecord { offset, reason } => {
                write!(f, "malformed record at byte {}: {}", offset, reason)
            }
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Error::WorkerPanicked => write!(f, "worker thread panicked"),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InputUnavailable { source, .. } => Some(source),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}
