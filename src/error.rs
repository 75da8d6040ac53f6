//! Error types for the codec and the batch layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the compression core.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Input that the requested operation cannot handle.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A codebook that is not a valid prefix-free mapping.
    #[error("corrupt codebook: {0}")]
    CorruptCodebook(String),

    /// The bitstream ended in the middle of a code.
    #[error("truncated stream: {pending} unmatched bit(s) left at end of stream")]
    TruncatedStream {
        /// Bits accumulated without reaching a complete code
        pending: usize,
    },

    /// No code in the codebook matches the bits starting at `offset`.
    #[error("no code matches the bits starting at offset {offset}")]
    InvalidCode {
        /// Bit offset where the unmatched candidate starts
        offset: usize,
    },

    #[error("decoded {actual} byte(s), codebook records {expected}")]
    LengthMismatch { expected: u64, actual: u64 },

    #[error("failed to serialize codebook: {0}")]
    Serialize(#[from] rmp_serde::encode::Error),

    #[error("failed to deserialize codebook: {0}")]
    Deserialize(#[from] rmp_serde::decode::Error),
}

pub type Result<T, E = HuffmanError> = std::result::Result<T, E>;

/// Failure while encoding or decoding a single unit on disk.
#[derive(Error, Debug)]
pub enum UnitError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: HuffmanError,
    },

    /// Another input file already maps to the same unit name.
    #[error("{}: unit name {unit:?} already taken by {}", path.display(), kept.display())]
    NameCollision {
        path: PathBuf,
        unit: String,
        kept: PathBuf,
    },
}

impl UnitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        UnitError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn codec(path: impl Into<PathBuf>, source: HuffmanError) -> Self {
        UnitError::Codec {
            path: path.into(),
            source,
        }
    }
}

/// Failure that aborts a whole batch before any unit is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("cannot read input directory {}: {source}", path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
