use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Header or payload content that does not form a valid binary PGM.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid PGM format: missing P5 magic tag")]
    BadMagic,
    #[error("invalid PGM format: {field} is missing or not a decimal integer")]
    MalformedHeader { field: &'static str },
    #[error("invalid maxval {0} (should be less than 65536)")]
    MaxValueTooLarge(u32),
    #[error("invalid maxval 0")]
    ZeroMaxValue,
    #[error("image dimensions {width}x{height} contain no pixels")]
    EmptyImage { width: u32, height: u32 },
    #[error("image dimensions {width}x{height} do not fit in memory")]
    TooLarge { width: u32, height: u32 },
    #[error("failed to read pixel data: expected {expected} samples, got {read}")]
    TruncatedPixels { expected: usize, read: usize },
}

/// Failure of a decode or encode call.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to access {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErrorKind {
    /// The source or destination could not be opened, read or written.
    Io,
    /// The data is not a valid binary PGM.
    Format,
}

impl CodecError {
    pub fn kind(&self) -> CodecErrorKind {
        match self {
            CodecError::Io(_) | CodecError::File { .. } => CodecErrorKind::Io,
            CodecError::Format(_) => CodecErrorKind::Format,
        }
    }

    /// Attach `path` to a bare I/O error.
    pub(crate) fn at_path(self, path: &Path) -> Self {
        match self {
            CodecError::Io(source) => CodecError::File {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}
