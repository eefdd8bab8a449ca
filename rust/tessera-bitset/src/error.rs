use tessera_word_alloc::AllocError;
use thiserror::Error;

/// Error raised by the fallible bitset operations.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub(crate) fn index_out_of_range(index: usize, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { index, len }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Checked access past the logical length.
    #[error("bit index {index} out of range for bitset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The storage layer could not provide the requested words. The bitset
    /// that raised this is still in its previous valid state.
    #[error("failed to allocate {words} words of bit storage")]
    OutOfMemory { words: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<AllocError> for Error {
    fn from(err: AllocError) -> Self {
        Error(ErrorKind::OutOfMemory { words: err.words() }.into())
    }
}
