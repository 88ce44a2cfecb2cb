#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A cached object file existed but could not be decoded, or a freshly
    /// compiled program could not be encoded for caching.
    CacheCodec(bincode::Error),
    /// The cache directory could not be read or written.
    CacheIo(std::io::Error),
    /// An emitted switch failed `dtjit_codegen::verify_switch`. Fatal:
    /// indicates a compiler bug, not a data problem.
    Verification(dtjit_codegen::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CacheCodec(e) => write!(f, "failed to decode cached object: {e}"),
            Self::CacheIo(e) => write!(f, "object cache I/O error: {e}"),
            Self::Verification(e) => write!(f, "emitted program failed verification: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CacheCodec(e) => Some(e),
            Self::CacheIo(e) => Some(e),
            Self::Verification(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::CacheIo(e)
    }
}

impl From<dtjit_codegen::Error> for Error {
    fn from(e: dtjit_codegen::Error) -> Self {
        Self::Verification(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
