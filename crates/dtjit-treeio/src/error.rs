#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The tree file could not be read from disk.
    Io(std::io::Error),
    /// The tree file's contents did not decode into a valid node array.
    Decode(serde_json::Error),
    /// The decoded node array failed [`dtjit_tree::DecisionTree::new`]'s
    /// structural checks.
    InvalidTree(dtjit_tree::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tree file: {e}"),
            Self::Decode(e) => write!(f, "failed to parse tree file: {e}"),
            Self::InvalidTree(e) => write!(f, "tree file describes an invalid tree: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::InvalidTree(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e)
    }
}

impl From<dtjit_tree::Error> for Error {
    fn from(e: dtjit_tree::Error) -> Self {
        Self::InvalidTree(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
