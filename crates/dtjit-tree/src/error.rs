#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The node array's length plus one was not a power of two, so it cannot
    /// describe a perfect binary tree.
    InvalidNodeCount(usize),
    /// A child index pointed outside of the node array or the leaf range
    /// directly below it.
    ChildOutOfRange { node_idx: u64, child_idx: u64 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNodeCount(n) => {
                write!(f, "node count {n} + 1 is not a power of two")
            }
            Self::ChildOutOfRange { node_idx, child_idx } => {
                write!(f, "node {node_idx} has out-of-range child index {child_idx}")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
