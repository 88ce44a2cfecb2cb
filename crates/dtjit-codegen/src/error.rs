#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A switch's cases did not partition its condition-vector universe
    /// exactly once: either a variant was claimed by more than one exit, or
    /// some variant was never claimed by any exit.
    SwitchNotPartitioned { root_idx: u64, variant: u32 },
    /// A switch's node count did not match `2^levels - 1`.
    NodeCountMismatch { root_idx: u64, levels: u8, node_count: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SwitchNotPartitioned { root_idx, variant } => write!(
                f,
                "switch at node {root_idx} does not partition its condition vector universe at variant {variant}"
            ),
            Self::NodeCountMismatch { root_idx, levels, node_count } => write!(
                f,
                "switch at node {root_idx} has {node_count} nodes, expected 2^{levels} - 1"
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
