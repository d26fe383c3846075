use crate::models::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Blocks whose data changed
    pub changed: Vec<BlockId>,
    /// Selection after the command
    pub selection: Option<BlockId>,
    pub version: u64,
}

