use crate::models::BlockId;

/// Why the store declined a command.
///
/// None of these are fatal: whenever one is returned the editor state is
/// exactly what it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("geometry falls outside the grid")]
    OutOfBounds,
    #[error("geometry overlaps block {with}")]
    Overlap { with: BlockId },
    #[error("geometry has a negative origin or an empty span")]
    InvalidGeometry,
    #[error("no block with id {0}")]
    UnknownBlock(BlockId),
    #[error("a block with id {0} already exists")]
    DuplicateBlock(BlockId),
    #[error("a gesture is already in progress")]
    GestureInProgress,
    #[error("no gesture is in progress")]
    NoActiveGesture,
    #[error("malformed drop payload: {0}")]
    MalformedPayload(String),
    #[error("drop payload does not describe a new block")]
    IgnoredDrop,
    #[error("unknown resize handle: {0}")]
    UnknownHandle(String),
}

impl EditError {
    /// True for rejections caused by the candidate geometry itself
    pub fn is_geometry_rejection(&self) -> bool {
        matches!(
            self,
            EditError::OutOfBounds | EditError::Overlap { .. } | EditError::InvalidGeometry
        )
    }
}
