use crate::layout::ResizeHandle;
use crate::models::{BlockId, BlockKind, BlockPatch, PixelDelta, PixelPoint, StylePatch};

/// Every intent the presentation layer can hand to [`Editor::apply`](super::Editor::apply)
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Create a block of `kind` with its top-left corner on `(row, column)`
    CreateBlock {
        kind: BlockKind,
        row: u32,
        column: u32,
    },
    /// A palette drop carrying a JSON drag descriptor
    Drop {
        payload: String,
        row: u32,
        column: u32,
    },
    /// One-shot move by a pointer delta
    MoveBlock { id: BlockId, delta: PixelDelta },
    /// One-shot resize by a pointer delta on a handle
    ResizeBlock {
        id: BlockId,
        handle: ResizeHandle,
        delta: PixelDelta,
    },
    BeginMove { id: BlockId, pointer: PixelPoint },
    BeginResize {
        id: BlockId,
        handle: ResizeHandle,
        pointer: PixelPoint,
    },
    /// Pointer sample for the active gesture
    PointerMove { pointer: PixelPoint },
    EndGesture,
    UpdateContent { id: BlockId, content: String },
    UpdateStyle { id: BlockId, style: StylePatch },
    UpdateBlock { id: BlockId, patch: BlockPatch },
    DeleteBlock { id: BlockId },
    Select { id: Option<BlockId> },
    AdjustColumns { delta: i32 },
    AdjustCellWidth { delta: i32 },
    SetPreviewVisible(bool),
    SetPropertiesVisible(bool),
}
