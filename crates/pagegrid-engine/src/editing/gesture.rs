use crate::layout::{ResizeHandle, move_candidate, resize_candidate};
use crate::models::{BlockId, Geometry, GridConfig, PixelPoint, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize(ResizeHandle),
}

/// A pointer-down that has not seen its pointer-up yet.
///
/// Only the reference point is kept: every sample is computed from
/// `origin_pointer` and `origin_geometry`, never from the previous sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub block: BlockId,
    pub kind: GestureKind,
    pub origin_pointer: PixelPoint,
    pub origin_geometry: Geometry,
}

impl Gesture {
    pub fn new(
        block: BlockId,
        kind: GestureKind,
        origin_pointer: PixelPoint,
        origin_geometry: Geometry,
    ) -> Self {
        Self {
            block,
            kind,
            origin_pointer,
            origin_geometry,
        }
    }

    /// Footprint the block would take with the pointer at `pointer`
    pub fn candidate(&self, pointer: PixelPoint, grid: &GridConfig) -> Rect {
        let delta = pointer.delta_from(self.origin_pointer);
        match self.kind {
            GestureKind::Move => move_candidate(&self.origin_geometry, delta, grid),
            GestureKind::Resize(handle) => {
                resize_candidate(&self.origin_geometry, handle, delta, grid)
            }
        }
    }
}
