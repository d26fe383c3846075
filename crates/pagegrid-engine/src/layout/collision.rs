use crate::editing::EditError;
use crate::models::{Block, BlockId, Rect};

/// Two rectangles overlap iff they overlap on both axes.
/// Sharing an edge is not an overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.col_end <= b.col_start
        || b.col_end <= a.col_start
        || a.row_end <= b.row_start
        || b.row_end <= a.row_start)
}

/// Horizontal containment within `columns`; rows are unbounded below.
pub fn in_bounds(rect: &Rect, columns: u32) -> bool {
    rect.col_start >= 0 && rect.row_start >= 0 && rect.col_end <= i64::from(columns)
}

/// First block other than `exclude` whose footprint overlaps `candidate`
pub fn first_conflict<'a>(
    candidate: &Rect,
    exclude: Option<BlockId>,
    blocks: &'a [Block],
) -> Option<&'a Block> {
    blocks
        .iter()
        .filter(|block| Some(block.id) != exclude)
        .find(|block| overlaps(candidate, &block.rect()))
}

/// Validate a candidate footprint against the grid bounds and every other block.
pub fn check(
    candidate: &Rect,
    exclude: Option<BlockId>,
    blocks: &[Block],
    columns: u32,
) -> Result<(), EditError> {
    if !in_bounds(candidate, columns) {
        return Err(EditError::OutOfBounds);
    }
    if candidate.to_geometry().is_none() {
        return Err(EditError::InvalidGeometry);
    }
    match first_conflict(candidate, exclude, blocks) {
        Some(block) => Err(EditError::Overlap { with: block.id }),
        None => Ok(()),
    }
}

/// True if `candidate` may be committed for the block `exclude`
/// (or for a block that does not exist yet when `exclude` is `None`).
pub fn is_legal(candidate: &Rect, exclude: Option<BlockId>, blocks: &[Block], columns: u32) -> bool {
    check(candidate, exclude, blocks, columns).is_ok()
}
