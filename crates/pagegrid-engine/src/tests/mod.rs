//! Shared helpers for unit tests across the crate

use crate::editing::Editor;
use crate::models::{Block, BlockKind, Geometry, GridConfig};

/// A block with default content placed at the given cell and size
pub fn block_at(kind: BlockKind, column: u32, row: u32, column_span: u32, row_span: u32) -> Block {
    Block::new(kind, Geometry::new(column, row, column_span, row_span))
}

/// An editor on the default 12 x 80px grid
pub fn editor() -> Editor {
    Editor::new(GridConfig::default())
}

/// Assert the two canvas invariants over every pair of blocks
pub fn assert_layout_invariants(editor: &Editor) {
    let columns = i64::from(editor.grid().columns());
    let blocks = editor.blocks();
    for block in blocks {
        let rect = block.rect();
        assert!(rect.has_area(), "block {} has an empty footprint", block.id);
        assert!(
            rect.col_end <= columns,
            "block {} at {} exceeds {} columns",
            block.id,
            block.geometry,
            columns
        );
    }
    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            assert!(
                !crate::layout::overlaps(&a.rect(), &b.rect()),
                "blocks {} ({}) and {} ({}) overlap",
                a.id,
                a.geometry,
                b.id,
                b.geometry
            );
        }
    }
}
