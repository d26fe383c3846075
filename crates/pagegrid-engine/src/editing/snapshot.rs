//! # Read model
//!
//! [`Snapshot`] is an owned copy of the editor state taken at one version.
//! Renderers read it and never reach into the store.
//!
//! [`Preview`] projects a snapshot for one of two viewports:
//!
//! - **Desktop** keeps each block's absolute grid placement
//! - **Mobile** drops columns and spans and stacks blocks top to bottom,
//!   ordered by `(row, column)` with insertion order breaking ties

use std::fmt::Write;

use serde::Serialize;

use crate::editing::Panels;
use crate::models::{Block, BlockId, BlockKind, GridConfig, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Blocks in insertion order (also the default stacking order)
    pub blocks: Vec<Block>,
    /// Resolved selection: always names a block in `blocks`
    pub selection: Option<BlockId>,
    pub grid: GridConfig,
    pub panels: Panels,
    pub version: u64,
}

impl Snapshot {
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn selected(&self) -> Option<&Block> {
        self.selection.and_then(|id| self.block(id))
    }

    pub fn is_selected(&self, id: BlockId) -> bool {
        self.selection == Some(id)
    }

    /// Canvas width in pixels
    pub fn canvas_width_px(&self) -> u32 {
        self.grid.canvas_width_px()
    }

    /// One past the lowest occupied row, `0` for an empty canvas
    pub fn row_extent(&self) -> u32 {
        self.blocks
            .iter()
            .map(|block| block.geometry.row_end())
            .max()
            .unwrap_or(0)
    }

    /// Gap the preview uses: the selected block's gap, or zero
    pub fn preview_gap(&self) -> u32 {
        self.selected()
            .and_then(|block| block.preview_gap)
            .unwrap_or(0)
    }

    pub fn preview(&self, mode: PreviewMode) -> Preview {
        let gap = self.preview_gap();
        let items = match mode {
            PreviewMode::Desktop => self
                .blocks
                .iter()
                .map(|block| PreviewItem::new(block, desktop_placement(block)))
                .collect(),
            PreviewMode::Mobile => {
                let mut ordered: Vec<&Block> = self.blocks.iter().collect();
                // Stable sort keeps insertion order for equal (row, column)
                ordered.sort_by_key(|block| (block.geometry.row, block.geometry.column));
                ordered
                    .into_iter()
                    .enumerate()
                    .map(|(order, block)| PreviewItem::new(block, Placement::Stacked { order }))
                    .collect()
            }
        };
        Preview {
            mode,
            columns: self.grid.columns(),
            gap,
            items,
        }
    }
}

fn desktop_placement(block: &Block) -> Placement {
    Placement::Grid {
        column_start: block.geometry.column + 1,
        column_span: block.geometry.column_span,
        row_start: block.geometry.row + 1,
        row_span: block.geometry.row_span,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    Desktop,
    Mobile,
}

impl PreviewMode {
    /// Viewport `(width, height)` in pixels
    pub fn viewport(self) -> (u32, u32) {
        match self {
            PreviewMode::Desktop => (1200, 800),
            PreviewMode::Mobile => (375, 667),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PreviewMode::Desktop => "Desktop",
            PreviewMode::Mobile => "Mobile",
        }
    }
}

/// Where a previewed block goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    /// 1-based grid lines, ready for a CSS-style `grid-column: start / span n`
    Grid {
        column_start: u32,
        column_span: u32,
        row_start: u32,
        row_span: u32,
    },
    /// Position in a single full-width column
    Stacked { order: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewItem {
    pub id: BlockId,
    pub kind: BlockKind,
    pub content: String,
    pub style: Style,
    pub placement: Placement,
}

impl PreviewItem {
    fn new(block: &Block, placement: Placement) -> Self {
        Self {
            id: block.id,
            kind: block.kind,
            content: block.content.clone(),
            style: block.style.clone(),
            placement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub mode: PreviewMode,
    /// Column count of the desktop grid
    pub columns: u32,
    pub gap: u32,
    pub items: Vec<PreviewItem>,
}

/// Format a preview as a readable outline, one item per line.
///
/// Content is reduced to its first line.
pub fn format_preview(preview: &Preview) -> String {
    let (width, height) = preview.mode.viewport();
    let mut result = String::new();
    let _ = write!(
        result,
        "{} {width}x{height} columns={} gap={}",
        preview.mode.label(),
        preview.columns,
        preview.gap
    );
    for item in &preview.items {
        let first_line = item.content.lines().next().unwrap_or("");
        let _ = match item.placement {
            Placement::Grid {
                column_start,
                column_span,
                row_start,
                row_span,
            } => write!(
                result,
                "\n{} col {column_start}/span {column_span} row {row_start}/span {row_span}: {first_line}",
                item.kind
            ),
            Placement::Stacked { order } => {
                write!(result, "\n#{order} {}: {first_line}", item.kind)
            }
        };
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockPatch;
    use crate::tests::{block_at, editor};
    use pretty_assertions::assert_eq;

    fn build() -> crate::editing::Editor {
        let mut editor = editor();
        for (kind, column, row, content) in [
            (BlockKind::Text, 6, 0, "# Right"),
            (BlockKind::Image, 0, 3, "https://example.com/a.png"),
            (BlockKind::Text, 0, 0, "# Left\n\nbody"),
        ] {
            let mut block = block_at(kind, column, row, 3, 2);
            block.content = content.to_string();
            editor.insert_block(block).unwrap();
        }
        editor
    }

    #[test]
    fn test_desktop_preview_keeps_grid_placement() {
        let snapshot = build().snapshot();
        let preview = snapshot.preview(PreviewMode::Desktop);

        insta::assert_snapshot!(format_preview(&preview), @r"
        Desktop 1200x800 columns=12 gap=0
        text col 7/span 3 row 1/span 2: # Right
        image col 1/span 3 row 4/span 2: https://example.com/a.png
        text col 1/span 3 row 1/span 2: # Left
        ");
    }

    #[test]
    fn test_mobile_preview_orders_by_row_then_column() {
        let snapshot = build().snapshot();
        let preview = snapshot.preview(PreviewMode::Mobile);

        insta::assert_snapshot!(format_preview(&preview), @r"
        Mobile 375x667 columns=12 gap=0
        #0 text: # Left
        #1 text: # Right
        #2 image: https://example.com/a.png
        ");
    }

    #[test]
    fn test_mobile_order_ignores_insertion_order() {
        let mut editor = editor();
        let first = block_at(BlockKind::Text, 0, 0, 1, 1);
        let second = block_at(BlockKind::Text, 0, 1, 1, 1);
        let (first_id, second_id) = (first.id, second.id);
        editor.insert_block(second).unwrap();
        editor.insert_block(first).unwrap();

        let preview = editor.snapshot().preview(PreviewMode::Mobile);
        let ids: Vec<_> = preview.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![first_id, second_id]);
    }

    #[test]
    fn test_preview_gap_follows_selection() {
        let mut editor = build();
        let id = editor.blocks()[1].id;
        editor
            .update_block(
                id,
                BlockPatch {
                    preview_gap: Some(Some(4)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(editor.snapshot().preview_gap(), 0);

        editor.select(Some(id)).unwrap();
        assert_eq!(editor.snapshot().preview(PreviewMode::Mobile).gap, 4);
    }

    #[test]
    fn test_row_extent_and_canvas_width() {
        let snapshot = build().snapshot();
        assert_eq!(snapshot.row_extent(), 5);
        assert_eq!(snapshot.canvas_width_px(), 960);

        assert_eq!(editor().snapshot().row_extent(), 0);
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let mut editor = build();
        let snapshot = editor.snapshot();
        let id = snapshot.blocks[0].id;

        editor.delete_block(id).unwrap();

        assert!(snapshot.block(id).is_some());
        assert!(editor.snapshot().block(id).is_none());
        assert!(editor.snapshot().version > snapshot.version);
    }
}
