use crate::models::{Geometry, GridConfig, PixelDelta, Rect};

/// Footprint of a new block dropped with its top-left corner on `(row, column)`
pub fn drop_candidate(row: u32, column: u32) -> Rect {
    Geometry::new(
        column,
        row,
        Geometry::DEFAULT_COLUMN_SPAN,
        Geometry::DEFAULT_ROW_SPAN,
    )
    .rect()
}

/// Where a block that started at `origin` lands after the pointer moved by `delta`.
///
/// The block's pixel origin is shifted by `delta` and snapped to the nearest
/// cell. The column is clamped to `[0, columns - column_span]` and the row to
/// `[0, inf)`. Spans are unchanged. The result still has to pass
/// [`check`](super::collision::check) before it is committed.
pub fn move_candidate(origin: &Geometry, delta: PixelDelta, grid: &GridConfig) -> Rect {
    let start = grid.cell_origin(origin.row, origin.column);
    let column = grid.px_to_columns(start.x + delta.dx);
    let row = grid.px_to_rows(start.y + delta.dy);

    let max_column = (i64::from(grid.columns()) - i64::from(origin.column_span)).max(0);
    Rect::new(
        column.clamp(0, max_column),
        row.max(0),
        i64::from(origin.column_span),
        i64::from(origin.row_span),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn grid() -> GridConfig {
        GridConfig::new(12, 80)
    }

    #[test]
    fn test_drop_candidate_uses_default_size() {
        assert_eq!(drop_candidate(4, 2), Rect::new(2, 4, 3, 2));
    }

    #[rstest]
    #[case(PixelDelta::ZERO, Rect::new(2, 1, 3, 2))]
    // less than half a cell stays put
    #[case(PixelDelta::new(39.0, -39.0), Rect::new(2, 1, 3, 2))]
    #[case(PixelDelta::new(40.0, 40.0), Rect::new(3, 2, 3, 2))]
    #[case(PixelDelta::new(160.0, 0.0), Rect::new(4, 1, 3, 2))]
    #[case(PixelDelta::new(-80.0, -80.0), Rect::new(1, 0, 3, 2))]
    fn test_move_snaps_to_nearest_cell(#[case] delta: PixelDelta, #[case] expected: Rect) {
        let origin = Geometry::new(2, 1, 3, 2);
        assert_eq!(move_candidate(&origin, delta, &grid()), expected);
    }

    #[test]
    fn test_move_clamps_to_left_and_top() {
        let origin = Geometry::new(2, 1, 3, 2);
        let candidate = move_candidate(&origin, PixelDelta::new(-5000.0, -5000.0), &grid());
        assert_eq!(candidate, Rect::new(0, 0, 3, 2));
    }

    #[test]
    fn test_move_clamps_to_right_edge() {
        let origin = Geometry::new(2, 1, 3, 2);
        let candidate = move_candidate(&origin, PixelDelta::new(5000.0, 0.0), &grid());
        assert_eq!(candidate, Rect::new(9, 1, 3, 2));
    }

    #[test]
    fn test_move_rows_grow_downward() {
        let origin = Geometry::new(0, 0, 3, 2);
        let candidate = move_candidate(&origin, PixelDelta::new(0.0, 8000.0), &grid());
        assert_eq!(candidate, Rect::new(0, 100, 3, 2));
    }

    #[test]
    fn test_move_follows_cell_width() {
        let wide = GridConfig::new(12, 200);
        let origin = Geometry::new(0, 0, 2, 1);
        let candidate = move_candidate(&origin, PixelDelta::new(250.0, 0.0), &wide);
        assert_eq!(candidate.col_start, 1);
    }

    #[test]
    fn test_block_wider_than_grid_pins_to_column_zero() {
        let narrow = GridConfig::new(4, 80);
        let origin = Geometry::new(0, 0, 6, 1);
        let candidate = move_candidate(&origin, PixelDelta::new(240.0, 0.0), &narrow);
        assert_eq!(candidate.col_start, 0);
        assert_eq!(candidate.col_end, 6);
    }
}
