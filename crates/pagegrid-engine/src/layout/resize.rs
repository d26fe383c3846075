use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::editing::EditError;
use crate::models::{Geometry, GridConfig, PixelDelta, Rect};

/// One of the eight grab points drawn around a selected block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

/// Which edges of the block follow the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    pub fn edges(self) -> Edges {
        use ResizeHandle::*;
        Edges {
            left: matches!(self, TopLeft | Left | BottomLeft),
            right: matches!(self, TopRight | Right | BottomRight),
            top: matches!(self, TopLeft | Top | TopRight),
            bottom: matches!(self, BottomLeft | Bottom | BottomRight),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::TopLeft => "top-left",
            ResizeHandle::Top => "top",
            ResizeHandle::TopRight => "top-right",
            ResizeHandle::Right => "right",
            ResizeHandle::BottomRight => "bottom-right",
            ResizeHandle::Bottom => "bottom",
            ResizeHandle::BottomLeft => "bottom-left",
            ResizeHandle::Left => "left",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|handle| handle.as_str() == s)
            .ok_or_else(|| EditError::UnknownHandle(s.to_string()))
    }
}

/// Footprint after dragging `handle` by `delta` from the gesture start.
///
/// `origin` is the geometry recorded when the gesture began, and `delta` is
/// measured from the gesture's starting pointer position, so repeated samples
/// do not accumulate rounding. Each moving edge snaps to whole cells and no
/// span drops below one cell. When the left or top edge moves, the opposite
/// edge stays where it was unless the moving edge is clamped at zero.
pub fn resize_candidate(
    origin: &Geometry,
    handle: ResizeHandle,
    delta: PixelDelta,
    grid: &GridConfig,
) -> Rect {
    let edges = handle.edges();
    let cells_x = grid.px_to_columns(delta.dx);
    let cells_y = grid.px_to_rows(delta.dy);

    let (column, column_span) = resize_axis(
        i64::from(origin.column),
        i64::from(origin.column_span),
        cells_x,
        edges.left,
        edges.right,
        Some(i64::from(grid.columns())),
    );
    let (row, row_span) = resize_axis(
        i64::from(origin.row),
        i64::from(origin.row_span),
        cells_y,
        edges.top,
        edges.bottom,
        None,
    );

    Rect::new(column, row, column_span, row_span)
}

/// Resize one axis. Returns the new `(start, span)`.
fn resize_axis(
    start: i64,
    span: i64,
    cells: i64,
    leading: bool,
    trailing: bool,
    limit: Option<i64>,
) -> (i64, i64) {
    if cells == 0 {
        return (start, span);
    }
    if trailing {
        let mut new_span = span.saturating_add(cells);
        if let Some(limit) = limit {
            new_span = new_span.min(limit - start);
        }
        return (start, new_span.max(1));
    }
    if leading {
        let new_span = span.saturating_sub(cells).max(1);
        // Clamped at zero, so growth past the edge widens the block to the right
        let new_start = start.saturating_add(span - new_span).max(0);
        return (new_start, new_span);
    }
    (start, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn grid() -> GridConfig {
        GridConfig::new(12, 80)
    }

    fn cells(dx: i32, dy: i32) -> PixelDelta {
        PixelDelta::new(f64::from(dx) * 80.0, f64::from(dy) * 80.0)
    }

    #[test]
    fn test_handle_edges() {
        let corner = ResizeHandle::TopLeft.edges();
        assert!(corner.left && corner.top && !corner.right && !corner.bottom);

        let side = ResizeHandle::Right.edges();
        assert!(side.right && !side.left && !side.top && !side.bottom);

        for handle in ResizeHandle::ALL {
            let edges = handle.edges();
            assert!(!(edges.left && edges.right), "{handle} moves both sides");
            assert!(!(edges.top && edges.bottom), "{handle} moves both ends");
        }
    }

    #[test]
    fn test_handle_names_round_trip() {
        for handle in ResizeHandle::ALL {
            assert_eq!(handle.as_str().parse::<ResizeHandle>(), Ok(handle));
        }
        assert_eq!(
            "middle".parse::<ResizeHandle>(),
            Err(EditError::UnknownHandle("middle".to_string()))
        );
    }

    #[test]
    fn test_left_shrink_keeps_right_edge() {
        let origin = Geometry::new(4, 0, 4, 2);
        let candidate = resize_candidate(&origin, ResizeHandle::Left, cells(1, 0), &grid());

        assert_eq!(candidate, Rect::new(5, 0, 3, 2));
        assert_eq!(candidate.col_end, 8);
    }

    #[test]
    fn test_left_grow_keeps_right_edge() {
        let origin = Geometry::new(4, 0, 4, 2);
        let candidate = resize_candidate(&origin, ResizeHandle::Left, cells(-2, 0), &grid());
        assert_eq!(candidate, Rect::new(2, 0, 6, 2));
    }

    #[test]
    fn test_left_grow_past_column_zero_keeps_full_span() {
        let origin = Geometry::new(1, 0, 2, 1);
        let candidate = resize_candidate(&origin, ResizeHandle::Left, cells(-3, 0), &grid());
        assert_eq!(candidate, Rect::new(0, 0, 5, 1));
    }

    #[test]
    fn test_top_grow_past_row_zero_keeps_full_span() {
        let origin = Geometry::new(0, 1, 2, 2);
        let candidate = resize_candidate(&origin, ResizeHandle::Top, cells(0, -4), &grid());
        assert_eq!(candidate, Rect::new(0, 0, 2, 6));
    }

    #[rstest]
    #[case::bottom_right(ResizeHandle::BottomRight, 1e300)]
    #[case::top_left(ResizeHandle::TopLeft, -1e300)]
    #[case::top_left_shrink(ResizeHandle::TopLeft, 1e300)]
    #[case::bottom_right_shrink(ResizeHandle::BottomRight, -1e300)]
    fn test_huge_pointer_delta_does_not_overflow(#[case] handle: ResizeHandle, #[case] px: f64) {
        let origin = Geometry::new(2, 2, 2, 2);
        let candidate = resize_candidate(&origin, handle, PixelDelta::new(px, px), &grid());
        assert!(candidate.col_start >= 0 && candidate.row_start >= 0);
        assert!(candidate.column_span() >= 1 && candidate.row_span() >= 1);
    }

    #[rstest]
    #[case(ResizeHandle::Right, cells(-10, 0), Rect::new(4, 2, 1, 2))]
    #[case(ResizeHandle::Left, cells(10, 0), Rect::new(7, 2, 1, 2))]
    #[case(ResizeHandle::Bottom, cells(0, -10), Rect::new(4, 2, 4, 1))]
    #[case(ResizeHandle::Top, cells(0, 10), Rect::new(4, 3, 4, 1))]
    #[case(ResizeHandle::TopLeft, cells(10, 10), Rect::new(7, 3, 1, 1))]
    fn test_minimum_size_floor(
        #[case] handle: ResizeHandle,
        #[case] delta: PixelDelta,
        #[case] expected: Rect,
    ) {
        let origin = Geometry::new(4, 2, 4, 2);
        assert_eq!(resize_candidate(&origin, handle, delta, &grid()), expected);
    }

    #[test]
    fn test_right_grow_clamped_to_grid() {
        let origin = Geometry::new(8, 0, 2, 1);
        let candidate = resize_candidate(&origin, ResizeHandle::Right, cells(20, 0), &grid());
        assert_eq!(candidate, Rect::new(8, 0, 4, 1));
    }

    #[test]
    fn test_bottom_grow_is_unbounded() {
        let origin = Geometry::new(0, 0, 2, 1);
        let candidate = resize_candidate(&origin, ResizeHandle::Bottom, cells(0, 40), &grid());
        assert_eq!(candidate, Rect::new(0, 0, 2, 41));
    }

    #[test]
    fn test_top_shrink_keeps_bottom_edge() {
        let origin = Geometry::new(0, 3, 2, 4);
        let candidate = resize_candidate(&origin, ResizeHandle::Top, cells(0, 1), &grid());
        assert_eq!(candidate, Rect::new(0, 4, 2, 3));
        assert_eq!(candidate.row_end, 7);
    }

    #[test]
    fn test_corner_combines_both_axes() {
        let origin = Geometry::new(4, 4, 3, 3);

        let top_left = resize_candidate(&origin, ResizeHandle::TopLeft, cells(-1, -2), &grid());
        assert_eq!(top_left, Rect::new(3, 2, 4, 5));

        let bottom_right =
            resize_candidate(&origin, ResizeHandle::BottomRight, cells(2, 1), &grid());
        assert_eq!(bottom_right, Rect::new(4, 4, 5, 4));

        let top_right = resize_candidate(&origin, ResizeHandle::TopRight, cells(1, 1), &grid());
        assert_eq!(top_right, Rect::new(4, 5, 4, 2));

        let bottom_left =
            resize_candidate(&origin, ResizeHandle::BottomLeft, cells(1, -1), &grid());
        assert_eq!(bottom_left, Rect::new(5, 4, 2, 2));
    }

    #[test]
    fn test_edge_handles_ignore_the_other_axis() {
        let origin = Geometry::new(4, 4, 3, 3);
        let candidate = resize_candidate(&origin, ResizeHandle::Right, cells(1, 5), &grid());
        assert_eq!(candidate, Rect::new(4, 4, 4, 3));
    }

    #[test]
    fn test_zero_delta_is_identity() {
        let origin = Geometry::new(3, 5, 2, 2);
        for handle in ResizeHandle::ALL {
            assert_eq!(
                resize_candidate(&origin, handle, PixelDelta::ZERO, &grid()),
                origin.rect(),
                "{handle} changed geometry without pointer movement"
            );
        }
    }

    #[test]
    fn test_zero_delta_keeps_block_outside_narrowed_grid() {
        let narrow = GridConfig::new(8, 80);
        let origin = Geometry::new(6, 0, 4, 1);
        let candidate = resize_candidate(&origin, ResizeHandle::Right, PixelDelta::ZERO, &narrow);
        assert_eq!(candidate, origin.rect());
    }

    #[test]
    fn test_sub_half_cell_motion_rounds_away() {
        let origin = Geometry::new(3, 5, 2, 2);
        let candidate = resize_candidate(
            &origin,
            ResizeHandle::BottomRight,
            PixelDelta::new(39.0, -39.0),
            &grid(),
        );
        assert_eq!(candidate, origin.rect());
    }
}
