use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::grid::GridConfig;
use crate::models::style::{Style, StylePatch};

/// Stable identifier of a placed block. Assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// What a block renders. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Markdown source rendered as rich text
    Text,
    /// Image loaded from a URL
    Image,
}

impl BlockKind {
    pub const ALL: [BlockKind; 2] = [BlockKind::Text, BlockKind::Image];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
        }
    }

    /// Content a freshly dropped block starts with
    pub fn default_content(self) -> &'static str {
        match self {
            BlockKind::Text => {
                "# Your Title Here\n\nWrite your **markdown** content here. You can use:\n\n- Headers with #, ##, ###\n- **Bold text**\n- *Italic text*\n- `code blocks`"
            }
            BlockKind::Image => {
                "https://images.pexels.com/photos/1323550/pexels-photo-1323550.jpeg"
            }
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid placement of a block: top-left cell plus size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    pub column: u32,
    pub row: u32,
    pub column_span: u32,
    pub row_span: u32,
}

impl Geometry {
    /// Default width of a dropped block, in columns
    pub const DEFAULT_COLUMN_SPAN: u32 = 3;
    /// Default height of a dropped block, in rows
    pub const DEFAULT_ROW_SPAN: u32 = 2;

    pub fn new(column: u32, row: u32, column_span: u32, row_span: u32) -> Self {
        Self {
            column,
            row,
            column_span,
            row_span,
        }
    }

    /// The half-open rectangle of cells this geometry occupies
    pub fn rect(&self) -> Rect {
        Rect::new(
            i64::from(self.column),
            i64::from(self.row),
            i64::from(self.column_span),
            i64::from(self.row_span),
        )
    }

    pub fn column_end(&self) -> u32 {
        self.column.saturating_add(self.column_span)
    }

    pub fn row_end(&self) -> u32 {
        self.row.saturating_add(self.row_span)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "col {} row {} ({}x{})",
            self.column, self.row, self.column_span, self.row_span
        )
    }
}

/// Occupied cells `[col_start, col_end) x [row_start, row_end)`.
///
/// Signed so that candidate positions produced from pointer input can be
/// represented before they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub col_start: i64,
    pub col_end: i64,
    pub row_start: i64,
    pub row_end: i64,
}

impl Rect {
    pub fn new(column: i64, row: i64, column_span: i64, row_span: i64) -> Self {
        Self {
            col_start: column,
            col_end: column.saturating_add(column_span),
            row_start: row,
            row_end: row.saturating_add(row_span),
        }
    }

    pub fn column_span(&self) -> i64 {
        self.col_end - self.col_start
    }

    pub fn row_span(&self) -> i64 {
        self.row_end - self.row_start
    }

    /// True when both axes have positive extent
    pub fn has_area(&self) -> bool {
        self.column_span() >= 1 && self.row_span() >= 1
    }

    /// Convert back to a committed geometry.
    ///
    /// Returns `None` for negative origins, empty spans, or edges that do not fit a `u32`.
    pub fn to_geometry(&self) -> Option<Geometry> {
        if !self.has_area() {
            return None;
        }
        u32::try_from(self.col_end).ok()?;
        u32::try_from(self.row_end).ok()?;
        Some(Geometry {
            column: u32::try_from(self.col_start).ok()?,
            row: u32::try_from(self.row_start).ok()?,
            column_span: u32::try_from(self.column_span()).ok()?,
            row_span: u32::try_from(self.row_span()).ok()?,
        })
    }
}

/// Pixel rectangle of a block on the editing canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A placed element on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Markdown source for text blocks, URL for image blocks
    pub content: String,
    pub style: Style,
    /// Spacing used by the preview projection only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_gap: Option<u32>,
}

impl Block {
    /// A new block of `kind` with default content and style
    pub fn new(kind: BlockKind, geometry: Geometry) -> Self {
        Self {
            id: BlockId::new(),
            kind,
            geometry,
            content: kind.default_content().to_string(),
            style: Style::default(),
            preview_gap: None,
        }
    }

    pub fn rect(&self) -> Rect {
        self.geometry.rect()
    }

    /// True if the cell `(row, column)` lies inside this block
    pub fn covers(&self, row: u32, column: u32) -> bool {
        (self.geometry.row..self.geometry.row_end()).contains(&row)
            && (self.geometry.column..self.geometry.column_end()).contains(&column)
    }

    pub fn pixel_frame(&self, grid: &GridConfig) -> PixelFrame {
        let cell_w = f64::from(grid.cell_width_px());
        let cell_h = f64::from(grid.cell_height_px());
        PixelFrame {
            left: f64::from(self.geometry.column) * cell_w,
            top: f64::from(self.geometry.row) * cell_h,
            width: f64::from(self.geometry.column_span) * cell_w,
            height: f64::from(self.geometry.row_span) * cell_h,
        }
    }
}

/// Partial update of a block. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub content: Option<String>,
    pub column_span: Option<u32>,
    pub row_span: Option<u32>,
    pub style: Option<StylePatch>,
    /// `Some(None)` clears the gap
    pub preview_gap: Option<Option<u32>>,
}

impl BlockPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True if applying this patch would change the block's footprint
    pub fn touches_geometry(&self) -> bool {
        self.column_span.is_some() || self.row_span.is_some()
    }

    /// Geometry after applying the span fields to `current`
    pub fn geometry_for(&self, current: &Geometry) -> Rect {
        Rect::new(
            i64::from(current.column),
            i64::from(current.row),
            i64::from(self.column_span.unwrap_or(current.column_span)),
            i64::from(self.row_span.unwrap_or(current.row_span)),
        )
    }
}
