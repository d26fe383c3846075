use serde::{Deserialize, Serialize};

/// Height of every grid row in pixels
pub const CELL_HEIGHT_PX: u32 = 80;

pub const MIN_COLUMNS: u32 = 4;
pub const MAX_COLUMNS: u32 = 24;
pub const DEFAULT_COLUMNS: u32 = 12;

pub const MIN_CELL_WIDTH_PX: u32 = 40;
pub const MAX_CELL_WIDTH_PX: u32 = 200;
pub const DEFAULT_CELL_WIDTH_PX: u32 = 80;

/// A pointer position in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to this point
    pub fn delta_from(&self, origin: PixelPoint) -> PixelDelta {
        PixelDelta::new(self.x - origin.x, self.y - origin.y)
    }
}

/// A pointer displacement in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PixelDelta {
    pub const ZERO: PixelDelta = PixelDelta { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Column count and cell size of the editing canvas.
///
/// Both values are kept inside their bounds by every constructor and setter.
/// Changing them never touches placed blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    columns: u32,
    cell_width_px: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
        }
    }
}

impl GridConfig {
    pub fn new(columns: u32, cell_width_px: u32) -> Self {
        Self {
            columns: columns.clamp(MIN_COLUMNS, MAX_COLUMNS),
            cell_width_px: cell_width_px.clamp(MIN_CELL_WIDTH_PX, MAX_CELL_WIDTH_PX),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn cell_width_px(&self) -> u32 {
        self.cell_width_px
    }

    pub fn cell_height_px(&self) -> u32 {
        CELL_HEIGHT_PX
    }

    /// Add `delta` columns, clamped. Returns the new count.
    pub fn adjust_columns(&mut self, delta: i32) -> u32 {
        self.columns = clamp_adjust(self.columns, delta, MIN_COLUMNS, MAX_COLUMNS);
        self.columns
    }

    /// Add `delta` pixels to the cell width, clamped. Returns the new width.
    pub fn adjust_cell_width(&mut self, delta: i32) -> u32 {
        self.cell_width_px =
            clamp_adjust(self.cell_width_px, delta, MIN_CELL_WIDTH_PX, MAX_CELL_WIDTH_PX);
        self.cell_width_px
    }

    /// Width of the whole canvas in pixels
    pub fn canvas_width_px(&self) -> u32 {
        self.columns * self.cell_width_px
    }

    /// Nearest whole number of columns covered by `px`
    pub fn px_to_columns(&self, px: f64) -> i64 {
        round_half_up(px / f64::from(self.cell_width_px))
    }

    /// Nearest whole number of rows covered by `px`
    pub fn px_to_rows(&self, px: f64) -> i64 {
        round_half_up(px / f64::from(CELL_HEIGHT_PX))
    }

    /// Top-left pixel of a cell
    pub fn cell_origin(&self, row: u32, column: u32) -> PixelPoint {
        PixelPoint::new(
            f64::from(column) * f64::from(self.cell_width_px),
            f64::from(row) * f64::from(CELL_HEIGHT_PX),
        )
    }
}

fn clamp_adjust(current: u32, delta: i32, min: u32, max: u32) -> u32 {
    let adjusted = i64::from(current) + i64::from(delta);
    // Bounds fit in u32, so the cast after clamping is lossless
    adjusted.clamp(i64::from(min), i64::from(max)) as u32
}

/// Round to the nearest integer with halves going toward positive infinity:
/// `0.5` gives `1` and `-0.5` gives `0`. Non-finite input gives `0`.
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i64
}
