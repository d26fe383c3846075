pub mod block;
pub mod grid;
pub mod payload;
pub mod style;

pub use block::{Block, BlockId, BlockKind, BlockPatch, Geometry, PixelFrame, Rect};
pub use grid::{GridConfig, PixelDelta, PixelPoint};
pub use payload::DropPayload;
pub use style::{BorderStyle, Style, StylePatch, TextAlign};
