/*!
 * # Editor State Store
 *
 * The store owns every block on the canvas plus the selection, the grid
 * configuration, the panel flags and the active gesture.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth
 * - The block list lives in one [`Editor`] and in insertion order
 * - Nothing outside the store holds a mutable reference to a block
 *
 * ### 2. Command-Based Editing
 * - Every intent is a [`Cmd`] handed to [`Editor::apply`], or the matching method
 * - Geometry changes are computed by the pure engines in [`crate::layout`],
 *   validated by [`crate::layout::collision`] and only then committed
 * - A rejected command returns an [`EditError`] and leaves the store untouched
 *
 * ### 3. Gestures
 * - A drag is a [`Gesture`]: the pointer and the block geometry captured on
 *   pointer-down, plus a move or resize intent
 * - Each pointer sample is measured against the gesture origin, never against
 *   the previous sample, so rounding does not accumulate
 * - Legal samples commit immediately; illegal ones are dropped
 *
 * ### 4. Read API: Immutable Snapshots
 * - [`Editor::snapshot`] returns an owned [`Snapshot`] for rendering
 * - [`Snapshot::preview`] projects it for the desktop or mobile viewport
 *
 * ## Module Structure
 *
 * - **`editor`**: the `Editor` store and its panel flags
 * - **`commands`**: `Cmd` enum for every supported intent
 * - **`gesture`**: in-flight move and resize state
 * - **`patch`**: what a command changed
 * - **`snapshot`**: read model and viewport previews
 * - **`error`**: rejection reasons
 *
 * ## Usage Pattern
 *
 * ```rust
 * use pagegrid_engine::editing::*;
 * use pagegrid_engine::models::{BlockKind, GridConfig, PixelPoint};
 *
 * let mut editor = Editor::new(GridConfig::default());
 *
 * // 1. Drop a palette item onto a cell
 * let payload = r#"{"type":"text","isNewComponent":true}"#.to_string();
 * let patch = editor
 *     .apply(Cmd::Drop { payload, row: 0, column: 0 })
 *     .unwrap();
 * let id = patch.changed[0];
 *
 * // 2. Drag it one cell right
 * editor.apply(Cmd::BeginMove { id, pointer: PixelPoint::new(10.0, 10.0) }).unwrap();
 * editor.apply(Cmd::PointerMove { pointer: PixelPoint::new(90.0, 10.0) }).unwrap();
 * editor.apply(Cmd::EndGesture).unwrap();
 *
 * // 3. Render from a snapshot
 * let snapshot = editor.snapshot();
 * assert_eq!(snapshot.block(id).unwrap().geometry.column, 1);
 * ```
 */

pub mod commands;
pub mod editor;
pub mod error;
pub mod gesture;
pub mod patch;
pub mod snapshot;

pub use commands::Cmd;
pub use editor::{Editor, Panels};
pub use error::EditError;
pub use gesture::{Gesture, GestureKind};
pub use patch::Patch;
pub use snapshot::{Placement, Preview, PreviewItem, PreviewMode, Snapshot, format_preview};
