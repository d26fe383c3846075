//! # Layout engines
//!
//! Pure functions over block geometry. Nothing in here mutates state: each
//! engine turns an intent (a drop cell, a pointer delta, a handle drag) into
//! a candidate [`Rect`](crate::models::Rect), and [`collision`] decides
//! whether that candidate may be committed. The editor store in
//! [`crate::editing`] is the only place candidates are applied.
//!
//! - **`collision`**: containment and zero-overlap checks
//! - **`placement`**: drop-to-create and drag-to-move candidates
//! - **`resize`**: eight-handle resize candidates

pub mod collision;
pub mod placement;
pub mod resize;

pub use collision::{check, first_conflict, is_legal, overlaps};
pub use placement::{drop_candidate, move_candidate};
pub use resize::{Edges, ResizeHandle, resize_candidate};
