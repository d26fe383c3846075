pub mod editing;
pub mod layout;
pub mod models;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{commands::*, editor::*, error::*, gesture::*, patch::*, snapshot::*};
pub use layout::{collision::is_legal, resize::ResizeHandle};
pub use models::{block::*, grid::*, payload::*, style::*};
