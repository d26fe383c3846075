use log::{debug, info, warn};

use crate::editing::{Cmd, EditError, Gesture, GestureKind, Patch, Snapshot};
use crate::layout::{self, ResizeHandle};
use crate::models::{
    Block, BlockId, BlockKind, BlockPatch, DropPayload, GridConfig, PixelDelta, PixelPoint, Rect,
    StylePatch,
};

/// UI visibility flags owned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panels {
    pub show_preview: bool,
    pub show_properties: bool,
}

/// The editor state store.
///
/// Holds the block collection (in insertion order), the selection, the grid
/// configuration, the panel flags and at most one active gesture. Every
/// mutation goes through a method on this type and is all-or-nothing: when a
/// method returns `Err` the store is exactly as it was before the call.
///
/// After every accepted mutation:
/// - each block satisfies `column + column_span <= columns` for the column
///   count in force when the block was last placed or resized
/// - no two blocks overlap (sharing an edge is fine)
/// - the selection, if any, names an existing block
///
/// ```rust
/// # use pagegrid_engine::{Editor, BlockKind, GridConfig, PixelDelta};
/// let mut editor = Editor::new(GridConfig::default());
/// let block = editor.create_block(BlockKind::Text, 0, 0).unwrap();
///
/// // Right by two cells
/// editor.move_block(block.id, PixelDelta::new(160.0, 0.0)).unwrap();
/// assert_eq!(editor.block(block.id).unwrap().geometry.column, 2);
///
/// // A second block on top of the first is rejected and nothing changes
/// assert!(editor.create_block(BlockKind::Image, 1, 3).is_err());
/// assert_eq!(editor.blocks().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Editor {
    blocks: Vec<Block>,
    selection: Option<BlockId>,
    grid: GridConfig,
    panels: Panels,
    gesture: Option<Gesture>,
    version: u64,
}

impl Editor {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    /// Apply a command. See the individual methods for the semantics of each variant.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        match cmd {
            Cmd::CreateBlock { kind, row, column } => self
                .create_block(kind, row, column)
                .map(|block| self.patch(vec![block.id])),
            Cmd::Drop {
                payload,
                row,
                column,
            } => self
                .drop_payload(&payload, row, column)
                .map(|block| self.patch(vec![block.id])),
            Cmd::MoveBlock { id, delta } => self.move_block(id, delta),
            Cmd::ResizeBlock { id, handle, delta } => self.resize_block(id, handle, delta),
            Cmd::BeginMove { id, pointer } => self.begin_move(id, pointer),
            Cmd::BeginResize {
                id,
                handle,
                pointer,
            } => self.begin_resize(id, handle, pointer),
            Cmd::PointerMove { pointer } => self.pointer_moved(pointer),
            Cmd::EndGesture => self.end_gesture(),
            Cmd::UpdateContent { id, content } => self.update_content(id, content),
            Cmd::UpdateStyle { id, style } => self.update_style(id, style),
            Cmd::UpdateBlock { id, patch } => self.update_block(id, patch),
            Cmd::DeleteBlock { id } => self.delete_block(id),
            Cmd::Select { id } => self.select(id),
            Cmd::AdjustColumns { delta } => {
                self.set_grid_columns(delta);
                Ok(self.patch(Vec::new()))
            }
            Cmd::AdjustCellWidth { delta } => {
                self.set_cell_width(delta);
                Ok(self.patch(Vec::new()))
            }
            Cmd::SetPreviewVisible(visible) => Ok(self.set_preview_visible(visible)),
            Cmd::SetPropertiesVisible(visible) => Ok(self.set_properties_visible(visible)),
        }
    }

    /// Create a block of `kind` at `(row, column)` with the default 3 x 2 size.
    ///
    /// The new block becomes the selection.
    pub fn create_block(
        &mut self,
        kind: BlockKind,
        row: u32,
        column: u32,
    ) -> Result<Block, EditError> {
        let candidate = layout::drop_candidate(row, column);
        if let Err(err) = layout::check(&candidate, None, &self.blocks, self.grid.columns()) {
            debug!("drop of {kind} at row {row} column {column} rejected: {err}");
            return Err(err);
        }
        let geometry = candidate.to_geometry().ok_or(EditError::InvalidGeometry)?;

        let block = Block::new(kind, geometry);
        info!("created {kind} block {} at {geometry}", block.id);
        self.blocks.push(block.clone());
        self.set_selection(Some(block.id));
        self.version += 1;
        Ok(block)
    }

    /// Handle a palette drop carrying a JSON drag descriptor.
    ///
    /// Malformed payloads and payloads that do not describe a new block are
    /// rejected without touching state.
    pub fn drop_payload(
        &mut self,
        payload: &str,
        row: u32,
        column: u32,
    ) -> Result<Block, EditError> {
        let payload = DropPayload::parse(payload).inspect_err(|err| {
            warn!("ignoring drop: {err}");
        })?;
        if !payload.is_new_component {
            debug!("ignoring drop of existing {} block", payload.kind);
            return Err(EditError::IgnoredDrop);
        }
        self.create_block(payload.kind, row, column)
    }

    /// Insert a fully formed block, validating its id and footprint
    pub fn insert_block(&mut self, block: Block) -> Result<Patch, EditError> {
        if self.block(block.id).is_some() {
            return Err(EditError::DuplicateBlock(block.id));
        }
        layout::check(&block.rect(), None, &self.blocks, self.grid.columns())?;
        let id = block.id;
        self.blocks.push(block);
        Ok(self.commit(vec![id]))
    }

    /// Move a block by a pointer delta relative to its current position
    pub fn move_block(&mut self, id: BlockId, delta: PixelDelta) -> Result<Patch, EditError> {
        let index = self.index_of(id)?;
        let candidate = layout::move_candidate(&self.blocks[index].geometry, delta, &self.grid);
        self.commit_geometry(index, candidate)
    }

    /// Resize a block by dragging `handle` by a pointer delta
    pub fn resize_block(
        &mut self,
        id: BlockId,
        handle: ResizeHandle,
        delta: PixelDelta,
    ) -> Result<Patch, EditError> {
        let index = self.index_of(id)?;
        let candidate =
            layout::resize_candidate(&self.blocks[index].geometry, handle, delta, &self.grid);
        self.commit_geometry(index, candidate)
    }

    /// Start dragging a block. The block becomes the selection.
    pub fn begin_move(&mut self, id: BlockId, pointer: PixelPoint) -> Result<Patch, EditError> {
        self.begin_gesture(id, GestureKind::Move, pointer)
    }

    /// Start dragging one of a block's resize handles
    pub fn begin_resize(
        &mut self,
        id: BlockId,
        handle: ResizeHandle,
        pointer: PixelPoint,
    ) -> Result<Patch, EditError> {
        self.begin_gesture(id, GestureKind::Resize(handle), pointer)
    }

    /// Feed a pointer sample to the active gesture.
    ///
    /// A legal candidate is committed immediately. An illegal one is dropped
    /// and the block keeps its last committed geometry.
    pub fn pointer_moved(&mut self, pointer: PixelPoint) -> Result<Patch, EditError> {
        let gesture = self.gesture.ok_or(EditError::NoActiveGesture)?;
        let index = match self.index_of(gesture.block) {
            Ok(index) => index,
            Err(err) => {
                self.gesture = None;
                return Err(err);
            }
        };
        let candidate = gesture.candidate(pointer, &self.grid);
        self.commit_geometry(index, candidate)
    }

    /// Release the pointer. The block stays at its last committed geometry.
    pub fn end_gesture(&mut self) -> Result<Patch, EditError> {
        let gesture = self.gesture.take().ok_or(EditError::NoActiveGesture)?;
        if let Some(block) = self.block(gesture.block) {
            debug!("gesture on {} ended at {}", block.id, block.geometry);
        }
        Ok(self.patch(Vec::new()))
    }

    pub fn update_content(&mut self, id: BlockId, content: String) -> Result<Patch, EditError> {
        self.update_block(
            id,
            BlockPatch {
                content: Some(content),
                ..Default::default()
            },
        )
    }

    /// Merge `style` into the block's style key by key
    pub fn update_style(&mut self, id: BlockId, style: StylePatch) -> Result<Patch, EditError> {
        self.update_block(
            id,
            BlockPatch {
                style: Some(style),
                ..Default::default()
            },
        )
    }

    /// Apply a partial update. Omitted fields keep their values.
    ///
    /// A span change is validated like a resize; if it is illegal nothing in
    /// the patch is applied.
    pub fn update_block(&mut self, id: BlockId, patch: BlockPatch) -> Result<Patch, EditError> {
        let index = self.index_of(id)?;
        if patch.touches_geometry() {
            let candidate = patch.geometry_for(&self.blocks[index].geometry);
            if candidate != self.blocks[index].rect() {
                self.check_candidate(id, &candidate)?;
            }
        }

        let BlockPatch {
            content,
            column_span,
            row_span,
            style,
            preview_gap,
        } = patch;
        let block = &mut self.blocks[index];
        let before = block.clone();
        if let Some(column_span) = column_span {
            block.geometry.column_span = column_span;
        }
        if let Some(row_span) = row_span {
            block.geometry.row_span = row_span;
        }
        if let Some(content) = content {
            block.content = content;
        }
        if let Some(style) = style {
            block.style.merge(style);
        }
        if let Some(preview_gap) = preview_gap {
            block.preview_gap = preview_gap;
        }

        if *block == before {
            return Ok(self.patch(Vec::new()));
        }
        Ok(self.commit(vec![id]))
    }

    pub fn delete_block(&mut self, id: BlockId) -> Result<Patch, EditError> {
        let index = self.index_of(id)?;
        let removed = self.blocks.remove(index);
        if self.selection == Some(id) {
            self.set_selection(None);
        }
        if self.gesture.is_some_and(|gesture| gesture.block == id) {
            self.gesture = None;
        }
        info!("deleted {} block {}", removed.kind, removed.id);
        Ok(self.commit(vec![id]))
    }

    /// Select a block, or clear the selection with `None`.
    ///
    /// The properties panel follows the selection.
    pub fn select(&mut self, id: Option<BlockId>) -> Result<Patch, EditError> {
        if let Some(id) = id {
            self.index_of(id)?;
        }
        if self.selection == id && self.panels.show_properties == id.is_some() {
            return Ok(self.patch(Vec::new()));
        }
        self.set_selection(id);
        Ok(self.commit(Vec::new()))
    }

    /// Change the column count by `delta`, clamped to 4..=24. Placed blocks are not moved.
    pub fn set_grid_columns(&mut self, delta: i32) -> u32 {
        let before = self.grid.columns();
        let columns = self.grid.adjust_columns(delta);
        if columns != before {
            info!("grid columns {before} -> {columns}");
            self.version += 1;
        }
        columns
    }

    /// Change the cell width by `delta` pixels, clamped to 40..=200
    pub fn set_cell_width(&mut self, delta: i32) -> u32 {
        let before = self.grid.cell_width_px();
        let width = self.grid.adjust_cell_width(delta);
        if width != before {
            info!("cell width {before}px -> {width}px");
            self.version += 1;
        }
        width
    }

    pub fn set_preview_visible(&mut self, visible: bool) -> Patch {
        if self.panels.show_preview == visible {
            return self.patch(Vec::new());
        }
        self.panels.show_preview = visible;
        self.commit(Vec::new())
    }

    pub fn set_properties_visible(&mut self, visible: bool) -> Patch {
        if self.panels.show_properties == visible {
            return self.patch(Vec::new());
        }
        self.panels.show_properties = visible;
        self.commit(Vec::new())
    }

    /// Blocks in insertion order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// The selected block id, `None` if nothing is selected or the id is stale
    pub fn selection(&self) -> Option<BlockId> {
        self.selected_block().map(|block| block.id)
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selection.and_then(|id| self.block(id))
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// True if some block covers the cell `(row, column)`
    pub fn is_cell_occupied(&self, row: u32, column: u32) -> bool {
        self.blocks.iter().any(|block| block.covers(row, column))
    }

    /// Immutable copy of the current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            blocks: self.blocks.clone(),
            selection: self.selection(),
            grid: self.grid,
            panels: self.panels,
            version: self.version,
        }
    }

    fn index_of(&self, id: BlockId) -> Result<usize, EditError> {
        self.blocks
            .iter()
            .position(|block| block.id == id)
            .ok_or(EditError::UnknownBlock(id))
    }

    fn begin_gesture(
        &mut self,
        id: BlockId,
        kind: GestureKind,
        pointer: PixelPoint,
    ) -> Result<Patch, EditError> {
        if let Some(active) = &self.gesture {
            debug!("gesture start on {id} ignored, {} is still active", active.block);
            return Err(EditError::GestureInProgress);
        }
        let index = self.index_of(id)?;
        self.gesture = Some(Gesture::new(id, kind, pointer, self.blocks[index].geometry));
        if self.selection == Some(id) && self.panels.show_properties {
            return Ok(self.patch(Vec::new()));
        }
        self.set_selection(Some(id));
        Ok(self.commit(Vec::new()))
    }

    fn check_candidate(&self, id: BlockId, candidate: &Rect) -> Result<(), EditError> {
        layout::check(candidate, Some(id), &self.blocks, self.grid.columns()).inspect_err(|err| {
            debug!("candidate {candidate:?} for block {id} rejected: {err}");
        })
    }

    /// Commit `candidate` as the geometry of the block at `index` if it is legal
    fn commit_geometry(&mut self, index: usize, candidate: Rect) -> Result<Patch, EditError> {
        let block = &self.blocks[index];
        if block.rect() == candidate {
            return Ok(self.patch(Vec::new()));
        }
        let id = block.id;
        self.check_candidate(id, &candidate)?;
        let geometry = candidate.to_geometry().ok_or(EditError::InvalidGeometry)?;
        self.blocks[index].geometry = geometry;
        Ok(self.commit(vec![id]))
    }

    fn set_selection(&mut self, selection: Option<BlockId>) {
        self.selection = selection;
        self.panels.show_properties = selection.is_some();
    }

    /// Patch describing the current state without bumping the version
    fn patch(&self, changed: Vec<BlockId>) -> Patch {
        Patch {
            changed,
            selection: self.selection(),
            version: self.version,
        }
    }

    fn commit(&mut self, changed: Vec<BlockId>) -> Patch {
        self.version += 1;
        self.patch(changed)
    }
}
