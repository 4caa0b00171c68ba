#![forbid(unsafe_code)]

//! The editor facade a UI talks to.
//!
//! [`Editor`] registers each canvas command once and routes every edit
//! through a [`Session`], so the UI only ever sees `undo`, `redo`,
//! `can_undo`, `can_redo`, and a `version` that changes after each
//! committed edit.

use std::num::NonZeroUsize;
use std::sync::Arc;

use pxed_history::{CommandError, HistoryConfig, Invoker, Result, Session, register};
use tracing::{debug, info};

use crate::canvas::Tile;
use crate::commands::{
    EnlargeCanvas, PutTile, RemovedStrip, ResizePixelGrid, ShrinkCanvasHeight,
    ShrinkCanvasWidth, Underneath,
};
use crate::document::{Document, Reference};
use crate::geometry::{Grid, Loc, Rect};

/// Document session plus one registration per editing command.
pub struct Editor {
    session: Session<Document>,
    put_tile: Invoker<Document, PutTile>,
    enlarge_canvas: Invoker<Document, EnlargeCanvas>,
    shrink_width: Invoker<Document, ShrinkCanvasWidth>,
    shrink_height: Invoker<Document, ShrinkCanvasHeight>,
    resize_grid: Invoker<Document, ResizePixelGrid>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("document", &self.session.state().name)
            .field("history", self.session.history())
            .field("version", &self.session.version())
            .finish()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_session(Session::new(
            Document::default(),
            pxed_history::DEFAULT_CAPACITY,
        ))
    }
}

impl Editor {
    #[must_use]
    pub fn new(document: Document, capacity: NonZeroUsize) -> Self {
        Self::with_session(Session::new(document, capacity))
    }

    pub fn from_config(document: Document, config: &HistoryConfig) -> Result<Self> {
        Ok(Self::with_session(Session::from_config(document, config)?))
    }

    fn with_session(session: Session<Document>) -> Self {
        Self {
            session,
            put_tile: register(PutTile),
            enlarge_canvas: register(EnlargeCanvas),
            shrink_width: register(ShrinkCanvasWidth),
            shrink_height: register(ShrinkCanvasHeight),
            resize_grid: register(ResizePixelGrid),
        }
    }

    // ========================================================================
    // Undoable edits
    // ========================================================================

    /// Overwrite canvas pixels with `tile` at `dest`.
    pub fn put_tile(&mut self, tile: Tile, dest: Loc) -> Result<Arc<Underneath>> {
        self.session.run(&self.put_tile, (tile, dest))
    }

    pub fn enlarge_canvas(&mut self, dx: u32, dy: u32) -> Result<()> {
        self.session.run(&self.enlarge_canvas, (dx, dy)).map(drop)
    }

    pub fn shrink_canvas_width(&mut self, delta: u32) -> Result<Arc<RemovedStrip>> {
        self.session.run(&self.shrink_width, delta)
    }

    pub fn shrink_canvas_height(&mut self, delta: u32) -> Result<Arc<RemovedStrip>> {
        self.session.run(&self.shrink_height, delta)
    }

    /// Change the grid overlay. Repeated calls merge into one undo step.
    pub fn resize_pixel_grid(&mut self, grid: Grid) -> Result<Grid> {
        self.session.run(&self.resize_grid, grid).map(|prev| *prev)
    }

    /// Copy `rect` of a reference image, faded by its opacity, onto the
    /// canvas at `dest`. Recorded as a tile edit.
    ///
    /// `rect` must lie within the reference image.
    pub fn draw_reference(&mut self, id: &str, rect: Rect, dest: Loc) -> Result<Arc<Underneath>> {
        let reference = self.session.state().reference(id)?;
        let bounds = Rect::from_origin(Loc::ZERO, reference.source.size());
        if !bounds.contains(rect) {
            return Err(CommandError::InvalidArgument(format!(
                "{rect:?} leaves reference '{id}' ({})",
                reference.source.size()
            ))
            .into());
        }
        let tile = reference.source.crop(rect).with_opacity(reference.opacity);
        self.put_tile(tile, dest)
    }

    /// Stamp the current reference's selection at the grid cell containing
    /// `at`. Returns `None` without recording anything when no reference is
    /// current or it has no selection.
    pub fn draw_selection(&mut self, at: Loc) -> Result<Option<Arc<Underneath>>> {
        let doc = self.session.state();
        let Some((id, cells)) = doc
            .current_reference()
            .and_then(|r| Some((r.id.clone(), r.selection?)))
        else {
            return Ok(None);
        };
        let rect = doc.grid.map_rect(cells);
        let dest = doc.grid.normalize_loc(at);
        self.draw_reference(&id, rect, dest).map(Some)
    }

    pub fn undo(&mut self) -> Result<()> {
        self.session.undo()
    }

    pub fn redo(&mut self) -> Result<()> {
        self.session.redo()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    // ========================================================================
    // Untracked changes
    // ========================================================================

    /// Replace the document (e.g. after opening an image) and forget history.
    pub fn open_document(&mut self, document: Document) -> Document {
        info!(
            name = %document.name,
            size = %document.canvas.size(),
            "document opened"
        );
        self.session.replace_state(document)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.session.state_mut_untracked().name = name.into();
    }

    pub fn open_reference(&mut self, reference: Reference) {
        self.session.state_mut_untracked().open_reference(reference);
    }

    pub fn close_reference(&mut self, id: &str) -> Result<Reference> {
        Ok(self.session.state_mut_untracked().close_reference(id)?)
    }

    pub fn select_reference(&mut self, id: Option<&str>) -> Result<()> {
        Ok(self.session.state_mut_untracked().select_reference(id)?)
    }

    /// Set or clear a reference's stamp region, in grid cells.
    pub fn set_reference_selection(&mut self, id: &str, selection: Option<Rect>) -> Result<()> {
        Ok(self
            .session
            .state_mut_untracked()
            .set_reference_selection(id, selection)?)
    }

    pub fn set_reference_opacity(&mut self, id: &str, opacity: u8) -> Result<()> {
        debug!(id, opacity, "reference opacity changed");
        Ok(self
            .session
            .state_mut_untracked()
            .set_reference_opacity(id, opacity)?)
    }

    /// Drop all history, keeping the document.
    pub fn clear_history(&mut self) {
        self.session.clear_history();
    }

    // ========================================================================
    // Info
    // ========================================================================

    #[must_use]
    pub fn document(&self) -> &Document {
        self.session.state()
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.session.version()
    }

    #[must_use]
    pub fn session(&self) -> &Session<Document> {
        &self.session
    }
}
