#![forbid(unsafe_code)]

//! The pixel document: canvas, grid setting, and reference images.

use pxed_history::CommandError;
use tracing::debug;

use crate::canvas::{Canvas, Tile};
use crate::geometry::{Grid, Rect, Size};

/// Name given to documents that have not been saved yet.
pub const UNTITLED: &str = "untitled";

/// A reference image shown beside the canvas and sampled into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub id: String,
    pub name: String,
    pub source: Tile,
    /// 0 is invisible, 255 is fully opaque.
    pub opacity: u8,
    /// Region to stamp onto the canvas, in grid cells.
    pub selection: Option<Rect>,
}

impl Reference {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, source: Tile) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source,
            opacity: u8::MAX,
            selection: None,
        }
    }
}

/// Everything the editor's commands mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub canvas: Canvas,
    pub grid: Grid,
    references: Vec<Reference>,
    current_reference: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        let grid = Grid::default();
        Self::new(UNTITLED, Canvas::new(Size::new(grid.width(), grid.height())))
    }
}

impl Document {
    #[must_use]
    pub fn new(name: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            name: name.into(),
            canvas,
            grid: Grid::default(),
            references: Vec::new(),
            current_reference: None,
        }
    }

    /// A document showing an opened image.
    #[must_use]
    pub fn from_image(name: impl Into<String>, image: Tile) -> Self {
        Self::new(name, Canvas::from_tile(image))
    }

    // ========================================================================
    // References
    // ========================================================================

    #[must_use]
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn reference(&self, id: &str) -> Result<&Reference, CommandError> {
        self.references
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CommandError::unknown("reference", id))
    }

    fn reference_mut(&mut self, id: &str) -> Result<&mut Reference, CommandError> {
        self.references
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CommandError::unknown("reference", id))
    }

    #[must_use]
    pub fn current_reference(&self) -> Option<&Reference> {
        let id = self.current_reference.as_deref()?;
        self.references.iter().find(|r| r.id == id)
    }

    /// Select a reference, or clear the selection with `None`.
    pub fn select_reference(&mut self, id: Option<&str>) -> Result<(), CommandError> {
        if let Some(id) = id {
            self.reference(id)?;
        }
        self.current_reference = id.map(str::to_string);
        Ok(())
    }

    pub fn open_reference(&mut self, reference: Reference) {
        debug!(id = %reference.id, name = %reference.name, "reference opened");
        self.references.push(reference);
    }

    /// Close a reference. If it was selected, the selection moves to its
    /// left neighbour (or the right one when it was first).
    pub fn close_reference(&mut self, id: &str) -> Result<Reference, CommandError> {
        let index = self
            .references
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CommandError::unknown("reference", id))?;

        if self.current_reference.as_deref() == Some(id) {
            let neighbour = if index == 0 { 1 } else { index - 1 };
            self.current_reference = self.references.get(neighbour).map(|r| r.id.clone());
        }
        debug!(id, "reference closed");
        Ok(self.references.remove(index))
    }

    pub fn set_reference_opacity(&mut self, id: &str, opacity: u8) -> Result<(), CommandError> {
        self.reference_mut(id)?.opacity = opacity;
        Ok(())
    }

    /// Set or clear the stamp region of a reference, in grid cells.
    pub fn set_reference_selection(
        &mut self,
        id: &str,
        selection: Option<Rect>,
    ) -> Result<(), CommandError> {
        self.reference_mut(id)?.selection = selection;
        Ok(())
    }
}
