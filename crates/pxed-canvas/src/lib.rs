#![forbid(unsafe_code)]

//! Pixed canvas
//!
//! A pixel document and the reversible commands that edit it, recorded by
//! [`pxed_history`].
//!
//! # Key Components
//!
//! - [`Canvas`] / [`Tile`] - RGBA pixel buffers with clipped copy in and out
//! - [`Document`] - Canvas, pixel-grid setting, and reference images
//! - [`commands`] - `PutTile`, `EnlargeCanvas`, `ShrinkCanvasWidth`,
//!   `ShrinkCanvasHeight`, `ResizePixelGrid`
//! - [`Editor`] - Registers the commands once and exposes undo/redo
//!
//! # Example
//!
//! ```
//! use pxed_canvas::{Editor, Grid, Loc, Rgba, Size, Tile};
//!
//! let mut editor = Editor::default();
//! editor
//!     .put_tile(Tile::filled(Size::new(2, 2), Rgba::new(255, 0, 0, 255)), Loc::new(4, 4))
//!     .unwrap();
//! editor.resize_pixel_grid(Grid::new(16, 16).unwrap()).unwrap();
//! editor.resize_pixel_grid(Grid::new(8, 8).unwrap()).unwrap();
//!
//! // The two grid changes are one undo step.
//! editor.undo().unwrap();
//! assert_eq!(editor.document().grid, Grid::default());
//! editor.undo().unwrap();
//! assert_eq!(editor.document().canvas.pixel(Loc::new(4, 4)), Some(Rgba::TRANSPARENT));
//! assert!(!editor.can_undo());
//! ```

pub mod canvas;
pub mod commands;
pub mod document;
pub mod editor;
pub mod geometry;

pub use canvas::{Canvas, Rgba, Tile};
pub use document::{Document, Reference};
pub use editor::Editor;
pub use geometry::{Grid, Loc, Rect, Size};
