#![forbid(unsafe_code)]

//! Reversible edits of a [`Document`].
//!
//! Each type here is a [`Command`] over [`Document`]. Records own exactly the
//! pixels or values needed to reverse one `exec` and nothing more, so a full
//! history of 60 tile edits costs roughly 60 tiles.
//!
//! | Command              | Args             | Record                    | Merges |
//! |----------------------|------------------|---------------------------|--------|
//! | [`PutTile`]          | `(Tile, Loc)`    | pixels underneath, `Loc`  | no     |
//! | [`EnlargeCanvas`]    | `(dx, dy)`       | `(dx, dy)`                | no     |
//! | [`ShrinkCanvasWidth`]  | `delta`        | `delta`, removed strip    | no     |
//! | [`ShrinkCanvasHeight`] | `delta`        | `delta`, removed strip    | no     |
//! | [`ResizePixelGrid`]  | `Grid`           | previous `Grid`           | yes    |

use pxed_history::{Command, CommandError, CommandResult};

use crate::canvas::Tile;
use crate::document::Document;
use crate::geometry::{Grid, Loc, MAX_DIMENSION, Size, coord};

/// Overwrite a block of canvas pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct PutTile;

/// Pixels a [`PutTile`] replaced, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Underneath {
    pub tile: Tile,
    pub loc: Loc,
}

impl Command<Document> for PutTile {
    type Args = (Tile, Loc);
    type Record = Underneath;

    fn exec(&self, doc: &mut Document, (tile, loc): &(Tile, Loc)) -> CommandResult<Underneath> {
        let old = doc.canvas.take_tile(*loc, tile.size());
        doc.canvas.put_tile(tile, *loc);
        Ok(Underneath {
            tile: old,
            loc: *loc,
        })
    }

    fn discard(&self, doc: &mut Document, record: &Underneath) -> CommandResult {
        doc.canvas.put_tile(&record.tile, record.loc);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "put_tile"
    }
}

/// Grow the canvas to the right and bottom.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnlargeCanvas;

impl Command<Document> for EnlargeCanvas {
    type Args = (u32, u32);
    type Record = (u32, u32);

    fn exec(&self, doc: &mut Document, &(dx, dy): &(u32, u32)) -> CommandResult<(u32, u32)> {
        let Size { width, height } = doc.canvas.size();
        let grown = |what: &'static str, from: u32, by: u32| {
            from.checked_add(by)
                .filter(|&to| to <= MAX_DIMENSION)
                .ok_or(CommandError::OutOfBounds {
                    what,
                    value: u64::from(from) + u64::from(by),
                    limit: u64::from(MAX_DIMENSION),
                })
        };
        let width = grown("canvas width", width, dx)?;
        let height = grown("canvas height", height, dy)?;
        doc.canvas.resize_with_content(Size::new(width, height));
        Ok((dx, dy))
    }

    fn discard(&self, doc: &mut Document, &(dx, dy): &(u32, u32)) -> CommandResult {
        let Size { width, height } = doc.canvas.size();
        doc.canvas.resize_with_content(Size::new(
            width.saturating_sub(dx),
            height.saturating_sub(dy),
        ));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "enlarge_canvas"
    }
}

/// Pixels removed by a shrink, kept so the shrink can be reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedStrip {
    pub delta: u32,
    pub strip: Tile,
}

/// Cut columns off the right edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShrinkCanvasWidth;

impl Command<Document> for ShrinkCanvasWidth {
    type Args = u32;
    type Record = RemovedStrip;

    fn exec(&self, doc: &mut Document, &delta: &u32) -> CommandResult<RemovedStrip> {
        let Size { width, height } = doc.canvas.size();
        if delta > width {
            return Err(CommandError::OutOfBounds {
                what: "shrink width",
                value: u64::from(delta),
                limit: u64::from(width),
            });
        }
        let keep = width - delta;
        let strip = doc
            .canvas
            .take_tile(Loc::new(coord(keep), 0), Size::new(delta, height));
        doc.canvas.resize_with_content(Size::new(keep, height));
        Ok(RemovedStrip { delta, strip })
    }

    fn discard(&self, doc: &mut Document, record: &RemovedStrip) -> CommandResult {
        let Size { width, height } = doc.canvas.size();
        doc.canvas
            .resize_with_content(Size::new(width + record.delta, height));
        doc.canvas.put_tile(&record.strip, Loc::new(coord(width), 0));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "shrink_canvas_width"
    }
}

/// Cut rows off the bottom edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShrinkCanvasHeight;

impl Command<Document> for ShrinkCanvasHeight {
    type Args = u32;
    type Record = RemovedStrip;

    fn exec(&self, doc: &mut Document, &delta: &u32) -> CommandResult<RemovedStrip> {
        let Size { width, height } = doc.canvas.size();
        if delta > height {
            return Err(CommandError::OutOfBounds {
                what: "shrink height",
                value: u64::from(delta),
                limit: u64::from(height),
            });
        }
        let keep = height - delta;
        let strip = doc
            .canvas
            .take_tile(Loc::new(0, coord(keep)), Size::new(width, delta));
        doc.canvas.resize_with_content(Size::new(width, keep));
        Ok(RemovedStrip { delta, strip })
    }

    fn discard(&self, doc: &mut Document, record: &RemovedStrip) -> CommandResult {
        let Size { width, height } = doc.canvas.size();
        doc.canvas
            .resize_with_content(Size::new(width, height + record.delta));
        doc.canvas.put_tile(&record.strip, Loc::new(0, coord(height)));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "shrink_canvas_height"
    }
}

/// Change the pixel-grid overlay. Consecutive changes (a slider drag)
/// collapse into one history entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizePixelGrid;

impl Command<Document> for ResizePixelGrid {
    type Args = Grid;
    type Record = Grid;

    fn exec(&self, doc: &mut Document, grid: &Grid) -> CommandResult<Grid> {
        Ok(std::mem::replace(&mut doc.grid, *grid))
    }

    fn discard(&self, doc: &mut Document, previous: &Grid) -> CommandResult {
        doc.grid = *previous;
        Ok(())
    }

    fn mergeable(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "resize_pixel_grid"
    }
}
