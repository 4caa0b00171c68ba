#![forbid(unsafe_code)]

//! RGBA pixel buffers.
//!
//! A [`Tile`] is an owned block of pixels; a [`Canvas`] is the document's
//! drawing surface. Reads outside the canvas yield transparent pixels and
//! writes outside it are clipped, so tiles taken and put back at the same
//! location always round-trip.

use std::fmt;

use crate::geometry::{Loc, Rect, Size};

/// One RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    #[must_use]
    pub const fn alpha(self) -> u8 {
        self.0[3]
    }

    /// Multiply alpha by `opacity / 255`, rounding to nearest.
    #[must_use]
    pub fn with_opacity(self, opacity: u8) -> Self {
        let [r, g, b, a] = self.0;
        let scaled = (u16::from(a) * u16::from(opacity) + 127) / 255;
        Self([r, g, b, scaled as u8])
    }
}

/// An owned rectangular block of pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Tile {
    size: Size,
    pixels: Vec<Rgba>,
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile").field("size", &self.size).finish_non_exhaustive()
    }
}

impl Tile {
    /// A fully transparent tile.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::filled(size, Rgba::TRANSPARENT)
    }

    #[must_use]
    pub fn filled(size: Size, color: Rgba) -> Self {
        Self {
            size,
            pixels: vec![color; size.area()],
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at `loc`, or `None` outside the tile.
    #[must_use]
    pub fn pixel(&self, loc: Loc) -> Option<Rgba> {
        self.index(loc.x.into(), loc.y.into()).map(|i| self.pixels[i])
    }

    /// Set the pixel at `loc`; ignored outside the tile.
    pub fn set_pixel(&mut self, loc: Loc, color: Rgba) {
        if let Some(i) = self.index(loc.x.into(), loc.y.into()) {
            self.pixels[i] = color;
        }
    }

    /// Copy of the pixels under `rect`; transparent where `rect` leaves the
    /// tile.
    #[must_use]
    pub fn crop(&self, rect: Rect) -> Tile {
        self.copy_out(rect.min, rect.size())
    }

    /// Copy of the `size` pixels at `origin`, always exactly `size`.
    fn copy_out(&self, origin: Loc, size: Size) -> Tile {
        let mut out = Tile::new(size);
        for y in 0..size.height {
            for x in 0..size.width {
                let src = self.index(
                    i64::from(origin.x) + i64::from(x),
                    i64::from(origin.y) + i64::from(y),
                );
                if let Some(i) = src {
                    let dst = out.offset_of(x, y);
                    out.pixels[dst] = self.pixels[i];
                }
            }
        }
        out
    }

    /// Copy `tile` onto `self` with its top-left corner at `dest`, replacing
    /// pixels (no blending) and clipping at the edges.
    pub fn blit(&mut self, tile: &Tile, dest: Loc) {
        for y in 0..tile.size.height {
            for x in 0..tile.size.width {
                let dst = self.index(
                    i64::from(dest.x) + i64::from(x),
                    i64::from(dest.y) + i64::from(y),
                );
                if let Some(i) = dst {
                    self.pixels[i] = tile.pixels[tile.offset_of(x, y)];
                }
            }
        }
    }

    /// Scale every pixel's alpha by `opacity / 255`.
    #[must_use]
    pub fn with_opacity(mut self, opacity: u8) -> Self {
        if opacity != u8::MAX {
            for pixel in &mut self.pixels {
                *pixel = pixel.with_opacity(opacity);
            }
        }
        self
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.offset_of(x, y))
    }

    fn offset_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }
}

/// The document's drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    buffer: Tile,
}

impl Canvas {
    /// A transparent canvas.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            buffer: Tile::new(size),
        }
    }

    /// A canvas showing `image`, as when a file is opened.
    #[must_use]
    pub fn from_tile(image: Tile) -> Self {
        Self { buffer: image }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.buffer.size()
    }

    #[must_use]
    pub fn pixel(&self, loc: Loc) -> Option<Rgba> {
        self.buffer.pixel(loc)
    }

    /// Copy the pixels of `size` at `origin`. Pixels off the canvas read
    /// as transparent.
    #[must_use]
    pub fn take_tile(&self, origin: Loc, size: Size) -> Tile {
        self.buffer.copy_out(origin, size)
    }

    /// Overwrite the pixels under `tile` placed at `dest`.
    pub fn put_tile(&mut self, tile: &Tile, dest: Loc) {
        self.buffer.blit(tile, dest);
    }

    /// Change the canvas size, keeping the top-left content. New area is
    /// transparent.
    pub fn resize_with_content(&mut self, size: Size) {
        if size == self.size() {
            return;
        }
        let mut next = Tile::new(size);
        next.blit(&self.buffer, Loc::ZERO);
        self.buffer = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);
    const BLUE: Rgba = Rgba::new(0, 0, 255, 255);

    #[test]
    fn opacity_scales_alpha() {
        assert_eq!(RED.with_opacity(255), RED);
        assert_eq!(RED.with_opacity(0).alpha(), 0);
        assert_eq!(RED.with_opacity(128).alpha(), 128);
        assert_eq!(Rgba::new(1, 2, 3, 100).with_opacity(51).alpha(), 20);
    }

    #[test]
    fn take_at_coordinate_extremes_keeps_size() {
        let canvas = Canvas::from_tile(Tile::filled(Size::new(2, 2), RED));
        let extremes = [
            Loc::new(i32::MAX, 0),
            Loc::new(i32::MIN, i32::MIN),
            Loc::new(0, i32::MAX - 1),
        ];
        for origin in extremes {
            let tile = canvas.take_tile(origin, Size::new(3, 2));
            assert_eq!(tile.size(), Size::new(3, 2));
            assert!(tile.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
        }
    }

    #[test]
    fn put_at_coordinate_extremes_is_clipped() {
        let mut canvas = Canvas::new(Size::new(2, 2));
        let before = canvas.clone();
        canvas.put_tile(&Tile::filled(Size::new(2, 2), BLUE), Loc::new(i32::MAX, i32::MAX));
        canvas.put_tile(&Tile::filled(Size::new(2, 2), BLUE), Loc::new(i32::MIN, 0));
        assert_eq!(canvas, before);
        canvas.put_tile(&Tile::filled(Size::new(2, 2), BLUE), Loc::new(-1, -1));
        assert_eq!(canvas.pixel(Loc::ZERO), Some(BLUE));
        assert_eq!(canvas.pixel(Loc::new(1, 1)), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn take_outside_is_transparent() {
        let canvas = Canvas::from_tile(Tile::filled(Size::new(2, 2), RED));
        let tile = canvas.take_tile(Loc::new(1, 1), Size::new(2, 2));
        assert_eq!(tile.pixel(Loc::new(0, 0)), Some(RED));
        assert_eq!(tile.pixel(Loc::new(1, 0)), Some(Rgba::TRANSPARENT));
        assert_eq!(tile.pixel(Loc::new(1, 1)), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn put_is_clipped() {
        let mut canvas = Canvas::new(Size::new(3, 3));
        canvas.put_tile(&Tile::filled(Size::new(2, 2), BLUE), Loc::new(2, -1));
        assert_eq!(canvas.pixel(Loc::new(2, 0)), Some(BLUE));
        assert_eq!(canvas.pixel(Loc::new(1, 0)), Some(Rgba::TRANSPARENT));
        assert_eq!(canvas.pixel(Loc::new(2, 1)), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn take_then_put_round_trips() {
        let mut canvas = Canvas::from_tile(Tile::filled(Size::new(4, 4), RED));
        let before = canvas.clone();
        let old = canvas.take_tile(Loc::new(2, 2), Size::new(3, 3));
        canvas.put_tile(&Tile::filled(Size::new(3, 3), BLUE), Loc::new(2, 2));
        assert_ne!(canvas, before);
        canvas.put_tile(&old, Loc::new(2, 2));
        assert_eq!(canvas, before);
    }

    #[test]
    fn resize_keeps_top_left() {
        let mut canvas = Canvas::from_tile(Tile::filled(Size::new(2, 2), RED));
        canvas.resize_with_content(Size::new(3, 1));
        assert_eq!(canvas.size(), Size::new(3, 1));
        assert_eq!(canvas.pixel(Loc::new(1, 0)), Some(RED));
        assert_eq!(canvas.pixel(Loc::new(2, 0)), Some(Rgba::TRANSPARENT));
        assert_eq!(canvas.pixel(Loc::new(0, 1)), None);
    }

    #[test]
    fn crop_copies_region() {
        let mut tile = Tile::new(Size::new(3, 3));
        tile.set_pixel(Loc::new(1, 1), BLUE);
        let cropped = tile.crop(Rect::new(Loc::new(1, 1), Loc::new(3, 3)));
        assert_eq!(cropped.size(), Size::new(2, 2));
        assert_eq!(cropped.pixel(Loc::ZERO), Some(BLUE));
    }
}
