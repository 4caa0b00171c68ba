#![forbid(unsafe_code)]

//! Pixel coordinates, extents, and the pixel-grid setting.
//!
//! Coordinate arithmetic saturates at the `i32` range. A saturated location
//! lies outside every canvas, so reads there are transparent and writes are
//! clipped, exactly as for any other off-canvas location.

use std::fmt;
use std::num::NonZeroU32;

use pxed_history::CommandError;

/// Largest canvas dimension whose every pixel is addressable by a [`Loc`].
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// `extent` as a coordinate offset, saturating at `i32::MAX`.
pub(crate) fn coord(extent: u32) -> i32 {
    i32::try_from(extent).unwrap_or(i32::MAX)
}

/// A pixel location. May lie outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Loc {
    pub x: i32,
    pub y: i32,
}

impl Loc {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shifted location, saturating at the `i32` range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle, `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub min: Loc,
    pub max: Loc,
}

impl Rect {
    #[must_use]
    pub const fn new(min: Loc, max: Loc) -> Self {
        Self { min, max }
    }

    /// Rectangle of `size` at `origin`; `max` saturates at the `i32` range.
    #[must_use]
    pub fn from_origin(origin: Loc, size: Size) -> Self {
        Self {
            min: origin,
            max: origin.offset(coord(size.width), coord(size.height)),
        }
    }

    /// Extent of the rectangle; inverted rectangles are empty.
    #[must_use]
    pub fn size(&self) -> Size {
        let extent = |lo: i32, hi: i32| {
            u32::try_from((i64::from(hi) - i64::from(lo)).max(0)).unwrap_or(u32::MAX)
        };
        Size::new(
            extent(self.min.x, self.max.x),
            extent(self.min.y, self.max.y),
        )
    }

    /// Whether `other` lies entirely within `self`.
    #[must_use]
    pub fn contains(&self, other: Rect) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

const DEFAULT_CELL: NonZeroU32 = match NonZeroU32::new(32) {
    Some(cell) => cell,
    None => NonZeroU32::MIN,
};

/// Size of one cell of the pixel grid overlay. Both sides are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: DEFAULT_CELL,
            height: DEFAULT_CELL,
        }
    }
}

impl Grid {
    /// A grid with positive cell dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, CommandError> {
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(CommandError::InvalidArgument(format!(
                "grid cell {width}x{height} must be positive"
            ))),
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width.get()
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height.get()
    }

    /// Pixel location of the top-left corner of grid cell `cell`.
    #[must_use]
    pub fn map_loc(&self, cell: Loc) -> Loc {
        Loc::new(
            cell.x.saturating_mul(coord(self.width())),
            cell.y.saturating_mul(coord(self.height())),
        )
    }

    /// Grid cell containing pixel `loc`.
    #[must_use]
    pub fn unmap_loc(&self, loc: Loc) -> Loc {
        Loc::new(
            loc.x.div_euclid(coord(self.width())),
            loc.y.div_euclid(coord(self.height())),
        )
    }

    /// Snap `loc` down to the corner of its grid cell.
    #[must_use]
    pub fn normalize_loc(&self, loc: Loc) -> Loc {
        self.map_loc(self.unmap_loc(loc))
    }

    #[must_use]
    pub fn is_aligned(&self, loc: Loc) -> bool {
        self.normalize_loc(loc) == loc
    }

    /// Pixel rectangle covered by the cells in `cells`.
    #[must_use]
    pub fn map_rect(&self, cells: Rect) -> Rect {
        Rect::new(self.map_loc(cells.min), self.map_loc(cells.max))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
