//! Page-space rectangles and the conversions the controller needs.
//!
//! `RectBox` is a plain value. `TrackedBox` wraps a live `RectSource` and
//! caches the last rectangle it read until it is invalidated or re-synced.

use crate::angle::vector_angle;
use glam::DVec2;
use std::cell::Cell;

/// `(x, y)` in page space or in a box-relative space, Y growing downward.
pub type Point = DVec2;

/// Axis-aligned rectangle in page space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A child region given relative to `parent`, expressed in the parent's
    /// page space.
    pub fn from_parent(parent: &RectBox, local: RectBox) -> Self {
        Self {
            x: parent.x + local.x,
            y: parent.y + local.y,
            ..local
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }
    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center in box-relative coordinates.
    #[inline]
    pub fn local_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive on all four edges.
    pub fn contains_point(&self, point: Point) -> bool {
        (self.left()..=self.right()).contains(&point.x)
            && (self.top()..=self.bottom()).contains(&point.y)
    }

    #[inline]
    pub fn relative_to(&self, absolute: Point) -> Point {
        Point::new(absolute.x - self.x, absolute.y - self.y)
    }
}

/// Angle from `origin` to `point`, both in the same Y-down space.
#[inline]
pub fn angle_between(origin: Point, point: Point) -> f64 {
    vector_angle(point.x - origin.x, origin.y - point.y)
}

/// Something that can report its current page-space rectangle.
pub trait RectSource {
    fn page_rect(&self) -> RectBox;
}

impl RectSource for RectBox {
    fn page_rect(&self) -> RectBox {
        *self
    }
}

impl<F> RectSource for F
where
    F: Fn() -> RectBox,
{
    fn page_rect(&self) -> RectBox {
        self()
    }
}

/// Region whose page-space rectangle is re-derived lazily from its source.
pub struct TrackedBox {
    source: Box<dyn RectSource>,
    cached: Cell<Option<RectBox>>,
}

impl TrackedBox {
    pub fn new(source: impl RectSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cached: Cell::new(None),
        }
    }

    /// Current rectangle; reads the source only when nothing is cached.
    pub fn rect(&self) -> RectBox {
        match self.cached.get() {
            Some(rect) => rect,
            None => self.resync(),
        }
    }

    /// Drop the cached rectangle so the next read goes to the source.
    pub fn invalidate(&self) {
        self.cached.set(None);
    }

    /// Read the source now and cache the result.
    pub fn resync(&self) -> RectBox {
        let rect = self.source.page_rect();
        log::trace!(
            "[layout] region at ({:.1},{:.1}) {:.1}x{:.1}",
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        self.cached.set(Some(rect));
        rect
    }

    /// Angle of a page-space point around the region's center.
    pub fn angle_of(&self, page_point: Point) -> f64 {
        let rect = self.rect();
        angle_between(rect.local_center(), rect.relative_to(page_point))
    }
}
