// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer device-pixel geometry.
//!
//! Hosts describe surfaces and clips in whole device pixels, so the adapter
//! keeps them as integers and only converts to [`kurbo`] floating-point types
//! at the edges where a transform or a raster primitive needs them.

use core::fmt;

/// A size in device pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl IntSize {
    /// A zero-area size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a size from a width and height.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Converts to a [`kurbo::Size`].
    #[inline]
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::Size {
        kurbo::Size::new(f64::from(self.width), f64::from(self.height))
    }
}

impl fmt::Debug for IntSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned rectangle in device pixels.
///
/// The origin may be negative (a clip that starts above or left of the
/// containing space); the extent never is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl IntRect {
    /// Creates a rectangle from its origin and extent.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size anchored at the origin.
    #[inline]
    #[must_use]
    pub const fn from_size(size: IntSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Returns the top-left corner as `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn origin(self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Returns the extent of the rectangle.
    #[inline]
    #[must_use]
    pub const fn size(self) -> IntSize {
        IntSize::new(self.width, self.height)
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.size().is_empty()
    }

    /// Converts to a [`kurbo::Rect`].
    #[inline]
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::Rect {
        let x0 = f64::from(self.x);
        let y0 = f64::from(self.y);
        kurbo::Rect::new(
            x0,
            y0,
            x0 + f64::from(self.width),
            y0 + f64::from(self.height),
        )
    }
}

impl fmt::Debug for IntRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IntRect({}, {} {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_size_is_anchored_at_origin() {
        let r = IntRect::from_size(IntSize::new(100, 50));
        assert_eq!(r.origin(), (0, 0));
        assert_eq!(r.size(), IntSize::new(100, 50));
    }

    #[test]
    fn empty_when_either_dimension_is_zero() {
        assert!(IntSize::new(0, 10).is_empty());
        assert!(IntSize::new(10, 0).is_empty());
        assert!(!IntSize::new(1, 1).is_empty());
        assert!(IntRect::new(5, 5, 0, 3).is_empty());
    }

    #[test]
    fn kurbo_rect_keeps_negative_origin() {
        let r = IntRect::new(-10, 20, 30, 40).to_kurbo();
        assert_eq!(r, kurbo::Rect::new(-10.0, 20.0, 20.0, 60.0));
    }
}
