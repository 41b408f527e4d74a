// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster targets for software draws.
//!
//! A host that wants a software-composited frame hands the adapter a
//! [`Canvas`]. The adapter reads the canvas's device clip, total matrix, and
//! device size to build draw constraints; the compositing engine paints into
//! it through the software output device.

use core::fmt;

use kurbo::Affine;

use crate::geometry::{IntRect, IntSize};

/// A non-premultiplied 8-bit RGBA color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Creates a color from its components.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Debug for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// A host-owned raster surface with a device clip and a current matrix.
///
/// Implementations are borrowed for the duration of a single software
/// demand-draw call.
pub trait Canvas {
    /// Bounds of the current clip in device pixels.
    fn device_clip_bounds(&self) -> IntRect;

    /// The canvas's total (current) matrix in its native 2-D form.
    fn total_matrix(&self) -> Affine;

    /// Size of the backing device in pixels.
    fn device_size(&self) -> IntSize;

    /// Fills `rect` (in local coordinates, mapped through the total matrix
    /// and clipped to the device clip) with `color`.
    fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8);
}

/// A 1×1 canvas that accepts and discards every paint.
///
/// Used when a compositing engine paints without a host canvas in flight, so
/// the paint degrades to a discarded draw instead of a crash.
#[derive(Clone, Debug, Default)]
pub struct NullCanvas {
    discarded: u64,
}

impl NullCanvas {
    /// Creates a null canvas.
    #[must_use]
    pub const fn new() -> Self {
        Self { discarded: 0 }
    }

    /// Number of paints this canvas has swallowed.
    #[must_use]
    pub const fn discarded_paints(&self) -> u64 {
        self.discarded
    }
}

impl Canvas for NullCanvas {
    fn device_clip_bounds(&self) -> IntRect {
        IntRect::new(0, 0, 1, 1)
    }

    fn total_matrix(&self) -> Affine {
        Affine::IDENTITY
    }

    fn device_size(&self) -> IntSize {
        IntSize::new(1, 1)
    }

    fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8) {
        _ = (rect, color);
        self.discarded += 1;
    }
}
