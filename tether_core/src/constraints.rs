// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-call draw constraints.
//!
//! A host transform is expressed relative to the containing coordinate space
//! (typically the screen), and so is the clip. The compositing engine draws
//! relative to the clip's origin instead. [`adjust_transform_for_clip`] is the
//! one place that bridges the two; both the hardware and the software draw
//! paths go through [`DrawConstraints::new`] so the arithmetic cannot drift
//! between them.

use crate::geometry::{IntRect, IntSize};
use crate::transform::Transform3d;

/// Geometry the host imposes on one demand-draw call.
///
/// Built fresh for every call and never persisted across calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawConstraints {
    /// Size of the target surface in device pixels.
    pub surface_size: IntSize,
    /// Host transform adjusted into draw space.
    pub transform: Transform3d,
    /// Clip rectangle in the host's containing space.
    pub clip: IntRect,
}

impl DrawConstraints {
    /// Builds constraints from host input, adjusting `host_transform` into
    /// draw space for `clip`.
    #[must_use]
    pub fn new(surface_size: IntSize, host_transform: &Transform3d, clip: IntRect) -> Self {
        Self {
            surface_size,
            transform: adjust_transform_for_clip(host_transform, clip),
            clip,
        }
    }

    /// Returns the damage rectangle for a full redraw of the clip, in draw
    /// space (anchored at the origin).
    #[inline]
    #[must_use]
    pub const fn full_damage(&self) -> IntRect {
        IntRect::from_size(self.clip.size())
    }
}

/// Moves a host transform into draw space.
///
/// The host transform goes from the containing space to the clip's origin;
/// the compositing engine's draw origin *is* the clip origin, so the result
/// is the host transform followed by a translation of `(-clip.x, -clip.y)`.
#[must_use]
pub fn adjust_transform_for_clip(transform: &Transform3d, clip: IntRect) -> Transform3d {
    transform.post_translate(-f64::from(clip.x), -f64::from(clip.y), 0.0)
}
