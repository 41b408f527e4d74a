// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Canvas`] backed by a `tiny-skia` pixmap.

use kurbo::Affine;
use tether_core::canvas::{Canvas, Rgba8};
use tether_core::geometry::{IntRect, IntSize};
use tiny_skia::{FillRule, Mask, Paint, PathBuilder, Pixmap, Rect, Transform};

/// Host-side raster target: a pixmap plus the clip and matrix the host's
/// view hierarchy would have set before handing the canvas over.
pub(crate) struct PixmapCanvas {
    pixmap: Pixmap,
    clip: IntRect,
    matrix: Affine,
    clip_mask: Option<Mask>,
}

impl PixmapCanvas {
    pub(crate) fn new(size: IntSize) -> Option<Self> {
        let pixmap = Pixmap::new(size.width, size.height)?;
        Some(Self {
            pixmap,
            clip: IntRect::from_size(size),
            matrix: Affine::IDENTITY,
            clip_mask: None,
        })
    }

    /// Restricts painting to `clip` (device pixels).
    pub(crate) fn set_clip(&mut self, clip: IntRect) {
        self.clip = clip;
        self.clip_mask = clip_mask(&self.pixmap, clip);
    }

    pub(crate) fn set_matrix(&mut self, matrix: Affine) {
        self.matrix = matrix;
    }

    pub(crate) fn clear(&mut self, color: Rgba8) {
        self.pixmap.fill(tiny_skia::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

fn clip_mask(pixmap: &Pixmap, clip: IntRect) -> Option<Mask> {
    let rect = Rect::from_xywh(
        clip.x as f32,
        clip.y as f32,
        clip.width as f32,
        clip.height as f32,
    )?;
    let mut mask = Mask::new(pixmap.width(), pixmap.height())?;
    mask.fill_path(
        &PathBuilder::from_rect(rect),
        FillRule::Winding,
        false,
        Transform::identity(),
    );
    Some(mask)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "tiny-skia works in f32; host matrices fit comfortably"
)]
fn to_skia(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

impl Canvas for PixmapCanvas {
    fn device_clip_bounds(&self) -> IntRect {
        self.clip
    }

    fn total_matrix(&self) -> Affine {
        self.matrix
    }

    fn device_size(&self) -> IntSize {
        IntSize::new(self.pixmap.width(), self.pixmap.height())
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "tiny-skia works in f32; local rects fit comfortably"
    )]
    fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8) {
        let Some(rect) = Rect::from_ltrb(
            rect.x0 as f32,
            rect.y0 as f32,
            rect.x1 as f32,
            rect.y1 as f32,
        ) else {
            tracing::debug!(?rect, "skipping degenerate fill");
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = false;
        self.pixmap.fill_rect(
            rect,
            &paint,
            to_skia(self.matrix),
            self.clip_mask.as_ref(),
        );
    }
}
