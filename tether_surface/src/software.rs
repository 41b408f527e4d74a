// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Software output device backed by a host canvas.
//!
//! For the length of one software demand draw the device lends the host's
//! canvas to the compositing engine. Ending the paint hands the canvas back;
//! the engine has painted straight into host memory, so there is nothing to
//! present afterwards.

use std::fmt;

use tether_core::canvas::{Canvas, NullCanvas};
use tether_core::geometry::{IntRect, IntSize};
use tether_core::routing::RoutingId;

use crate::error::SoftwareDeviceError;

/// Metadata the compositing engine reports when it finishes a software paint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SoftwareFrameData {
    /// Engine-assigned frame id.
    pub id: u64,
    /// Size of the painted frame.
    pub size: IntSize,
    /// Region the engine actually repainted.
    pub damage_rect: IntRect,
}

/// The raster backend a compositing engine paints through during a software
/// demand draw.
pub struct SoftwareOutputDevice<'a> {
    canvas: Option<&'a mut dyn Canvas>,
    null_canvas: &'a mut NullCanvas,
    routing_id: RoutingId,
}

impl fmt::Debug for SoftwareOutputDevice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftwareOutputDevice")
            .field("routing_id", &self.routing_id)
            .field("canvas_in_flight", &self.canvas_in_flight())
            .finish_non_exhaustive()
    }
}

impl<'a> SoftwareOutputDevice<'a> {
    pub(crate) fn new(
        canvas: &'a mut dyn Canvas,
        null_canvas: &'a mut NullCanvas,
        routing_id: RoutingId,
    ) -> Self {
        Self {
            canvas: Some(canvas),
            null_canvas,
            routing_id,
        }
    }

    /// Ignored: the canvas size is dictated by the host on every call.
    pub fn resize(&mut self, size: IntSize) {
        _ = size;
    }

    /// Returns the canvas to paint `damage` into.
    ///
    /// This is the host canvas while it is in flight. After
    /// [`end_paint`](Self::end_paint) it is a 1×1 null canvas, so a stray
    /// paint is discarded rather than landing in host memory.
    pub fn begin_paint(&mut self, damage: IntRect) -> &mut dyn Canvas {
        match self.canvas.as_deref_mut() {
            Some(canvas) => canvas,
            None => {
                tracing::warn!(
                    routing_id = ?self.routing_id,
                    ?damage,
                    "software paint without a host canvas; drawing into the null canvas",
                );
                &mut *self.null_canvas
            }
        }
    }

    /// Finishes the paint and releases the host canvas.
    pub fn end_paint(&mut self, frame_data: &SoftwareFrameData) {
        tracing::trace!(
            routing_id = ?self.routing_id,
            frame = frame_data.id,
            damage = ?frame_data.damage_rect,
            "software paint finished",
        );
        self.canvas = None;
    }

    /// Read-back is not available on the synchronous software path.
    ///
    /// # Errors
    ///
    /// Always returns [`SoftwareDeviceError::Unsupported`].
    pub fn copy_to_bitmap(&mut self, rect: IntRect) -> Result<Vec<u8>, SoftwareDeviceError> {
        _ = rect;
        Err(SoftwareDeviceError::Unsupported)
    }

    /// Returns `true` while the host canvas has not been released.
    #[must_use]
    pub fn canvas_in_flight(&self) -> bool {
        self.canvas.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCanvas;
    use tether_core::canvas::Rgba8;

    #[test]
    fn begin_paint_returns_host_canvas_while_in_flight() {
        let mut host = RecordingCanvas::new(IntSize::new(64, 64));
        let mut null = NullCanvas::new();
        {
            let mut device = SoftwareOutputDevice::new(&mut host, &mut null, RoutingId(1));
            let canvas = device.begin_paint(IntRect::new(0, 0, 64, 64));
            assert_eq!(canvas.device_size(), IntSize::new(64, 64));
            canvas.fill_rect(kurbo::Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::new(1, 2, 3, 255));
        }
        assert_eq!(host.fills.len(), 1);
        assert_eq!(null.discarded_paints(), 0);
    }

    #[test]
    fn end_paint_releases_canvas_and_falls_back_to_null() {
        let mut host = RecordingCanvas::new(IntSize::new(64, 64));
        let mut null = NullCanvas::new();
        {
            let mut device = SoftwareOutputDevice::new(&mut host, &mut null, RoutingId(1));
            device.end_paint(&SoftwareFrameData::default());
            assert!(!device.canvas_in_flight());

            let canvas = device.begin_paint(IntRect::new(0, 0, 1, 1));
            assert_eq!(canvas.device_size(), IntSize::new(1, 1));
            canvas.fill_rect(kurbo::Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::default());
        }
        assert!(host.fills.is_empty(), "no paint may land after end_paint");
        assert_eq!(null.discarded_paints(), 1);
    }

    #[test]
    fn resize_is_ignored() {
        let mut host = RecordingCanvas::new(IntSize::new(10, 10));
        let mut null = NullCanvas::new();
        let mut device = SoftwareOutputDevice::new(&mut host, &mut null, RoutingId(1));
        device.resize(IntSize::new(999, 999));
        assert_eq!(
            device.begin_paint(IntRect::new(0, 0, 1, 1)).device_size(),
            IntSize::new(10, 10)
        );
    }

    #[test]
    fn copy_to_bitmap_is_unsupported() {
        let mut host = RecordingCanvas::new(IntSize::new(10, 10));
        let mut null = NullCanvas::new();
        let mut device = SoftwareOutputDevice::new(&mut host, &mut null, RoutingId(1));
        assert_eq!(
            device.copy_to_bitmap(IntRect::new(0, 0, 10, 10)),
            Err(SoftwareDeviceError::Unsupported)
        );
    }
}
