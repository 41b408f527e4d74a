// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-composite handle a compositing engine draws through.
//!
//! While a demand draw is running the surface is mutably borrowed by the
//! host's call, so the engine cannot reach it. Instead each client callback
//! receives a [`FrameOutput`] that borrows exactly the pieces of the surface
//! the current backend needs: the GPU context and the did-swap flag for a
//! hardware draw, or a [`SoftwareOutputDevice`] for a software draw.
//!
//! Requests that change surface state, such as
//! [`set_needs_begin_frame`](FrameOutput::set_needs_begin_frame), are queued
//! on the handle and applied by the surface once the pass has returned.

use std::fmt;

use tether_core::geometry::IntSize;
use tether_core::gpu::GpuContext;
use tether_core::latency::LatencyInfo;
use tether_core::routing::RoutingId;

use crate::software::SoftwareOutputDevice;

/// Which backend an output surface is currently set up for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// No GPU context exists and no software draw is running.
    #[default]
    Uninitialized,
    /// A GPU context exists; hardware demand draws are allowed.
    Hardware,
    /// A software demand draw is running.
    SoftwareInFlight,
}

enum Target<'a> {
    Hardware {
        context: &'a mut (dyn GpuContext + Send),
        did_swap: &'a mut bool,
    },
    Software(SoftwareOutputDevice<'a>),
}

/// Backend access for one composite pass.
pub struct FrameOutput<'a> {
    routing_id: RoutingId,
    target: Target<'a>,
    begin_frame_request: Option<bool>,
}

impl fmt::Debug for FrameOutput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameOutput")
            .field("routing_id", &self.routing_id)
            .field("mode", &self.mode())
            .field("begin_frame_request", &self.begin_frame_request)
            .finish_non_exhaustive()
    }
}

impl<'a> FrameOutput<'a> {
    pub(crate) fn hardware(
        routing_id: RoutingId,
        context: &'a mut (dyn GpuContext + Send),
        did_swap: &'a mut bool,
    ) -> Self {
        Self {
            routing_id,
            target: Target::Hardware { context, did_swap },
            begin_frame_request: None,
        }
    }

    pub(crate) fn software(routing_id: RoutingId, device: SoftwareOutputDevice<'a>) -> Self {
        Self {
            routing_id,
            target: Target::Software(device),
            begin_frame_request: None,
        }
    }

    /// Marks the frame as presented.
    ///
    /// On the hardware path this flushes the GPU context and records the swap,
    /// which becomes the return value of the running hardware demand draw.
    /// Nothing is put on screen here; presentation happens when the host's
    /// draw call returns. On the software path there is no context to flush
    /// and the call is ignored.
    pub fn swap_buffers(&mut self, latency: &LatencyInfo) {
        match &mut self.target {
            Target::Hardware { context, did_swap } => {
                context.shallow_flush();
                **did_swap = true;
                tracing::trace!(
                    routing_id = ?self.routing_id,
                    sequence = latency.sequence,
                    "swap buffers",
                );
            }
            Target::Software(_) => {
                tracing::trace!(
                    routing_id = ?self.routing_id,
                    sequence = latency.sequence,
                    "swap buffers ignored on the software path",
                );
            }
        }
    }

    /// Asks the surface to start or stop issuing begin-frames.
    ///
    /// The request takes effect after this pass: the delegate hears about it
    /// when the demand draw returns, and the next demand draw is the first to
    /// follow it. If the engine asks more than once in a pass, the last
    /// request wins.
    pub fn set_needs_begin_frame(&mut self, enable: bool) {
        tracing::trace!(routing_id = ?self.routing_id, enable, "begin-frame request queued");
        self.begin_frame_request = Some(enable);
    }

    /// Ignored, like [`SynchronousOutputSurface::reshape`]. The surface size
    /// comes from the host's demand draws.
    ///
    /// [`SynchronousOutputSurface::reshape`]: crate::SynchronousOutputSurface::reshape
    pub fn reshape(&mut self, size: IntSize, scale_factor: f64) {
        tracing::trace!(
            routing_id = ?self.routing_id,
            ?size,
            scale_factor,
            "reshape ignored; size comes from demand draws",
        );
    }

    /// Returns the software device when this pass is a software draw.
    pub fn software_device(&mut self) -> Option<&mut SoftwareOutputDevice<'a>> {
        match &mut self.target {
            Target::Software(device) => Some(device),
            Target::Hardware { .. } => None,
        }
    }

    /// Returns the backend this pass draws through.
    #[must_use]
    pub fn mode(&self) -> DrawMode {
        match self.target {
            Target::Hardware { .. } => DrawMode::Hardware,
            Target::Software(_) => DrawMode::SoftwareInFlight,
        }
    }

    /// Returns `true` while the host canvas of a software draw is still
    /// available to paint into.
    ///
    /// An engine checks this to decide whether it must raster through the
    /// software device instead of assuming a GPU.
    #[must_use]
    pub fn forced_draw_to_software_device(&self) -> bool {
        match &self.target {
            Target::Software(device) => device.canvas_in_flight(),
            Target::Hardware { .. } => false,
        }
    }

    pub(crate) fn take_begin_frame_request(&mut self) -> Option<bool> {
        self.begin_frame_request.take()
    }

    pub(crate) fn into_software_device(self) -> Option<SoftwareOutputDevice<'a>> {
        match self.target {
            Target::Software(device) => Some(device),
            Target::Hardware { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::SoftwareFrameData;
    use crate::testing::{RecordingCanvas, RecordingContext};
    use tether_core::canvas::NullCanvas;

    #[test]
    fn hardware_swap_flushes_and_records() {
        let (mut context, state) = RecordingContext::new();
        let mut did_swap = false;
        {
            let mut output = FrameOutput::hardware(RoutingId(3), &mut context, &mut did_swap);
            assert_eq!(output.mode(), DrawMode::Hardware);
            assert!(output.software_device().is_none());
            assert!(!output.forced_draw_to_software_device());
            output.swap_buffers(&LatencyInfo::new(1));
        }
        assert!(did_swap);
        assert_eq!(state.lock().flushes, 1);
    }

    #[test]
    fn software_swap_is_ignored() {
        let mut host = RecordingCanvas::new(IntSize::new(4, 4));
        let mut null = NullCanvas::new();
        let device = SoftwareOutputDevice::new(&mut host, &mut null, RoutingId(3));
        let mut output = FrameOutput::software(RoutingId(3), device);
        output.swap_buffers(&LatencyInfo::new(9));
        assert_eq!(output.mode(), DrawMode::SoftwareInFlight);
        assert!(output.forced_draw_to_software_device());
    }

    #[test]
    fn forced_draw_ends_with_paint() {
        let mut host = RecordingCanvas::new(IntSize::new(4, 4));
        let mut null = NullCanvas::new();
        let device = SoftwareOutputDevice::new(&mut host, &mut null, RoutingId(3));
        let mut output = FrameOutput::software(RoutingId(3), device);
        output
            .software_device()
            .expect("software pass has a device")
            .end_paint(&SoftwareFrameData::default());
        assert!(!output.forced_draw_to_software_device());
        assert_eq!(output.mode(), DrawMode::SoftwareInFlight);
    }

    #[test]
    fn last_begin_frame_request_wins() {
        let (mut context, _) = RecordingContext::new();
        let mut did_swap = false;
        let mut output = FrameOutput::hardware(RoutingId(3), &mut context, &mut did_swap);
        assert_eq!(output.take_begin_frame_request(), None);
        output.set_needs_begin_frame(true);
        output.set_needs_begin_frame(false);
        assert_eq!(output.take_begin_frame_request(), Some(false));
        assert_eq!(output.take_begin_frame_request(), None);
    }
}
