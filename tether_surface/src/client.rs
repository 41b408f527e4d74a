// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compositing engine's side of the output-surface contract.

use tether_core::geometry::IntRect;
use tether_core::time::HostTime;
use tether_core::transform::Transform3d;

use crate::output::FrameOutput;

/// What an output surface can do, as advertised to its client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutputSurfaceCapabilities {
    /// The GPU context is created after binding, on demand, instead of being
    /// available at bind time.
    pub deferred_gl_initialization: bool,
}

/// Callbacks a compositing engine receives from an output surface.
///
/// During a demand draw the surface pushes constraints first, then marks
/// damage, then (only if the engine asked for continuous invalidation)
/// issues a begin-frame. The engine paints or swaps through the
/// [`FrameOutput`] it is handed; that handle is only valid for the current
/// composite pass.
///
/// ```rust,ignore
/// impl OutputSurfaceClient for Engine {
///     fn set_needs_redraw_rect(&mut self, damage: IntRect, output: &mut FrameOutput<'_>) {
///         if let Some(device) = output.software_device() {
///             let canvas = device.begin_paint(damage);
///             self.raster_into(canvas);
///             device.end_paint(&frame_data);
///         } else {
///             self.issue_gl_draws();
///             output.swap_buffers(&latency);
///         }
///     }
///     // ...
/// }
/// ```
pub trait OutputSurfaceClient {
    /// Sets the transform and clip the next frame must be drawn with.
    ///
    /// `transform` is already in draw space: relative to the clip's origin.
    fn set_external_draw_constraints(&mut self, transform: &Transform3d, clip: IntRect);

    /// Requests a redraw of `damage` (in draw space).
    fn set_needs_redraw_rect(&mut self, damage: IntRect, output: &mut FrameOutput<'_>);

    /// Delivers a begin-frame tick while continuous invalidation is on.
    fn begin_frame(&mut self, frame_time: HostTime, output: &mut FrameOutput<'_>);
}
