// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for demand draws.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! output surface calls at each stage of a demand draw. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::geometry::{IntRect, IntSize};
use crate::routing::RoutingId;
use crate::time::{Duration, HostTime};
use crate::transform::Transform3d;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which backend a demand draw used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawPath {
    /// GPU-accelerated draw into the host's current framebuffer.
    Hardware,
    /// Raster draw into a host-supplied canvas.
    Software,
}

/// Surface lifecycle transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    /// A compositing-engine client was bound.
    Bound,
    /// A GPU context was created for hardware draws.
    HwDrawInitialized,
    /// The host released the GPU context.
    HwDrawReleased,
    /// The GPU context reported loss after a hardware draw.
    GpuContextLost,
    /// The surface was destroyed.
    Destroyed,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a demand draw starts, after constraints are computed.
#[derive(Clone, Copy, Debug)]
pub struct DemandDrawEvent {
    /// Surface the draw targets.
    pub routing_id: RoutingId,
    /// Draw backend.
    pub path: DrawPath,
    /// Surface size pushed to the client.
    pub surface_size: IntSize,
    /// Clip pushed to the client.
    pub clip: IntRect,
    /// Draw-space transform pushed to the client.
    pub transform: Transform3d,
    /// Host time at the start of the call.
    pub timestamp: HostTime,
}

/// Emitted for every composite trigger.
#[derive(Clone, Copy, Debug)]
pub struct CompositeEvent {
    /// Surface the composite targets.
    pub routing_id: RoutingId,
    /// Damage marked for redraw.
    pub damage: IntRect,
    /// Frame time of the begin-frame notification, if one was issued.
    pub begin_frame: Option<HostTime>,
    /// Host time when the composite pass finished.
    pub timestamp: HostTime,
}

/// Emitted when a demand draw returns to the host.
#[derive(Clone, Copy, Debug)]
pub struct DrawResultEvent {
    /// Surface the draw targeted.
    pub routing_id: RoutingId,
    /// Draw backend.
    pub path: DrawPath,
    /// Value returned to the host.
    pub completed: bool,
    /// Host time when the call returned.
    pub timestamp: HostTime,
    /// Time spent inside the call.
    pub elapsed: Duration,
}

/// Emitted when the compositing engine toggles continuous invalidation.
#[derive(Clone, Copy, Debug)]
pub struct BeginFrameRequestEvent {
    /// Surface whose request changed.
    pub routing_id: RoutingId,
    /// Whether begin-frames are now requested.
    pub enabled: bool,
    /// Host time of the change.
    pub timestamp: HostTime,
}

/// Emitted on surface lifecycle transitions.
#[derive(Clone, Copy, Debug)]
pub struct LifecycleEvent {
    /// Surface that changed.
    pub routing_id: RoutingId,
    /// What happened.
    pub kind: LifecycleKind,
    /// Host time of the transition.
    pub timestamp: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from an output surface.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a demand draw starts.
    fn on_demand_draw(&mut self, e: &DemandDrawEvent) {
        _ = e;
    }

    /// Called for every composite trigger.
    fn on_composite(&mut self, e: &CompositeEvent) {
        _ = e;
    }

    /// Called when a demand draw returns.
    fn on_draw_result(&mut self, e: &DrawResultEvent) {
        _ = e;
    }

    /// Called when continuous invalidation is toggled.
    fn on_begin_frame_request(&mut self, e: &BeginFrameRequestEvent) {
        _ = e;
    }

    /// Called on lifecycle transitions.
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self::from_option(Some(sink))
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::from_option(None)
    }

    /// Creates a tracer from an optional sink.
    #[inline]
    #[must_use]
    pub fn from_option(sink: Option<&'a mut dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`DemandDrawEvent`].
    #[inline]
    pub fn demand_draw(&mut self, e: &DemandDrawEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_demand_draw(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CompositeEvent`].
    #[inline]
    pub fn composite(&mut self, e: &CompositeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_composite(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DrawResultEvent`].
    #[inline]
    pub fn draw_result(&mut self, e: &DrawResultEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_draw_result(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BeginFrameRequestEvent`].
    #[inline]
    pub fn begin_frame_request(&mut self, e: &BeginFrameRequestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_begin_frame_request(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LifecycleEvent`].
    #[inline]
    pub fn lifecycle(&mut self, e: &LifecycleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lifecycle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draw() -> DemandDrawEvent {
        DemandDrawEvent {
            routing_id: RoutingId(3),
            path: DrawPath::Software,
            surface_size: IntSize::new(320, 240),
            clip: IntRect::new(10, 20, 100, 50),
            transform: Transform3d::from_translation(-10.0, -20.0, 0.0),
            timestamp: HostTime(1_000),
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_demand_draw(&sample_draw());
        sink.on_lifecycle(&LifecycleEvent {
            routing_id: RoutingId(3),
            kind: LifecycleKind::Destroyed,
            timestamp: HostTime(0),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.demand_draw(&sample_draw());
        tracer.begin_frame_request(&BeginFrameRequestEvent {
            routing_id: RoutingId(3),
            enabled: true,
            timestamp: HostTime(0),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            results: Vec<bool>,
        }
        impl TraceSink for RecordingSink {
            fn on_draw_result(&mut self, e: &DrawResultEvent) {
                self.results.push(e.completed);
            }
        }

        let mut sink = RecordingSink {
            results: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.draw_result(&DrawResultEvent {
            routing_id: RoutingId(3),
            path: DrawPath::Hardware,
            completed: true,
            timestamp: HostTime(2_000),
            elapsed: Duration(1_000),
        });
        drop(tracer);
        assert_eq!(sink.results, &[true]);
    }
}
