// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The synchronous output surface.
//!
//! A compositing engine normally schedules its own frames. A
//! [`SynchronousOutputSurface`] inverts that: the embedding host decides when
//! a frame is drawn, into which geometry, and on which backend, and the
//! engine is driven through exactly one composite pass per host call.
//!
//! # Draw sequence
//!
//! Both [`demand_draw_hw`](SynchronousOutputSurface::demand_draw_hw) and
//! [`demand_draw_sw`](SynchronousOutputSurface::demand_draw_sw) run the same
//! steps on the client:
//!
//! 1. `set_external_draw_constraints` with the draw-space transform and clip.
//! 2. `set_needs_redraw_rect` for the full clip.
//! 3. `begin_frame`, only while continuous invalidation is on.
//!
//! Continuous invalidation is the compositing engine's call. It asks through
//! [`FrameOutput::set_needs_begin_frame`] during a pass; the surface applies
//! the request and notifies the delegate once the pass has returned, so the
//! next draw is the first to see it.
//!
//! The hardware draw reports whether the engine swapped; the software draw
//! reports whether the engine released the host canvas.

use std::fmt;
use std::sync::Arc;

use tether_core::canvas::{Canvas, NullCanvas};
use tether_core::constraints::DrawConstraints;
use tether_core::geometry::{IntRect, IntSize};
use tether_core::gpu::{ContextAttributes, GpuContext, GpuPlatform};
use tether_core::routing::RoutingId;
use tether_core::time::HostTime;
use tether_core::trace::{
    BeginFrameRequestEvent, CompositeEvent, DemandDrawEvent, DrawPath, DrawResultEvent,
    LifecycleEvent, LifecycleKind, TraceSink, Tracer,
};
use tether_core::transform::Transform3d;

use crate::client::{OutputSurfaceCapabilities, OutputSurfaceClient};
use crate::delegate::{DelegateRegistry, SurfaceDelegate};
use crate::error::{BindError, InitializeError};
use crate::output::{DrawMode, FrameOutput};
use crate::software::SoftwareOutputDevice;
use crate::thread::ThreadChecker;
use crate::time;

/// Output surface for one view, drawn on demand by the embedding host.
///
/// The surface is confined to one thread. It may be created elsewhere and
/// moved there; the first checked call (or
/// [`with_thread_checker`](Self::with_thread_checker)) fixes the thread, and
/// every public operation afterwards panics if called from anywhere else.
pub struct SynchronousOutputSurface {
    routing_id: RoutingId,
    registry: Arc<DelegateRegistry>,
    thread: ThreadChecker,
    capabilities: OutputSurfaceCapabilities,
    client: Option<Box<dyn OutputSurfaceClient + Send>>,
    platform: Box<dyn GpuPlatform + Send>,
    context: Option<Box<dyn GpuContext + Send>>,
    null_canvas: NullCanvas,
    surface_size: IntSize,
    needs_begin_frame: bool,
    did_swap_buffer: bool,
    software_in_flight: bool,
    trace_sink: Option<Box<dyn TraceSink + Send>>,
}

impl fmt::Debug for SynchronousOutputSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynchronousOutputSurface")
            .field("routing_id", &self.routing_id)
            .field("bound", &self.client.is_some())
            .field("has_gpu_context", &self.context.is_some())
            .field("surface_size", &self.surface_size)
            .field("needs_begin_frame", &self.needs_begin_frame)
            .field("software_in_flight", &self.software_in_flight)
            .finish_non_exhaustive()
    }
}

impl SynchronousOutputSurface {
    /// Creates an unbound surface for the view identified by `routing_id`.
    ///
    /// Notifications go to whatever delegate `registry` holds for
    /// `routing_id` at the time they are sent. `platform` creates the GPU
    /// context on [`initialize_hw_draw`](Self::initialize_hw_draw).
    #[must_use]
    pub fn new(
        routing_id: RoutingId,
        registry: Arc<DelegateRegistry>,
        platform: Box<dyn GpuPlatform + Send>,
    ) -> Self {
        Self {
            routing_id,
            registry,
            thread: ThreadChecker::new(),
            capabilities: OutputSurfaceCapabilities {
                deferred_gl_initialization: true,
            },
            client: None,
            platform,
            context: None,
            null_canvas: NullCanvas::new(),
            surface_size: IntSize::ZERO,
            needs_begin_frame: false,
            did_swap_buffer: false,
            software_in_flight: false,
            trace_sink: None,
        }
    }

    /// Replaces the thread checker, e.g. with one
    /// [bound](ThreadChecker::bound_to) to a known UI thread.
    #[must_use]
    pub fn with_thread_checker(mut self, thread: ThreadChecker) -> Self {
        self.thread = thread;
        self
    }

    /// Installs a sink for frame-level trace events.
    ///
    /// Events are only delivered when the `trace` feature is enabled.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink + Send>) -> Self {
        self.trace_sink = Some(sink);
        self
    }

    /// Attaches the compositing engine and tells the delegate the surface is
    /// ready to be drawn.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::AlreadyBound`] if a client is already attached.
    /// The delegate is not notified in that case.
    pub fn bind_to_client(
        &mut self,
        client: Box<dyn OutputSurfaceClient + Send>,
    ) -> Result<(), BindError> {
        self.thread.check();
        if self.client.is_some() {
            return Err(BindError::AlreadyBound);
        }
        self.client = Some(client);

        tracing::debug!(routing_id = ?self.routing_id, "output surface bound");
        self.trace_lifecycle(LifecycleKind::Bound);
        if let Some(delegate) = self.delegate() {
            delegate.on_surface_bound(self);
        }
        Ok(())
    }

    /// Ignored. The host sets the surface size on every demand draw, so a
    /// resize from the compositing engine must not be applied here as well.
    pub fn reshape(&mut self, size: IntSize, scale_factor: f64) {
        self.thread.check();
        tracing::trace!(
            routing_id = ?self.routing_id,
            ?size,
            scale_factor,
            "reshape ignored; size comes from demand draws",
        );
    }

    /// Records whether the compositing engine wants begin-frames and forwards
    /// the change to the delegate.
    ///
    /// Engines call this through [`FrameOutput::set_needs_begin_frame`]
    /// while they are being drawn.
    pub fn set_needs_begin_frame(&mut self, enable: bool) {
        self.thread.check();
        self.apply_needs_begin_frame(enable);
    }

    fn apply_needs_begin_frame(&mut self, enable: bool) {
        self.needs_begin_frame = enable;

        tracing::trace!(routing_id = ?self.routing_id, enable, "continuous invalidate");
        tracer(&mut self.trace_sink).begin_frame_request(&BeginFrameRequestEvent {
            routing_id: self.routing_id,
            enabled: enable,
            timestamp: time::now(),
        });
        if let Some(delegate) = self.delegate() {
            delegate.on_continuous_invalidate_changed(enable);
        }
    }

    /// Creates the GPU context used by hardware draws.
    ///
    /// # Errors
    ///
    /// Returns [`InitializeError::ContextCreation`] if the platform cannot
    /// create a context. The surface stays uninitialized and the host must
    /// not issue hardware draws.
    ///
    /// # Panics
    ///
    /// Panics if no client is bound or a GPU context already exists.
    pub fn initialize_hw_draw(&mut self) -> Result<(), InitializeError> {
        self.thread.check();
        assert!(
            self.client.is_some(),
            "initialize_hw_draw requires a bound client"
        );
        assert!(
            self.context.is_none(),
            "initialize_hw_draw called while a GPU context already exists"
        );

        match self
            .platform
            .create_view_context(&ContextAttributes::VIEW_CONTEXT)
        {
            Ok(context) => {
                self.context = Some(context);
                tracing::debug!(routing_id = ?self.routing_id, "hardware draw initialized");
                self.trace_lifecycle(LifecycleKind::HwDrawInitialized);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    routing_id = ?self.routing_id,
                    error = %err,
                    "failed to create GPU context for hardware draw",
                );
                Err(err.into())
            }
        }
    }

    /// Drops the GPU context, returning the surface to
    /// [`DrawMode::Uninitialized`]. Does nothing if there is no context.
    pub fn release_hw_draw(&mut self) {
        self.thread.check();
        if self.context.take().is_some() {
            tracing::debug!(routing_id = ?self.routing_id, "hardware draw released");
            self.trace_lifecycle(LifecycleKind::HwDrawReleased);
        }
    }

    /// Draws one hardware-composited frame into the host's current
    /// framebuffer.
    ///
    /// `transform` and `clip` are in the host's containing space. Returns
    /// `true` if the compositing engine swapped buffers during the call.
    ///
    /// # Panics
    ///
    /// Panics if no client is bound or
    /// [`initialize_hw_draw`](Self::initialize_hw_draw) has not succeeded.
    pub fn demand_draw_hw(
        &mut self,
        surface_size: IntSize,
        transform: &Transform3d,
        clip: IntRect,
    ) -> bool {
        self.thread.check();
        let start = time::now();
        let routing_id = self.routing_id;

        let Some(client) = self.client.as_deref_mut() else {
            panic!("demand_draw_hw requires a bound client");
        };
        let Some(context) = self.context.as_deref_mut() else {
            panic!("demand_draw_hw called before initialize_hw_draw");
        };

        self.did_swap_buffer = false;
        // Other code on this thread may have made a different context current.
        self.platform.release_current();

        let constraints = DrawConstraints::new(surface_size, transform, clip);
        self.surface_size = constraints.surface_size;

        let mut tracer = tracer(&mut self.trace_sink);
        trace_demand_draw(&mut tracer, routing_id, DrawPath::Hardware, &constraints, start);

        client.set_external_draw_constraints(&constraints.transform, constraints.clip);
        let mut output = FrameOutput::hardware(routing_id, context, &mut self.did_swap_buffer);
        invoke_composite(
            routing_id,
            client,
            &mut output,
            constraints.full_damage(),
            self.needs_begin_frame,
            &mut tracer,
        );
        let begin_frame_request = output.take_begin_frame_request();
        drop(output);

        let did_swap = self.did_swap_buffer;
        trace_draw_result(&mut tracer, routing_id, DrawPath::Hardware, did_swap, start);

        if let Some(enable) = begin_frame_request {
            self.apply_needs_begin_frame(enable);
        }

        if self.context.as_deref().is_some_and(|context| context.is_lost()) {
            self.on_context_lost();
        }
        did_swap
    }

    /// Draws one software-composited frame into `canvas`.
    ///
    /// The clip, transform, and surface size come from the canvas. Returns
    /// `true` if the compositing engine released the canvas before the call
    /// returned, meaning the host may use it again. That is not the same as
    /// "pixels changed".
    ///
    /// # Panics
    ///
    /// Panics if no client is bound or a software draw is already running.
    pub fn demand_draw_sw(&mut self, canvas: &mut dyn Canvas) -> bool {
        self.thread.check();
        let start = time::now();
        let routing_id = self.routing_id;

        assert!(
            !self.software_in_flight,
            "demand_draw_sw re-entered while a software draw is in flight"
        );
        let Some(client) = self.client.as_deref_mut() else {
            panic!("demand_draw_sw requires a bound client");
        };
        let in_flight = SoftwareDrawScope::enter(&mut self.software_in_flight);

        let transform = Transform3d::from_affine(canvas.total_matrix());
        let constraints =
            DrawConstraints::new(canvas.device_size(), &transform, canvas.device_clip_bounds());
        self.surface_size = constraints.surface_size;

        let mut tracer = tracer(&mut self.trace_sink);
        trace_demand_draw(&mut tracer, routing_id, DrawPath::Software, &constraints, start);

        client.set_external_draw_constraints(&constraints.transform, constraints.clip);
        let device = SoftwareOutputDevice::new(canvas, &mut self.null_canvas, routing_id);
        let mut output = FrameOutput::software(routing_id, device);
        invoke_composite(
            routing_id,
            client,
            &mut output,
            constraints.full_damage(),
            self.needs_begin_frame,
            &mut tracer,
        );
        let begin_frame_request = output.take_begin_frame_request();
        let finished = output
            .into_software_device()
            .is_some_and(|device| !device.canvas_in_flight());

        trace_draw_result(&mut tracer, routing_id, DrawPath::Software, finished, start);
        drop(in_flight);

        if let Some(enable) = begin_frame_request {
            self.apply_needs_begin_frame(enable);
        }
        finished
    }

    /// Returns `true` while a software draw is running.
    ///
    /// From outside a draw this is always `false`; an engine inside a draw
    /// asks its [`FrameOutput`] instead.
    #[must_use]
    pub fn forced_draw_to_software_device(&self) -> bool {
        self.thread.check();
        self.software_in_flight
    }

    /// Returns which backend the surface is set up for.
    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.thread.check();
        if self.software_in_flight {
            DrawMode::SoftwareInFlight
        } else if self.context.is_some() {
            DrawMode::Hardware
        } else {
            DrawMode::Uninitialized
        }
    }

    /// Capabilities advertised to the compositing engine.
    #[must_use]
    pub fn capabilities(&self) -> OutputSurfaceCapabilities {
        self.thread.check();
        self.capabilities
    }

    /// The view this surface draws.
    ///
    /// Unlike the other queries this is not thread-checked: the id never
    /// changes, and delegates read it from inside notifications, including
    /// the destroy notification sent while a foreign thread unwinds.
    #[must_use]
    pub fn routing_id(&self) -> RoutingId {
        self.routing_id
    }

    /// Surface size of the most recent demand draw.
    #[must_use]
    pub fn surface_size(&self) -> IntSize {
        self.thread.check();
        self.surface_size
    }

    /// Whether the compositing engine currently wants begin-frames.
    #[must_use]
    pub fn needs_begin_frame(&self) -> bool {
        self.thread.check();
        self.needs_begin_frame
    }

    /// Whether a compositing engine is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.thread.check();
        self.client.is_some()
    }

    /// Whether a GPU context exists.
    #[must_use]
    pub fn has_gpu_context(&self) -> bool {
        self.thread.check();
        self.context.is_some()
    }

    fn delegate(&self) -> Option<Arc<dyn SurfaceDelegate>> {
        let delegate = self.registry.get(self.routing_id);
        if delegate.is_none() {
            tracing::trace!(routing_id = ?self.routing_id, "no delegate registered");
        }
        delegate
    }

    fn on_context_lost(&mut self) {
        tracing::warn!(
            routing_id = ?self.routing_id,
            "GPU context lost during hardware draw",
        );
        self.trace_lifecycle(LifecycleKind::GpuContextLost);
        if let Some(delegate) = self.delegate() {
            delegate.on_gpu_context_lost(self);
        }
    }

    fn trace_lifecycle(&mut self, kind: LifecycleKind) {
        tracer(&mut self.trace_sink).lifecycle(&LifecycleEvent {
            routing_id: self.routing_id,
            kind,
            timestamp: time::now(),
        });
    }
}

impl Drop for SynchronousOutputSurface {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            self.thread.check();
        }
        tracing::debug!(routing_id = ?self.routing_id, "output surface destroyed");
        self.trace_lifecycle(LifecycleKind::Destroyed);
        if let Some(delegate) = self.delegate() {
            delegate.on_surface_destroyed(self);
        }
    }
}

/// Marks a software draw as running until dropped, including on unwind.
struct SoftwareDrawScope<'a> {
    in_flight: &'a mut bool,
}

impl<'a> SoftwareDrawScope<'a> {
    fn enter(in_flight: &'a mut bool) -> Self {
        *in_flight = true;
        Self { in_flight }
    }
}

impl Drop for SoftwareDrawScope<'_> {
    fn drop(&mut self) {
        *self.in_flight = false;
    }
}

fn tracer(sink: &mut Option<Box<dyn TraceSink + Send>>) -> Tracer<'_> {
    match sink {
        Some(sink) => Tracer::new(&mut **sink),
        None => Tracer::none(),
    }
}

/// Marks the full damage for redraw, then issues a begin-frame if the engine
/// asked for continuous invalidation.
fn invoke_composite(
    routing_id: RoutingId,
    client: &mut (dyn OutputSurfaceClient + Send),
    output: &mut FrameOutput<'_>,
    damage: IntRect,
    needs_begin_frame: bool,
    tracer: &mut Tracer<'_>,
) {
    client.set_needs_redraw_rect(damage, output);

    let begin_frame = needs_begin_frame.then(|| {
        let frame_time = time::now();
        client.begin_frame(frame_time, output);
        frame_time
    });

    tracing::trace!(?routing_id, ?damage, ?begin_frame, "composite");
    tracer.composite(&CompositeEvent {
        routing_id,
        damage,
        begin_frame,
        timestamp: time::now(),
    });
}

fn trace_demand_draw(
    tracer: &mut Tracer<'_>,
    routing_id: RoutingId,
    path: DrawPath,
    constraints: &DrawConstraints,
    timestamp: HostTime,
) {
    tracing::trace!(
        ?routing_id,
        ?path,
        size = ?constraints.surface_size,
        clip = ?constraints.clip,
        "demand draw",
    );
    tracer.demand_draw(&DemandDrawEvent {
        routing_id,
        path,
        surface_size: constraints.surface_size,
        clip: constraints.clip,
        transform: constraints.transform,
        timestamp,
    });
}

fn trace_draw_result(
    tracer: &mut Tracer<'_>,
    routing_id: RoutingId,
    path: DrawPath,
    completed: bool,
    start: HostTime,
) {
    let timestamp = time::now();
    tracing::trace!(?routing_id, ?path, completed, "demand draw finished");
    tracer.draw_result(&DrawResultEvent {
        routing_id,
        path,
        completed,
        timestamp,
        elapsed: timestamp.saturating_duration_since(start),
    });
}
