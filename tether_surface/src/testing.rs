// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording test doubles for the surface's collaborators.

use std::sync::Arc;

use kurbo::Affine;
use parking_lot::Mutex;
use tether_core::canvas::{Canvas, Rgba8};
use tether_core::geometry::{IntRect, IntSize};
use tether_core::gpu::{ContextAttributes, ContextCreationError, GpuContext, GpuPlatform};
use tether_core::latency::LatencyInfo;
use tether_core::routing::RoutingId;
use tether_core::time::HostTime;
use tether_core::transform::Transform3d;

use crate::client::OutputSurfaceClient;
use crate::delegate::SurfaceDelegate;
use crate::output::{DrawMode, FrameOutput};
use crate::software::SoftwareFrameData;
use crate::surface::SynchronousOutputSurface;

pub(crate) type Shared<T> = Arc<Mutex<T>>;

pub(crate) const PAINT_COLOR: Rgba8 = Rgba8::new(0x20, 0x80, 0xe0, 0xff);

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

pub(crate) struct RecordingCanvas {
    size: IntSize,
    clip: IntRect,
    matrix: Affine,
    pub(crate) fills: Vec<(kurbo::Rect, Rgba8)>,
}

impl RecordingCanvas {
    pub(crate) fn new(size: IntSize) -> Self {
        Self {
            size,
            clip: IntRect::from_size(size),
            matrix: Affine::IDENTITY,
            fills: Vec::new(),
        }
    }

    pub(crate) fn with_clip(mut self, clip: IntRect) -> Self {
        self.clip = clip;
        self
    }

    pub(crate) fn with_matrix(mut self, matrix: Affine) -> Self {
        self.matrix = matrix;
        self
    }
}

impl Canvas for RecordingCanvas {
    fn device_clip_bounds(&self) -> IntRect {
        self.clip
    }

    fn total_matrix(&self) -> Affine {
        self.matrix
    }

    fn device_size(&self) -> IntSize {
        self.size
    }

    fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8) {
        self.fills.push((rect, color));
    }
}

// ---------------------------------------------------------------------------
// GPU
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub(crate) struct ContextState {
    pub(crate) flushes: u32,
    pub(crate) lost: bool,
}

pub(crate) struct RecordingContext {
    state: Shared<ContextState>,
}

impl RecordingContext {
    pub(crate) fn new() -> (Self, Shared<ContextState>) {
        let state = Shared::default();
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl GpuContext for RecordingContext {
    fn shallow_flush(&mut self) {
        self.state.lock().flushes += 1;
    }

    fn is_lost(&self) -> bool {
        self.state.lock().lost
    }
}

#[derive(Debug, Default)]
pub(crate) struct PlatformState {
    pub(crate) requested: Vec<ContextAttributes>,
    pub(crate) releases: u32,
    pub(crate) fail_with: Option<ContextCreationError>,
    context: Shared<ContextState>,
}

impl PlatformState {
    /// Flushes across every context this platform handed out.
    pub(crate) fn flushes(&self) -> u32 {
        self.context.lock().flushes
    }

    pub(crate) fn lose_context(&self) {
        self.context.lock().lost = true;
    }
}

pub(crate) struct RecordingPlatform {
    state: Shared<PlatformState>,
}

impl RecordingPlatform {
    pub(crate) fn new() -> (Self, Shared<PlatformState>) {
        let state = Shared::default();
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl GpuPlatform for RecordingPlatform {
    fn create_view_context(
        &mut self,
        attributes: &ContextAttributes,
    ) -> Result<Box<dyn GpuContext + Send>, ContextCreationError> {
        let mut state = self.state.lock();
        state.requested.push(*attributes);
        if let Some(err) = state.fail_with {
            return Err(err);
        }
        Ok(Box::new(RecordingContext {
            state: Arc::clone(&state.context),
        }))
    }

    fn release_current(&mut self) {
        self.state.lock().releases += 1;
    }
}

// ---------------------------------------------------------------------------
// Delegate
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DelegateCall {
    Bound(RoutingId),
    Destroyed(RoutingId),
    ContinuousInvalidate(bool),
    ContextLost(RoutingId),
}

pub(crate) struct RecordingDelegate {
    calls: Shared<Vec<DelegateCall>>,
}

impl RecordingDelegate {
    pub(crate) fn new() -> (Arc<Self>, Shared<Vec<DelegateCall>>) {
        let calls = Shared::default();
        (
            Arc::new(Self {
                calls: Arc::clone(&calls),
            }),
            calls,
        )
    }
}

impl SurfaceDelegate for RecordingDelegate {
    fn on_surface_bound(&self, surface: &SynchronousOutputSurface) {
        self.calls.lock().push(DelegateCall::Bound(surface.routing_id()));
    }

    fn on_surface_destroyed(&self, surface: &SynchronousOutputSurface) {
        self.calls
            .lock()
            .push(DelegateCall::Destroyed(surface.routing_id()));
    }

    fn on_continuous_invalidate_changed(&self, enabled: bool) {
        self.calls
            .lock()
            .push(DelegateCall::ContinuousInvalidate(enabled));
    }

    fn on_gpu_context_lost(&self, surface: &SynchronousOutputSurface) {
        self.calls
            .lock()
            .push(DelegateCall::ContextLost(surface.routing_id()));
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// What the recording client does when asked to redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ClientAction {
    Nothing,
    Swap,
    Paint,
    PaintAndSwap(LatencyInfo),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ClientCall {
    Constraints {
        transform: Transform3d,
        clip: IntRect,
    },
    Redraw {
        damage: IntRect,
        mode: DrawMode,
    },
    Forced(bool),
    BeginFrame {
        frame_time: HostTime,
    },
}

#[derive(Debug)]
pub(crate) struct ClientState {
    pub(crate) calls: Vec<ClientCall>,
    pub(crate) action: ClientAction,
    /// Begin-frame request made from `set_needs_redraw_rect`.
    pub(crate) request_in_redraw: Option<bool>,
    /// Begin-frame request made from `begin_frame`.
    pub(crate) request_in_begin_frame: Option<bool>,
}

pub(crate) struct RecordingClient {
    state: Shared<ClientState>,
    frames: u64,
}

impl RecordingClient {
    pub(crate) fn new(action: ClientAction) -> (Self, Shared<ClientState>) {
        let state = Arc::new(Mutex::new(ClientState {
            calls: Vec::new(),
            action,
            request_in_redraw: None,
            request_in_begin_frame: None,
        }));
        (
            Self {
                state: Arc::clone(&state),
                frames: 0,
            },
            state,
        )
    }

    fn paint(&mut self, damage: IntRect, output: &mut FrameOutput<'_>) {
        if let Some(device) = output.software_device() {
            device
                .begin_paint(damage)
                .fill_rect(damage.to_kurbo(), PAINT_COLOR);
            self.frames += 1;
            device.end_paint(&SoftwareFrameData {
                id: self.frames,
                size: damage.size(),
                damage_rect: damage,
            });
        }
    }
}

impl OutputSurfaceClient for RecordingClient {
    fn set_external_draw_constraints(&mut self, transform: &Transform3d, clip: IntRect) {
        self.state.lock().calls.push(ClientCall::Constraints {
            transform: *transform,
            clip,
        });
    }

    fn set_needs_redraw_rect(&mut self, damage: IntRect, output: &mut FrameOutput<'_>) {
        let (action, request) = {
            let mut state = self.state.lock();
            state.calls.push(ClientCall::Redraw {
                damage,
                mode: output.mode(),
            });
            state
                .calls
                .push(ClientCall::Forced(output.forced_draw_to_software_device()));
            (state.action, state.request_in_redraw)
        };
        if let Some(enable) = request {
            output.set_needs_begin_frame(enable);
        }
        match action {
            ClientAction::Nothing => {}
            ClientAction::Swap => output.swap_buffers(&LatencyInfo::new(self.frames)),
            ClientAction::Paint => self.paint(damage, output),
            ClientAction::PaintAndSwap(latency) => {
                self.paint(damage, output);
                output.swap_buffers(&latency);
            }
        }
    }

    fn begin_frame(&mut self, frame_time: HostTime, output: &mut FrameOutput<'_>) {
        let request = {
            let mut state = self.state.lock();
            state.calls.push(ClientCall::BeginFrame { frame_time });
            state.request_in_begin_frame
        };
        if let Some(enable) = request {
            output.set_needs_begin_frame(enable);
        }
    }
}
