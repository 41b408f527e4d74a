// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous output-surface adapter.
//!
//! `tether_surface` lets an embedding host (a UI toolkit that paints on its
//! own schedule) demand-draw a compositing engine that would otherwise run
//! free. The host owns one [`SynchronousOutputSurface`] per view and, from
//! inside its own paint callback, asks for exactly one frame:
//!
//! - [`demand_draw_hw`](SynchronousOutputSurface::demand_draw_hw) draws into
//!   the host's current framebuffer through a GPU context created by
//!   [`initialize_hw_draw`](SynchronousOutputSurface::initialize_hw_draw).
//! - [`demand_draw_sw`](SynchronousOutputSurface::demand_draw_sw) rasters
//!   into a host [`Canvas`](tether_core::canvas::Canvas) that is lent to the
//!   engine for the length of the call.
//!
//! The engine implements [`OutputSurfaceClient`] and draws through the
//! [`FrameOutput`] handed to its callbacks. Host-side notifications go to a
//! [`SurfaceDelegate`] looked up by routing id in a shared
//! [`DelegateRegistry`].
//!
//! Everything is confined to one thread, checked at runtime by
//! [`ThreadChecker`]. Contract violations panic; recoverable failures are the
//! error types in this crate.
//!
//! # Logging
//!
//! Lifecycle changes are logged at `debug`, per-draw detail at `trace`, and
//! GPU context loss, context creation failure, and stray software paints at
//! `warn`, all through [`tracing`].
//!
//! # Crate features
//!
//! - `trace` (disabled by default): delivers frame-level events to the sink
//!   installed with
//!   [`with_trace_sink`](SynchronousOutputSurface::with_trace_sink).

pub mod client;
pub mod delegate;
pub mod error;
pub mod output;
pub mod software;
pub mod surface;
pub mod thread;
pub mod time;

#[cfg(test)]
mod testing;

pub use client::{OutputSurfaceCapabilities, OutputSurfaceClient};
pub use delegate::{DelegateRegistry, SurfaceDelegate};
pub use error::{BindError, InitializeError, SoftwareDeviceError};
pub use output::{DrawMode, FrameOutput};
pub use software::{SoftwareFrameData, SoftwareOutputDevice};
pub use surface::SynchronousOutputSurface;
pub use thread::ThreadChecker;
