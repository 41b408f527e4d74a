// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for host-driven synchronous compositing.
//!
//! `tether_core` holds the leaf vocabulary shared between a compositing
//! engine, the synchronous output-surface adapter in `tether_surface`, and
//! the embedding host that drives it. It is `no_std` compatible (with
//! `alloc`) and owns no threads, clocks, or locks.
//!
//! # Architecture
//!
//! An embedding host draws on its own schedule and hands the adapter the
//! geometry for each call. The adapter turns that geometry into
//! [`DrawConstraints`](constraints::DrawConstraints) and runs exactly one
//! composite pass:
//!
//! ```text
//!   Host paint call
//!       │  (surface size, transform, clip)  or  &mut dyn Canvas
//!       ▼
//!   DrawConstraints::new() ──► adjust_transform_for_clip()
//!       │
//!       ▼
//!   client.set_external_draw_constraints()
//!   client.set_needs_redraw_rect()      ── engine paints / swaps
//!   client.begin_frame()  (only while continuous invalidation is on)
//!       │
//!       ▼
//!   bool result back to the host
//! ```
//!
//! **[`geometry`]** — Integer sizes and rectangles in device pixels.
//!
//! **[`transform`]** — Column-major 4×4 transform, including conversion from
//! a canvas's 2-D affine matrix.
//!
//! **[`constraints`]** — Per-call draw constraints and the single draw-space
//! adjustment shared by both draw paths.
//!
//! **[`canvas`]** — The raster target trait hosts implement for software
//! draws, plus the discard-everything [`NullCanvas`](canvas::NullCanvas).
//!
//! **[`gpu`]** — GPU context and platform traits consumed by hardware draws.
//!
//! **[`routing`]** — [`RoutingId`](routing::RoutingId), the key hosts use to
//! find the delegate for a view.
//!
//! **[`time`]** — Monotonic host time used for begin-frame timestamps.
//!
//! **[`latency`]** — Latency bookkeeping carried through buffer swaps.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! demand-draw instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod canvas;
pub mod constraints;
pub mod geometry;
pub mod gpu;
pub mod latency;
pub mod routing;
pub mod time;
pub mod trace;
pub mod transform;
