// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sink adapters for surfaces that own their sink.
//!
//! A surface takes its sink as `Box<dyn TraceSink + Send>`. Wrap a sink in
//! [`SharedSink`] and keep a clone to read it back later; combine two sinks
//! with [`Tee`].

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tether_core::trace::{
    BeginFrameRequestEvent, CompositeEvent, DemandDrawEvent, DrawResultEvent, LifecycleEvent,
    TraceSink,
};

/// A clonable handle to a sink behind a lock.
#[derive(Debug, Default)]
pub struct SharedSink<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedSink<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> SharedSink<S> {
    /// Wraps `sink`.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    /// Locks the inner sink.
    pub fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock()
    }
}

impl<S: TraceSink> TraceSink for SharedSink<S> {
    fn on_demand_draw(&mut self, e: &DemandDrawEvent) {
        self.inner.lock().on_demand_draw(e);
    }

    fn on_composite(&mut self, e: &CompositeEvent) {
        self.inner.lock().on_composite(e);
    }

    fn on_draw_result(&mut self, e: &DrawResultEvent) {
        self.inner.lock().on_draw_result(e);
    }

    fn on_begin_frame_request(&mut self, e: &BeginFrameRequestEvent) {
        self.inner.lock().on_begin_frame_request(e);
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.inner.lock().on_lifecycle(e);
    }
}

/// Forwards every event to two sinks, first `A` then `B`.
#[derive(Debug, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_demand_draw(&mut self, e: &DemandDrawEvent) {
        self.0.on_demand_draw(e);
        self.1.on_demand_draw(e);
    }

    fn on_composite(&mut self, e: &CompositeEvent) {
        self.0.on_composite(e);
        self.1.on_composite(e);
    }

    fn on_draw_result(&mut self, e: &DrawResultEvent) {
        self.0.on_draw_result(e);
        self.1.on_draw_result(e);
    }

    fn on_begin_frame_request(&mut self, e: &BeginFrameRequestEvent) {
        self.0.on_begin_frame_request(e);
        self.1.on_begin_frame_request(e);
    }

    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.0.on_lifecycle(e);
        self.1.on_lifecycle(e);
    }
}
