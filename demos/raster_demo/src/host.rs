// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side collaborators: a headless GPU platform and a logging delegate.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tether_core::gpu::{ContextAttributes, ContextCreationError, GpuContext, GpuPlatform};
use tether_surface::{SurfaceDelegate, SynchronousOutputSurface};

/// A GPU context with no device behind it. It reports loss after a fixed
/// number of flushes so the demo can show the loss notification.
struct HeadlessContext {
    flushes: u64,
    lose_after: Option<u64>,
}

impl GpuContext for HeadlessContext {
    fn shallow_flush(&mut self) {
        self.flushes += 1;
        tracing::trace!(flushes = self.flushes, "headless flush");
    }

    fn is_lost(&self) -> bool {
        self.lose_after.is_some_and(|limit| self.flushes >= limit)
    }
}

pub(crate) struct HeadlessPlatform {
    lose_after: Option<u64>,
}

impl HeadlessPlatform {
    pub(crate) fn new(lose_after: Option<u64>) -> Self {
        Self { lose_after }
    }
}

impl GpuPlatform for HeadlessPlatform {
    fn create_view_context(
        &mut self,
        attributes: &ContextAttributes,
    ) -> Result<Box<dyn GpuContext + Send>, ContextCreationError> {
        if attributes.antialias {
            return Err(ContextCreationError::Rejected(
                "headless contexts cannot multisample",
            ));
        }
        tracing::info!(?attributes, "created headless view context");
        Ok(Box::new(HeadlessContext {
            flushes: 0,
            lose_after: self.lose_after,
        }))
    }

    fn release_current(&mut self) {}
}

/// Logs every notification and remembers what the host would act on.
#[derive(Default)]
pub(crate) struct LoggingDelegate {
    pub(crate) continuous: AtomicBool,
    pub(crate) contexts_lost: AtomicU64,
}

impl SurfaceDelegate for LoggingDelegate {
    fn on_surface_bound(&self, surface: &SynchronousOutputSurface) {
        tracing::info!(routing_id = ?surface.routing_id(), "delegate: surface bound");
    }

    fn on_surface_destroyed(&self, surface: &SynchronousOutputSurface) {
        tracing::info!(routing_id = ?surface.routing_id(), "delegate: surface destroyed");
    }

    fn on_continuous_invalidate_changed(&self, enabled: bool) {
        tracing::info!(enabled, "delegate: continuous invalidate");
        self.continuous.store(enabled, Ordering::Relaxed);
    }

    fn on_gpu_context_lost(&self, surface: &SynchronousOutputSurface) {
        tracing::warn!(routing_id = ?surface.routing_id(), "delegate: GPU context lost");
        self.contexts_lost.fetch_add(1, Ordering::Relaxed);
    }
}
