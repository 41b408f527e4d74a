// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side notification targets, resolved by routing id.
//!
//! A surface never holds its delegate directly. The host may tear down and
//! recreate the delegate for a view independently of the surface, so every
//! notification looks the delegate up again in the shared
//! [`DelegateRegistry`] and tolerates finding nothing.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::Mutex;
use tether_core::routing::RoutingId;

use crate::surface::SynchronousOutputSurface;

/// Receives lifecycle notifications for the surface of one view.
pub trait SurfaceDelegate: Send + Sync {
    /// The surface is bound to a compositing engine; the host may start
    /// issuing demand draws.
    fn on_surface_bound(&self, surface: &SynchronousOutputSurface);

    /// The surface is being destroyed. The host should forget it.
    fn on_surface_destroyed(&self, surface: &SynchronousOutputSurface);

    /// The compositing engine turned continuous invalidation on or off.
    fn on_continuous_invalidate_changed(&self, enabled: bool);

    /// The surface's GPU context was lost during a hardware draw.
    ///
    /// The surface does not recover on its own. A host that wants to keep
    /// drawing in hardware calls
    /// [`release_hw_draw`](SynchronousOutputSurface::release_hw_draw) and then
    /// [`initialize_hw_draw`](SynchronousOutputSurface::initialize_hw_draw)
    /// again, or falls back to software draws.
    fn on_gpu_context_lost(&self, surface: &SynchronousOutputSurface) {
        _ = surface;
    }
}

/// Shared map from routing id to delegate.
#[derive(Default)]
pub struct DelegateRegistry {
    delegates: Mutex<HashMap<RoutingId, Arc<dyn SurfaceDelegate>>>,
}

impl fmt::Debug for DelegateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl DelegateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `delegate` with `routing_id`, returning the delegate it
    /// replaced.
    pub fn register(
        &self,
        routing_id: RoutingId,
        delegate: Arc<dyn SurfaceDelegate>,
    ) -> Option<Arc<dyn SurfaceDelegate>> {
        self.delegates.lock().insert(routing_id, delegate)
    }

    /// Removes the delegate for `routing_id`.
    pub fn unregister(&self, routing_id: RoutingId) -> Option<Arc<dyn SurfaceDelegate>> {
        self.delegates.lock().remove(&routing_id)
    }

    /// Looks up the delegate for `routing_id`.
    ///
    /// The lock is released before this returns, so the delegate may call
    /// back into the registry.
    #[must_use]
    pub fn get(&self, routing_id: RoutingId) -> Option<Arc<dyn SurfaceDelegate>> {
        self.delegates.lock().get(&routing_id).cloned()
    }

    /// Number of registered delegates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.delegates.lock().len()
    }

    /// Returns `true` if no delegate is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delegates.lock().is_empty()
    }
}
