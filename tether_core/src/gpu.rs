// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GPU context collaborators for hardware draws.
//!
//! The adapter never talks to a graphics API directly. It asks a
//! [`GpuPlatform`] for a view context once, flushes that context on every
//! buffer swap, and asks the platform to drop whatever context is current
//! before each hardware draw.

use alloc::boxed::Box;

/// Attributes requested when creating a GPU context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextAttributes {
    /// Multisample the default framebuffer.
    pub antialias: bool,
    /// Share resources with other contexts in the same share group.
    pub share_resources: bool,
    /// The context only flushes when asked to.
    pub no_automatic_flushes: bool,
}

impl ContextAttributes {
    /// Attributes for a context that draws into an embedder-owned view:
    /// shared resources, no automatic flushes, no antialiasing.
    pub const VIEW_CONTEXT: Self = Self {
        antialias: false,
        share_resources: true,
        no_automatic_flushes: true,
    };
}

impl Default for ContextAttributes {
    fn default() -> Self {
        Self::VIEW_CONTEXT
    }
}

/// Reasons a [`GpuPlatform`] could not create a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContextCreationError {
    /// No GPU or driver is available to this process.
    #[error("no GPU context is available")]
    Unavailable,
    /// The platform refused the requested attributes.
    #[error("GPU context creation rejected: {0}")]
    Rejected(&'static str),
}

/// A live GPU context owned by an output surface.
pub trait GpuContext {
    /// Submits queued commands without waiting for them to complete.
    fn shallow_flush(&mut self);

    /// Returns `true` once the context has been lost and can no longer draw.
    fn is_lost(&self) -> bool {
        false
    }
}

/// The host's GPU binding: creates contexts and manages which one is
/// current on the calling thread.
pub trait GpuPlatform {
    /// Creates a context bound to the host view.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextCreationError`] if no context can be created with
    /// `attributes`.
    fn create_view_context(
        &mut self,
        attributes: &ContextAttributes,
    ) -> Result<Box<dyn GpuContext + Send>, ContextCreationError>;

    /// Releases whatever context is current on this thread, forcing a full
    /// state restore the next time any context is made current.
    fn release_current(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_context_attributes() {
        let attrs = ContextAttributes::default();
        assert!(!attrs.antialias);
        assert!(attrs.share_resources);
        assert!(attrs.no_automatic_flushes);
    }

    #[test]
    fn context_is_not_lost_by_default() {
        struct Flushless;
        impl GpuContext for Flushless {
            fn shallow_flush(&mut self) {}
        }
        assert!(!Flushless.is_lost());
    }
}
