// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-thread affinity checks.
//!
//! An output surface may be constructed on one thread and then moved to the
//! thread that will drive it. [`ThreadChecker`] fixes the designated thread
//! either up front ([`bound_to`](ThreadChecker::bound_to)) or on first use,
//! and every later check compares against it.

use std::cell::Cell;
use std::thread::{self, ThreadId};

/// Verifies that calls happen on one designated thread.
///
/// Holds no synchronization of its own: it is `Send` so its owner can be
/// handed to the designated thread, but not `Sync`.
#[derive(Debug, Default)]
pub struct ThreadChecker {
    designated: Cell<Option<ThreadId>>,
}

impl ThreadChecker {
    /// Creates a checker that binds to whichever thread calls it first.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            designated: Cell::new(None),
        }
    }

    /// Creates a checker already bound to `thread`.
    #[must_use]
    pub const fn bound_to(thread: ThreadId) -> Self {
        Self {
            designated: Cell::new(Some(thread)),
        }
    }

    /// Returns the designated thread, if one has been fixed.
    #[must_use]
    pub fn designated_thread(&self) -> Option<ThreadId> {
        self.designated.get()
    }

    /// Returns `true` if the calling thread is the designated thread, binding
    /// to it if no thread has been designated yet.
    #[must_use]
    pub fn called_on_valid_thread(&self) -> bool {
        let current = thread::current().id();
        match self.designated.get() {
            Some(designated) => designated == current,
            None => {
                self.designated.set(Some(current));
                true
            }
        }
    }

    /// Asserts that the calling thread is the designated thread.
    ///
    /// # Panics
    ///
    /// Panics when called from any other thread. Thread affinity is a caller
    /// contract, not a recoverable condition.
    #[track_caller]
    pub fn check(&self) {
        assert!(
            self.called_on_valid_thread(),
            "called on {:?}, but this object is confined to {:?}",
            thread::current().id(),
            self.designated.get(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_on_first_use() {
        let checker = ThreadChecker::new();
        assert_eq!(checker.designated_thread(), None);
        checker.check();
        assert_eq!(checker.designated_thread(), Some(thread::current().id()));
    }

    #[test]
    fn constructed_elsewhere_binds_to_user_thread() {
        let checker = thread::spawn(ThreadChecker::new)
            .join()
            .expect("constructor thread panicked");
        assert!(checker.called_on_valid_thread());
        assert_eq!(checker.designated_thread(), Some(thread::current().id()));
    }

    #[test]
    fn other_thread_is_rejected() {
        let checker = ThreadChecker::bound_to(thread::current().id());
        let valid = thread::spawn(move || checker.called_on_valid_thread())
            .join()
            .expect("checker thread panicked");
        assert!(!valid, "a different thread must not pass the check");
    }

    #[test]
    #[should_panic(expected = "confined to")]
    fn check_panics_off_thread() {
        let other = thread::spawn(|| thread::current().id())
            .join()
            .expect("id thread panicked");
        ThreadChecker::bound_to(other).check();
    }
}
