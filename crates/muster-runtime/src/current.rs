//! Ambient current-HQ stack.
//!
//! A process-wide stack of weak container handles with token discipline:
//! [`push`] returns a [`CurrentGuard`] whose drop removes exactly the
//! entry it created, wherever it sits in the stack by then. Out-of-order
//! guard drops therefore cannot corrupt the stack, and an unwind through
//! a guard restores the previous current like every other exit path.
//!
//! Entries hold `Weak` handles; a dropped container simply stops
//! resolving and the next live entry below it becomes current.

use crate::hq::HqInner;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

struct Entry {
    token: u64,
    hq: Weak<HqInner>,
}

static STACK: Lazy<Mutex<Vec<Entry>>> = Lazy::new(|| Mutex::new(Vec::new()));

// Token 0 is reserved for guard-less entries made by `reset`.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Removes its own stack entry on drop, restoring the previous current.
#[must_use = "dropping the guard immediately unsets the current HQ"]
pub struct CurrentGuard {
    token: u64,
}

impl Drop for CurrentGuard {
    fn drop(&mut self) {
        STACK.lock().retain(|entry| entry.token != self.token);
    }
}

/// Pushes a container onto the stack and returns its removal guard.
pub(crate) fn push(hq: &Arc<HqInner>) -> CurrentGuard {
    let token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
    STACK.lock().push(Entry {
        token,
        hq: Arc::downgrade(hq),
    });
    CurrentGuard { token }
}

/// Topmost still-live container, if any.
///
/// Dead entries (whose container has been dropped) are pruned as a side
/// effect.
pub(crate) fn current() -> Option<Arc<HqInner>> {
    let mut stack = STACK.lock();
    stack.retain(|entry| entry.hq.strong_count() > 0);
    stack.iter().rev().find_map(|entry| entry.hq.upgrade())
}

/// Re-establishes a container as current without a guard.
///
/// Replaces the topmost entry in place when one exists, so an active
/// guard now removes the replacement instead; pushes a permanent entry
/// onto an empty stack.
pub(crate) fn reset(hq: &Arc<HqInner>) {
    let mut stack = STACK.lock();
    match stack.last_mut() {
        Some(top) => top.hq = Arc::downgrade(hq),
        None => stack.push(Entry {
            token: 0,
            hq: Arc::downgrade(hq),
        }),
    }
}
