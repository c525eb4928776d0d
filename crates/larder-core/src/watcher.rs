//! One-shot tick watchers.
//!
//! A [`Watcher`] holds a revert target and the tick it was installed on.
//! [`poll`] hands the target back exactly once: on the first tick strictly
//! after installation for which the condition holds. The slot is emptied at
//! the same time, so a fired watcher can never fire again.

use serde::Serialize;

/// A pending revert and the tick it was installed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Watcher<T> {
    target: T,
    installed_at: u64,
}

impl<T> Watcher<T> {
    /// Install a watcher on `tick`.
    pub const fn new(target: T, tick: u64) -> Self {
        Self {
            target,
            installed_at: tick,
        }
    }

    /// The watched target.
    pub const fn target(&self) -> &T {
        &self.target
    }

    /// The tick the watcher was installed on.
    pub const fn installed_at(&self) -> u64 {
        self.installed_at
    }

    /// Return `true` once `tick` is strictly after installation.
    pub const fn is_due(&self, tick: u64) -> bool {
        tick > self.installed_at
    }
}

/// Fire the watcher in `slot` if it is due and `condition` holds.
///
/// Returns the target on firing and leaves `slot` empty.
pub fn poll<T>(
    slot: &mut Option<Watcher<T>>,
    tick: u64,
    condition: impl FnOnce(&T) -> bool,
) -> Option<T> {
    let fire = slot
        .as_ref()
        .is_some_and(|w| w.is_due(tick) && condition(&w.target));
    if fire {
        slot.take().map(|w| w.target)
    } else {
        None
    }
}
