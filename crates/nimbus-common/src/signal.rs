//! The busy/idle input port shared between the host shell and the renderer.
//!
//! The external collaborator (an assistant backend, a job runner, a demo
//! oscillator) owns the writes; the frame scheduler reads the flag at most
//! once per tick. Modeled as an explicit
//! handle passed in at construction rather than a process-wide global.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to the shared busy/idle boolean.
///
/// Relaxed ordering is sufficient: the single reader polls once per frame
/// and tolerates observing a flip one tick late.
#[derive(Debug, Clone)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new(initial: bool) -> Self {
        Self(Arc::new(AtomicBool::new(initial)))
    }

    pub fn set(&self, busy: bool) {
        self.0.store(busy, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        // fetch_xor(true) atomically inverts and returns the previous value.
        !self.0.fetch_xor(true, Ordering::Relaxed)
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_carries_initial_state() {
        assert!(!BusyFlag::new(false).get());
        assert!(BusyFlag::new(true).get());
    }

    #[test]
    fn set_and_get() {
        let flag = BusyFlag::default();
        flag.set(true);
        assert!(flag.get());
        flag.set(false);
        assert!(!flag.get());
    }

    #[test]
    fn toggle_returns_new_value() {
        let flag = BusyFlag::new(false);
        assert!(flag.toggle());
        assert!(flag.get());
        assert!(!flag.toggle());
        assert!(!flag.get());
    }

    #[test]
    fn clones_share_state() {
        let writer = BusyFlag::new(false);
        let reader = writer.clone();
        writer.set(true);
        assert!(reader.get());
    }
}
