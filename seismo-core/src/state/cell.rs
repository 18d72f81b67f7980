//! Shared status cell
//!
//! The cycle status is written by the cycle task and read from the
//! telemetry and command paths. This cell makes that sharing explicit:
//! a single atomic word with get/set/compare-and-swap, no critical
//! sections required at the read sites.

use portable_atomic::{AtomicU8, Ordering};

use super::machine::CycleState;

/// Atomically-updated cycle status
pub struct StatusCell(AtomicU8);

impl StatusCell {
    /// Create a cell holding the given initial state
    pub const fn new(initial: CycleState) -> Self {
        Self(AtomicU8::new(initial as u8))
    }

    /// Read the current state
    pub fn get(&self) -> CycleState {
        // The cell is only ever written from CycleState values
        CycleState::from_u8(self.0.load(Ordering::Acquire)).unwrap_or(CycleState::Idle)
    }

    /// Overwrite the current state
    pub fn set(&self, state: CycleState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }

    /// Replace `current` with `new`; returns false if the cell held
    /// something else and was left unchanged
    pub fn compare_and_swap(&self, current: CycleState, new: CycleState) -> bool {
        self.0
            .compare_exchange(
                current.as_u8(),
                new.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new(CycleState::Idle)
    }
}
