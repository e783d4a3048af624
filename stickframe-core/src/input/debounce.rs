//! Debounced button event latch
//!
//! Converts raw falling edges into logical button events. Each button has
//! its own guard; an edge is accepted only once the debounce window has
//! elapsed since that button's last accepted edge.

use portable_atomic::{AtomicU64, Ordering};

use crate::config::{BorderCycle, TimingConfig};
use crate::state::{ModeFlags, SharedFlags};

/// Physical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Joystick push: toggles the green light and cycles the border
    ModeSelect,
    /// Enables/disables all light outputs
    PwmGate,
    /// Reboots into the USB bootloader
    Reprogram,
}

impl Button {
    /// All buttons
    pub const ALL: [Button; 3] = [Button::ModeSelect, Button::PwmGate, Button::Reprogram];

    const fn index(self) -> usize {
        match self {
            Button::ModeSelect => 0,
            Button::PwmGate => 1,
            Button::Reprogram => 2,
        }
    }
}

/// Result of feeding one edge to the latch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Edge fell inside the debounce window; nothing changed
    Rejected,
    /// Edge accepted; the mode flags now read as given
    ModeChanged(ModeFlags),
    /// Edge accepted on the reprogram button; the caller must reset into
    /// the bootloader
    Reprogram,
}

/// Per-button debounce state
#[derive(Debug, Default)]
pub struct DebounceGuard {
    last_accepted_us: AtomicU64,
}

impl DebounceGuard {
    /// Create a guard whose last accepted edge is at time zero
    pub const fn new() -> Self {
        Self {
            last_accepted_us: AtomicU64::new(0),
        }
    }

    /// Try to accept an edge at `now_us`
    ///
    /// Accepts (and records `now_us`) iff at least `window_us` elapsed since
    /// the last accepted edge. A timestamp earlier than the last accepted
    /// one (clock wrap, reordered edges) is rejected.
    pub fn try_accept(&self, now_us: u64, window_us: u64) -> bool {
        self.last_accepted_us
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                match now_us.checked_sub(last) {
                    Some(elapsed) if elapsed >= window_us => Some(now_us),
                    _ => None,
                }
            })
            .is_ok()
    }

    /// Timestamp of the last accepted edge
    pub fn last_accepted_us(&self) -> u64 {
        self.last_accepted_us.load(Ordering::Acquire)
    }
}

/// Debounced latch for all three buttons
///
/// Every method takes `&self`; the latch is shared by reference with the
/// button handlers, which may run concurrently for different buttons.
/// Edges of one button must be delivered in order from one context.
#[derive(Debug)]
pub struct EventLatch<'a> {
    flags: &'a SharedFlags,
    guards: [DebounceGuard; 3],
    window_us: u64,
    border_count: u8,
}

impl<'a> EventLatch<'a> {
    /// Create a latch that writes into `flags`
    pub fn new(flags: &'a SharedFlags, timing: &TimingConfig, border: &BorderCycle) -> Self {
        Self {
            flags,
            guards: [DebounceGuard::new(), DebounceGuard::new(), DebounceGuard::new()],
            window_us: timing.debounce_us(),
            border_count: border.len(),
        }
    }

    /// Handle one falling edge of `button` seen at `now_us`
    pub fn on_edge(&self, button: Button, now_us: u64) -> EdgeOutcome {
        if !self.guards[button.index()].try_accept(now_us, self.window_us) {
            return EdgeOutcome::Rejected;
        }

        match button {
            Button::ModeSelect => EdgeOutcome::ModeChanged(self.flags.advance_mode(self.border_count)),
            Button::PwmGate => EdgeOutcome::ModeChanged(self.flags.toggle_pwm()),
            Button::Reprogram => EdgeOutcome::Reprogram,
        }
    }

    /// Debounce guard of `button`
    pub fn guard(&self, button: Button) -> &DebounceGuard {
        &self.guards[button.index()]
    }
}
