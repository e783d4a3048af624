//! Mode flags shared between the button handlers and the control loop
//!
//! All three flags live in one atomic byte. A button handler replaces the
//! whole byte in a single read-modify-write, so the control loop either sees
//! the state before a press or the state after it, never a mix (for example
//! a toggled light with the old border).

use portable_atomic::{AtomicU8, Ordering};

const PWM_ENABLED: u8 = 1 << 0;
const TOGGLE_ON: u8 = 1 << 1;
const BORDER_SHIFT: u8 = 4;
const BORDER_MASK: u8 = 0b11 << BORDER_SHIFT;

/// Snapshot of the mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeFlags {
    /// Gates all three light outputs
    pub pwm_enabled: bool,
    /// State of the button-controlled (green) light
    pub toggle_on: bool,
    /// Position in the configured border cycle (0..=3)
    pub border_index: u8,
}

impl ModeFlags {
    /// Power-on state: lights enabled, green off, first border style
    pub const INITIAL: Self = Self {
        pwm_enabled: true,
        toggle_on: false,
        border_index: 0,
    };

    const fn pack(self) -> u8 {
        let mut word = (self.border_index << BORDER_SHIFT) & BORDER_MASK;
        if self.pwm_enabled {
            word |= PWM_ENABLED;
        }
        if self.toggle_on {
            word |= TOGGLE_ON;
        }
        word
    }

    const fn unpack(word: u8) -> Self {
        Self {
            pwm_enabled: word & PWM_ENABLED != 0,
            toggle_on: word & TOGGLE_ON != 0,
            border_index: (word & BORDER_MASK) >> BORDER_SHIFT,
        }
    }
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Mode flags written from interrupt context and read by the control loop
///
/// On targets without native compare-and-swap (ARMv6-M) `portable-atomic`
/// runs each update inside a critical section.
#[derive(Debug)]
pub struct SharedFlags {
    word: AtomicU8,
}

impl Default for SharedFlags {
    fn default() -> Self {
        Self::new(ModeFlags::INITIAL)
    }
}

impl SharedFlags {
    /// Create shared flags with the given initial state
    pub const fn new(initial: ModeFlags) -> Self {
        Self {
            word: AtomicU8::new(initial.pack()),
        }
    }

    /// Read all flags at once
    pub fn snapshot(&self) -> ModeFlags {
        ModeFlags::unpack(self.word.load(Ordering::Acquire))
    }

    /// Apply `f` to the flags as one indivisible update
    ///
    /// Returns the flags after the update. `f` may run more than once if
    /// the update races another writer, so it must be pure.
    pub fn update<F>(&self, f: F) -> ModeFlags
    where
        F: Fn(ModeFlags) -> ModeFlags,
    {
        let previous = self
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                Some(f(ModeFlags::unpack(word)).pack())
            })
            .unwrap_or_else(|word| word);
        f(ModeFlags::unpack(previous))
    }

    /// Flip the light gate
    pub fn toggle_pwm(&self) -> ModeFlags {
        self.update(|flags| ModeFlags {
            pwm_enabled: !flags.pwm_enabled,
            ..flags
        })
    }

    /// Flip the green light and advance to the next of `border_count` styles
    pub fn advance_mode(&self, border_count: u8) -> ModeFlags {
        let count = border_count.max(1);
        self.update(|flags| ModeFlags {
            toggle_on: !flags.toggle_on,
            border_index: (flags.border_index + 1) % count,
            ..flags
        })
    }
}
