//! Button edge tasks
//!
//! One task instance per button, all on the high-priority interrupt
//! executor so a press is latched even while the control loop is busy
//! talking to the display.

use defmt::*;
use embassy_rp::gpio::Input;

use stickframe_core::input::{Button, EdgeOutcome, EventLatch};
use stickframe_hal::{MonotonicClock, ProgrammingReset};

use crate::board::{BootselReset, UptimeClock};

#[embassy_executor::task(pool_size = 3)]
pub async fn button_task(
    mut pin: Input<'static>,
    button: Button,
    latch: &'static EventLatch<'static>,
    clock: UptimeClock,
    mut reset: BootselReset,
) {
    info!("Button task started: {}", button);

    loop {
        pin.wait_for_falling_edge().await;

        match latch.on_edge(button, clock.now_us()) {
            EdgeOutcome::Rejected => trace!("{} bounce ignored", button),
            EdgeOutcome::ModeChanged(flags) => info!("{} pressed: {}", button, flags),
            EdgeOutcome::Reprogram => {
                info!("Rebooting into USB bootloader");
                reset.enter_programming_mode()
            }
        }
    }
}
