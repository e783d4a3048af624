//! Display drivers

pub mod bus;
pub mod ssd1306;

pub use bus::BlockingI2c;
pub use ssd1306::{DisplayError, Ssd1306, SSD1306_ADDR};
