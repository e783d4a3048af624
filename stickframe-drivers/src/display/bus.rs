//! `embedded-hal` I2C bridge
//!
//! Lets any blocking `embedded_hal::i2c::I2c` implementation (the
//! embassy-rp blocking I2C on the reference board) serve as an [`I2cBus`].

use embedded_hal::i2c::I2c;
use stickframe_hal::I2cBus;

/// Adapter from a blocking `embedded-hal` I2C master
pub struct BlockingI2c<T>(T);

impl<T: I2c> BlockingI2c<T> {
    pub fn new(i2c: T) -> Self {
        Self(i2c)
    }

    /// Give the wrapped bus back
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: I2c> I2cBus for BlockingI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }
}
