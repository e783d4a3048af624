//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C. The driver owns
//! no frame memory; it streams a [`FrameBuffer`] rendered by the core one
//! page at a time.

use stickframe_core::render::frame::{PAGES, WIDTH};
use stickframe_core::render::FrameBuffer;
use stickframe_core::traits::DisplayTransport;
use stickframe_hal::I2cBus;

/// SSD1306 I2C address (0x3D with SA0 pulled high)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Control byte: the rest of the transaction is one command
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: the rest of the transaction is display RAM data
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Power-on command sequence (page addressing, internal charge pump)
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_MEMORY_MODE,
    0x02, // Page addressing
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_FROM_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// Display driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// `init` has not completed
    NotInitialized,
    /// The I2C transaction failed
    Bus(E),
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    initialized: bool,
}

impl<I2C: I2cBus> Ssd1306<I2C> {
    /// Create a driver for the display at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SSD1306_ADDR)
    }

    /// Create a driver for a display at `address`
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            initialized: false,
        }
    }

    /// Run the power-on sequence and blank the display RAM
    pub fn init(&mut self) -> Result<(), DisplayError<I2C::Error>> {
        self.initialized = false;
        for &c in INIT_SEQUENCE {
            self.command(c)?;
        }
        self.initialized = true;
        self.flush_pages(FrameBuffer::new().pages())
    }

    /// True once `init` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError<I2C::Error>> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .map_err(DisplayError::Bus)
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError<I2C::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }

    /// Write all pages of display RAM
    pub fn flush_pages(&mut self, pages: &[[u8; WIDTH]; PAGES]) -> Result<(), DisplayError<I2C::Error>> {
        self.ensure_initialized()?;

        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;
        for (page, bytes) in pages.iter().enumerate() {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            data[1..].copy_from_slice(bytes);
            self.i2c
                .write(self.address, &data)
                .map_err(DisplayError::Bus)?;
        }

        Ok(())
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError<I2C::Error>> {
        self.ensure_initialized()?;
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Turn display on/off; RAM contents are kept
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError<I2C::Error>> {
        self.ensure_initialized()?;
        let c = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.command(c)
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError<I2C::Error>> {
        self.ensure_initialized()?;
        let c = if inverted { cmd::SET_INVERSE } else { cmd::SET_NORMAL };
        self.command(c)
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cBus> DisplayTransport for Ssd1306<I2C> {
    type Error = DisplayError<I2C::Error>;

    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.flush_pages(frame.pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nack;

    #[derive(Default)]
    struct MockBus {
        writes: Vec<(u8, Vec<u8>)>,
        fail_after: Option<usize>,
    }

    impl MockBus {
        fn commands(&self) -> Vec<u8> {
            self.writes
                .iter()
                .filter(|(_, w)| w[0] == CONTROL_COMMAND)
                .map(|(_, w)| w[1])
                .collect()
        }

        fn data(&self) -> Vec<&[u8]> {
            self.writes
                .iter()
                .filter(|(_, w)| w[0] == CONTROL_DATA)
                .map(|(_, w)| &w[1..])
                .collect()
        }
    }

    impl I2cBus for MockBus {
        type Error = Nack;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
            if self.fail_after.is_some_and(|n| self.writes.len() >= n) {
                return Err(Nack);
            }
            self.writes.push((address, data.to_vec()));
            Ok(())
        }
    }

    fn ready() -> Ssd1306<MockBus> {
        let mut display = Ssd1306::new(MockBus::default());
        display.init().unwrap();
        display.i2c.writes.clear();
        display
    }

    #[test]
    fn test_init_sequence() {
        let mut display = Ssd1306::new(MockBus::default());
        display.init().unwrap();

        assert!(display.is_initialized());
        let commands = display.i2c.commands();
        assert_eq!(&commands[..INIT_SEQUENCE.len()], INIT_SEQUENCE);
        assert_eq!(commands[0], cmd::DISPLAY_OFF);
        assert_eq!(commands[INIT_SEQUENCE.len() - 1], cmd::DISPLAY_ON);

        // Followed by a blank frame
        let data = display.i2c.data();
        assert_eq!(data.len(), PAGES);
        assert!(data.iter().all(|page| page.iter().all(|&b| b == 0)));
        assert!(display.i2c.writes.iter().all(|(addr, _)| *addr == SSD1306_ADDR));
    }

    #[test]
    fn test_flush_before_init() {
        let mut display = Ssd1306::new(MockBus::default());
        let frame = FrameBuffer::new();
        assert_eq!(display.flush(&frame), Err(DisplayError::NotInitialized));
        assert!(display.release().writes.is_empty());
    }

    #[test]
    fn test_flush_pages_in_order() {
        let mut display = ready();
        let mut frame = FrameBuffer::new();
        frame.set_pixel(0, 0, true);
        frame.set_pixel(127, 63, true);
        display.flush(&frame).unwrap();

        let commands = display.i2c.commands();
        assert_eq!(commands.len(), PAGES * 3);
        for page in 0..PAGES {
            assert_eq!(
                &commands[page * 3..page * 3 + 3],
                &[cmd::SET_PAGE_ADDR | page as u8, cmd::SET_LOW_COLUMN, cmd::SET_HIGH_COLUMN]
            );
        }

        let data = display.i2c.data();
        assert_eq!(data.len(), PAGES);
        assert!(data.iter().all(|page| page.len() == WIDTH));
        assert_eq!(data[0][0], 0x01);
        assert_eq!(data[7][127], 0x80);
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut display = ready();
        display.i2c.fail_after = Some(5);
        let result = display.flush(&FrameBuffer::new());
        assert_eq!(result, Err(DisplayError::Bus(Nack)));
    }

    #[test]
    fn test_failed_init_stays_uninitialized() {
        let bus = MockBus {
            fail_after: Some(3),
            ..MockBus::default()
        };
        let mut display = Ssd1306::new(bus);
        assert_eq!(display.init(), Err(DisplayError::Bus(Nack)));
        assert!(!display.is_initialized());
    }

    #[test]
    fn test_contrast_and_power() {
        let mut display = ready();
        display.set_contrast(0x10).unwrap();
        display.set_display_on(false).unwrap();
        display.set_inverted(true).unwrap();
        assert_eq!(
            display.i2c.commands(),
            [cmd::SET_CONTRAST, 0x10, cmd::DISPLAY_OFF, cmd::SET_INVERSE]
        );
    }

    #[test]
    fn test_custom_address() {
        let mut display = Ssd1306::with_address(MockBus::default(), 0x3D);
        display.init().unwrap();
        assert!(display.i2c.writes.iter().all(|(addr, _)| *addr == 0x3D));
    }
}
