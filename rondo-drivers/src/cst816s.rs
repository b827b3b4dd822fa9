//! CST816S capacitive touch controller driver
//!
//! Minimal polled reader for the single-touch CST816S found behind round
//! GC9A01 panels. Reports the current touch point, or `None` when the
//! surface is not being touched; edge detection is the caller's job.

use embedded_hal_async::i2c::I2c;

/// CST816S I2C address
pub const CST816S_ADDR: u8 = 0x15;

/// First touch data register (gesture, finger count, then the point)
const REG_GESTURE: u8 = 0x01;

/// A touch point in panel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

/// CST816S driver
pub struct Cst816s<I2C> {
    i2c: I2C,
}

impl<I2C> Cst816s<I2C>
where
    I2C: I2c,
{
    /// Create a new touch reader
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Read the current touch point, if any finger is down
    pub async fn read_touch(&mut self) -> Result<Option<TouchPoint>, I2C::Error> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(CST816S_ADDR, &[REG_GESTURE], &mut buf)
            .await?;

        let fingers = buf[1] & 0x0F;
        if fingers == 0 {
            return Ok(None);
        }

        // 12-bit coordinates, high nibble in the even registers
        let x = ((buf[2] & 0x0F) as u16) << 8 | buf[3] as u16;
        let y = ((buf[4] & 0x0F) as u16) << 8 | buf[5] as u16;

        Ok(Some(TouchPoint { x, y }))
    }
}
