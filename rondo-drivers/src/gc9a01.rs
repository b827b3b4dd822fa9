//! GC9A01 round LCD driver
//!
//! Driver for 240x240 round GC9A01 panels via SPI, drawn without a
//! framebuffer: fills and glyphs stream row-by-row into the panel RAM.
//! Text uses the 6x8 font with an integer scale factor.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;

use crate::font;

/// Panel dimensions
pub const WIDTH: u16 = 240;
pub const HEIGHT: u16 = 240;

/// Font cell dimensions at scale 1
pub const CHAR_W: u16 = 6;
pub const CHAR_H: u16 = 8;

const MAX_TEXT_SCALE: u16 = 8;

/// GC9A01 commands
#[allow(dead_code)]
mod cmd {
    pub const SLEEP_OUT: u8 = 0x11;
    pub const INVERSION_ON: u8 = 0x21;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDR: u8 = 0x2A;
    pub const ROW_ADDR: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const TEARING_ON: u8 = 0x35;
    pub const MADCTL: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
}

/// Vendor initialization sequence: (command, parameters)
const INIT_SEQ: &[(u8, &[u8])] = &[
    (0xEF, &[]),
    (0xEB, &[0x14]),
    (0xFE, &[]),
    (0xEF, &[]),
    (0xEB, &[0x14]),
    (0x84, &[0x40]),
    (0x85, &[0xFF]),
    (0x86, &[0xFF]),
    (0x87, &[0xFF]),
    (0x88, &[0x0A]),
    (0x89, &[0x21]),
    (0x8A, &[0x00]),
    (0x8B, &[0x80]),
    (0x8C, &[0x01]),
    (0x8D, &[0x01]),
    (0x8E, &[0xFF]),
    (0x8F, &[0xFF]),
    (0xB6, &[0x00, 0x20]),
    (cmd::MADCTL, &[0x08]),
    (cmd::PIXEL_FORMAT, &[0x05]),
    (0x90, &[0x08, 0x08, 0x08, 0x08]),
    (0xBD, &[0x06]),
    (0xBC, &[0x00]),
    (0xFF, &[0x60, 0x01, 0x04]),
    (0xC3, &[0x13]),
    (0xC4, &[0x13]),
    (0xC9, &[0x22]),
    (0xBE, &[0x11]),
    (0xE1, &[0x10, 0x0E]),
    (0xDF, &[0x21, 0x0C, 0x02]),
    (0xF0, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF1, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xF2, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF3, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xED, &[0x1B, 0x0B]),
    (0xAE, &[0x77]),
    (0xCD, &[0x63]),
    (0xE8, &[0x34]),
    (cmd::TEARING_ON, &[]),
    (cmd::INVERSION_ON, &[]),
];

/// GC9A01 panel driver
pub struct Gc9a01<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
}

impl<SPI, DC, CS, RST> Gc9a01<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Create a new GC9A01 driver
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST) -> Self {
        Self { spi, dc, cs, rst }
    }

    /// Hardware-reset and initialize the panel
    pub async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), SPI::Error> {
        let _ = self.rst.set_high();
        delay.delay_ms(5).await;
        let _ = self.rst.set_low();
        delay.delay_ms(10).await;
        let _ = self.rst.set_high();
        delay.delay_ms(120).await;

        for &(command, params) in INIT_SEQ {
            self.command(command, params).await?;
        }

        self.command(cmd::SLEEP_OUT, &[]).await?;
        delay.delay_ms(120).await;
        self.command(cmd::DISPLAY_ON, &[]).await?;
        delay.delay_ms(20).await;

        Ok(())
    }

    /// Send a command with its parameter bytes
    async fn command(&mut self, command: u8, params: &[u8]) -> Result<(), SPI::Error> {
        let _ = self.cs.set_low();
        let _ = self.dc.set_low();
        let result = self.spi.write(&[command]).await;
        if result.is_ok() && !params.is_empty() {
            let _ = self.dc.set_high();
            let result = self.spi.write(params).await;
            let _ = self.cs.set_high();
            return result;
        }
        let _ = self.cs.set_high();
        result
    }

    /// Address a drawing window (inclusive corners)
    async fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), SPI::Error> {
        self.command(
            cmd::COLUMN_ADDR,
            &[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8],
        )
        .await?;
        self.command(
            cmd::ROW_ADDR,
            &[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8],
        )
        .await
    }

    /// Fill a rectangle with a solid RGB565 color
    pub async fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: u16,
    ) -> Result<(), SPI::Error> {
        if w == 0 || h == 0 || x >= WIDTH || y >= HEIGHT {
            return Ok(());
        }
        let x1 = (x + w - 1).min(WIDTH - 1);
        let y1 = (y + h - 1).min(HEIGHT - 1);
        let row_px = (x1 - x + 1) as usize;

        self.set_window(x, y, x1, y1).await?;

        let mut row = [0u8; WIDTH as usize * 2];
        for px in 0..row_px {
            row[px * 2] = (color >> 8) as u8;
            row[px * 2 + 1] = color as u8;
        }

        let _ = self.cs.set_low();
        let _ = self.dc.set_low();
        self.spi.write(&[cmd::MEMORY_WRITE]).await?;
        let _ = self.dc.set_high();
        for _ in y..=y1 {
            self.spi.write(&row[..row_px * 2]).await?;
        }
        let _ = self.cs.set_high();

        Ok(())
    }

    /// Fill the whole panel
    pub async fn fill_screen(&mut self, color: u16) -> Result<(), SPI::Error> {
        self.fill_rect(0, 0, WIDTH, HEIGHT, color).await
    }

    /// Fill a circle (used pairwise to draw rings)
    pub async fn fill_circle(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        color: u16,
    ) -> Result<(), SPI::Error> {
        for dy in -r..=r {
            let half = isqrt(r * r - dy * dy);
            let y = cy + dy;
            if y < 0 || y >= HEIGHT as i32 {
                continue;
            }
            let x0 = (cx - half).max(0);
            let x1 = (cx + half).min(WIDTH as i32 - 1);
            if x1 < x0 {
                continue;
            }
            self.fill_rect(x0 as u16, y as u16, (x1 - x0 + 1) as u16, 1, color)
                .await?;
        }
        Ok(())
    }

    /// Draw text at a pixel position with an integer scale factor
    ///
    /// Glyph cells are 6x8 at scale 1; the background color is painted
    /// behind every cell so text overdraws cleanly.
    pub async fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        scale: u16,
        fg: u16,
        bg: u16,
    ) -> Result<(), SPI::Error> {
        let scale = scale.clamp(1, MAX_TEXT_SCALE);
        let mut cx = x;
        for ch in text.chars() {
            if cx + CHAR_W * scale > WIDTH {
                break;
            }
            self.draw_char(cx, y, ch, scale, fg, bg).await?;
            cx += CHAR_W * scale;
        }
        Ok(())
    }

    /// Draw one scaled glyph cell
    async fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        scale: u16,
        fg: u16,
        bg: u16,
    ) -> Result<(), SPI::Error> {
        let glyph = font::glyph(ch);
        let cell_w = CHAR_W * scale;
        let x1 = x + cell_w - 1;
        let y1 = (y + CHAR_H * scale - 1).min(HEIGHT - 1);

        self.set_window(x, y, x1, y1).await?;

        let _ = self.cs.set_low();
        let _ = self.dc.set_low();
        self.spi.write(&[cmd::MEMORY_WRITE]).await?;
        let _ = self.dc.set_high();

        let mut row = [0u8; (CHAR_W * MAX_TEXT_SCALE * 2) as usize];
        for font_row in 0..CHAR_H {
            for col in 0..CHAR_W {
                let lit = glyph[col as usize] >> font_row & 1 != 0;
                let color = if lit { fg } else { bg };
                for sub in 0..scale {
                    let px = (col * scale + sub) as usize;
                    row[px * 2] = (color >> 8) as u8;
                    row[px * 2 + 1] = color as u8;
                }
            }
            for _ in 0..scale {
                self.spi.write(&row[..(cell_w * 2) as usize]).await?;
            }
        }

        let _ = self.cs.set_high();
        Ok(())
    }
}

/// Integer square root (circle span rasterization)
fn isqrt(v: i32) -> i32 {
    if v <= 0 {
        return 0;
    }
    let mut root = v;
    let mut next = (root + 1) / 2;
    while next < root {
        root = next;
        next = (root + v / root) / 2;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(8100), 90);
        assert_eq!(isqrt(8099), 89);
    }
}
