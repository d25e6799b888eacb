//! ILI9341 TFT Driver
//!
//! Driver for 240x320 ILI9341-based TFT panels over 4-wire SPI
//! (blocking writes, DC/CS/reset on GPIO). Implements the core
//! [`DisplayDriver`] trait; draw requests outside the panel are clipped
//! rather than rejected.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use graphis_core::config::DisplayGeometry;
use graphis_core::palette::Rgb565;
use graphis_core::traits::DisplayDriver;

/// ILI9341 commands
#[allow(dead_code)]
mod cmd {
    pub const SW_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDR: u8 = 0x2A;
    pub const PAGE_ADDR: u8 = 0x2B;
    pub const RAM_WRITE: u8 = 0x2C;
    pub const MEM_ACCESS_CTRL: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
    pub const FRAME_RATE_CTRL: u8 = 0xB1;
    pub const DISPLAY_FUNC_CTRL: u8 = 0xB6;
    pub const POWER_CTRL_1: u8 = 0xC0;
    pub const POWER_CTRL_2: u8 = 0xC1;
    pub const VCOM_CTRL_1: u8 = 0xC5;
    pub const VCOM_CTRL_2: u8 = 0xC7;
}

/// MADCTL value for portrait 240x320: column order flipped, BGR panel
const MADCTL_PORTRAIT_BGR: u8 = 0x48;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiE, PinE> {
    /// SPI bus error
    Spi(SpiE),
    /// Control pin error
    Pin(PinE),
}

/// ILI9341 TFT driver
pub struct Ili9341<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    geometry: DisplayGeometry,
}

impl<SPI, DC, CS, RST> Ili9341<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin<Error = DC::Error>,
    RST: OutputPin<Error = DC::Error>,
{
    /// Create a new driver over the given bus and control pins
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, geometry: DisplayGeometry) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            geometry,
        }
    }

    /// Panel dimensions this driver was created with
    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// Hardware reset followed by the panel init sequence
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<SPI::Error, DC::Error>> {
        self.rst.set_high().map_err(Error::Pin)?;
        delay.delay_ms(5);
        self.rst.set_low().map_err(Error::Pin)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(Error::Pin)?;
        delay.delay_ms(120);

        self.command(cmd::POWER_CTRL_1, &[0x23])?;
        self.command(cmd::POWER_CTRL_2, &[0x10])?;
        self.command(cmd::VCOM_CTRL_1, &[0x3E, 0x28])?;
        self.command(cmd::VCOM_CTRL_2, &[0x86])?;
        self.command(cmd::MEM_ACCESS_CTRL, &[MADCTL_PORTRAIT_BGR])?;
        self.command(cmd::PIXEL_FORMAT, &[0x55])?; // 16 bits per pixel
        self.command(cmd::FRAME_RATE_CTRL, &[0x00, 0x18])?;
        self.command(cmd::DISPLAY_FUNC_CTRL, &[0x08, 0x82, 0x27])?;

        self.command(cmd::SLEEP_OUT, &[])?;
        delay.delay_ms(120);
        self.command(cmd::DISPLAY_ON, &[])?;

        Ok(())
    }

    /// Send a command byte followed by its parameter bytes
    fn command(&mut self, cmd: u8, args: &[u8]) -> Result<(), Error<SPI::Error, DC::Error>> {
        self.cs.set_low().map_err(Error::Pin)?;

        let result = self.command_inner(cmd, args);

        // Always release the bus, even on a failed transfer
        let cs_result = self.cs.set_high().map_err(Error::Pin);
        result.and(cs_result)
    }

    fn command_inner(&mut self, cmd: u8, args: &[u8]) -> Result<(), Error<SPI::Error, DC::Error>> {
        self.dc.set_low().map_err(Error::Pin)?;
        self.spi.write(&[cmd]).map_err(Error::Spi)?;
        self.dc.set_high().map_err(Error::Pin)?;
        if !args.is_empty() {
            self.spi.write(args).map_err(Error::Spi)?;
        }
        self.spi.flush().map_err(Error::Spi)
    }

    /// Set the RAM write window to an inclusive rectangle
    fn set_window(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), Error<SPI::Error, DC::Error>> {
        self.command(
            cmd::COLUMN_ADDR,
            &[(x1 >> 8) as u8, x1 as u8, (x2 >> 8) as u8, x2 as u8],
        )?;
        self.command(
            cmd::PAGE_ADDR,
            &[(y1 >> 8) as u8, y1 as u8, (y2 >> 8) as u8, y2 as u8],
        )
    }

    /// Stream `count` pixels of one color into the current window
    fn write_pixels(
        &mut self,
        color: Rgb565,
        count: u32,
    ) -> Result<(), Error<SPI::Error, DC::Error>> {
        let [hi, lo] = color.0.to_be_bytes();
        let mut chunk = [0u8; 64];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        self.cs.set_low().map_err(Error::Pin)?;
        let result = (|| -> Result<(), Error<SPI::Error, DC::Error>> {
            self.dc.set_low().map_err(Error::Pin)?;
            self.spi.write(&[cmd::RAM_WRITE]).map_err(Error::Spi)?;
            self.dc.set_high().map_err(Error::Pin)?;

            let mut remaining = count as usize * 2;
            while remaining > 0 {
                let n = remaining.min(chunk.len());
                self.spi.write(&chunk[..n]).map_err(Error::Spi)?;
                remaining -= n;
            }
            self.spi.flush().map_err(Error::Spi)
        })();

        let cs_result = self.cs.set_high().map_err(Error::Pin);
        result.and(cs_result)
    }

    /// Clip an inclusive rectangle to the panel; None if fully outside
    fn clip(&self, x1: u16, y1: u16, x2: u16, y2: u16) -> Option<(u16, u16, u16, u16)> {
        if x1 >= self.geometry.width || y1 >= self.geometry.height || x2 < x1 || y2 < y1 {
            return None;
        }
        Some((
            x1,
            y1,
            x2.min(self.geometry.width - 1),
            y2.min(self.geometry.height - 1),
        ))
    }
}

impl<SPI, DC, CS, RST> DisplayDriver for Ili9341<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin<Error = DC::Error>,
    RST: OutputPin<Error = DC::Error>,
{
    type Error = Error<SPI::Error, DC::Error>;

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        let (w, h) = (self.geometry.width, self.geometry.height);
        self.set_window(0, 0, w - 1, h - 1)?;
        self.write_pixels(color, w as u32 * h as u32)
    }

    fn draw_point(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), Self::Error> {
        if x >= self.geometry.width || y >= self.geometry.height {
            return Ok(());
        }
        self.set_window(x, y, x, y)?;
        self.write_pixels(color, 1)
    }

    fn fill_rect(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        let Some((x1, y1, x2, y2)) = self.clip(x1, y1, x2, y2) else {
            return Ok(());
        };
        self.set_window(x1, y1, x2, y2)?;
        let count = (x2 - x1 + 1) as u32 * (y2 - y1 + 1) as u32;
        self.write_pixels(color, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    /// Bus-level events shared between the SPI and pin stubs
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        CsLow,
        CsHigh,
        Command(u8),
        Data(Vec<u8>),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct SpiStub {
        log: Log,
        dc_high: Rc<RefCell<bool>>,
    }

    impl embedded_hal::spi::ErrorType for SpiStub {
        type Error = Infallible;
    }

    impl SpiBus<u8> for SpiStub {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
            let mut log = self.log.borrow_mut();
            if *self.dc_high.borrow() {
                // Coalesce consecutive data writes like the panel sees them
                if let Some(Event::Data(buf)) = log.last_mut() {
                    buf.extend_from_slice(words);
                } else {
                    log.push(Event::Data(words.to_vec()));
                }
            } else {
                for &b in words {
                    log.push(Event::Command(b));
                }
            }
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct DcStub {
        dc_high: Rc<RefCell<bool>>,
    }

    impl embedded_hal::digital::ErrorType for DcStub {
        type Error = Infallible;
    }

    impl OutputPin for DcStub {
        fn set_low(&mut self) -> Result<(), Infallible> {
            *self.dc_high.borrow_mut() = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            *self.dc_high.borrow_mut() = true;
            Ok(())
        }
    }

    struct CsStub {
        log: Log,
    }

    impl embedded_hal::digital::ErrorType for CsStub {
        type Error = Infallible;
    }

    impl OutputPin for CsStub {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push(Event::CsLow);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push(Event::CsHigh);
            Ok(())
        }
    }

    struct NullPin;

    impl embedded_hal::digital::ErrorType for NullPin {
        type Error = Infallible;
    }

    impl OutputPin for NullPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    fn display() -> (Ili9341<SpiStub, DcStub, CsStub, NullPin>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let dc_high = Rc::new(RefCell::new(false));
        let spi = SpiStub {
            log: log.clone(),
            dc_high: dc_high.clone(),
        };
        let dc = DcStub { dc_high };
        let cs = CsStub { log: log.clone() };
        let d = Ili9341::new(spi, dc, cs, NullPin, DisplayGeometry::default());
        (d, log)
    }

    #[test]
    fn draw_point_frames_window_and_color() {
        let (mut d, log) = display();
        d.draw_point(100, 200, Rgb565(0xF800)).unwrap();

        let events = log.borrow();
        assert_eq!(
            events.as_slice(),
            &[
                Event::CsLow,
                Event::Command(cmd::COLUMN_ADDR),
                Event::Data(std::vec![0x00, 100, 0x00, 100]),
                Event::CsHigh,
                Event::CsLow,
                Event::Command(cmd::PAGE_ADDR),
                Event::Data(std::vec![0x00, 200, 0x00, 200]),
                Event::CsHigh,
                Event::CsLow,
                Event::Command(cmd::RAM_WRITE),
                Event::Data(std::vec![0xF8, 0x00]),
                Event::CsHigh,
            ]
        );
    }

    #[test]
    fn page_address_splits_16_bit_rows() {
        let (mut d, log) = display();
        d.draw_point(0, 300, Rgb565(0xFFFF)).unwrap();

        let events = log.borrow();
        assert!(events.contains(&Event::Data(std::vec![0x01, 0x2C, 0x01, 0x2C])));
    }

    #[test]
    fn out_of_bounds_point_is_clipped() {
        let (mut d, log) = display();
        d.draw_point(240, 10, Rgb565(0xFFFF)).unwrap();
        d.draw_point(10, 320, Rgb565(0xFFFF)).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn fill_rect_streams_every_pixel() {
        let (mut d, log) = display();
        d.fill_rect(0, 0, 3, 1, Rgb565(0x07E0)).unwrap();

        let events = log.borrow();
        // 4x2 inclusive rectangle = 8 pixels = 16 bytes
        let pixels = data_after(&events, cmd::RAM_WRITE).expect("no pixel data written");
        assert_eq!(pixels.len(), 16);
        assert!(pixels.chunks(2).all(|p| p == [0x07, 0xE0]));
    }

    #[test]
    fn fill_rect_clips_to_panel() {
        let (mut d, log) = display();
        d.fill_rect(238, 318, 500, 500, Rgb565(0x0000)).unwrap();

        let events = log.borrow();
        assert!(events.contains(&Event::Data(std::vec![0x00, 238, 0x00, 239])));
        // 2x2 pixels survive the clip
        let pixels = data_after(&events, cmd::RAM_WRITE).expect("no pixel data written");
        assert_eq!(pixels.len(), 8);
    }

    /// Data bytes that followed a given command byte
    fn data_after(events: &[Event], command: u8) -> Option<&[u8]> {
        let idx = events.iter().position(|e| *e == Event::Command(command))?;
        match events.get(idx + 1) {
            Some(Event::Data(bytes)) => Some(bytes),
            _ => None,
        }
    }
}
