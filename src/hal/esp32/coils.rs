//! ULN2003 coil bank implementation using ESP32 GPIO outputs.
//!
//! The ULN2003 is a Darlington array: driving an input high energizes the
//! corresponding motor coil. The four inputs map one-to-one onto a phase
//! pattern's four entries.

use crate::traits::CoilDriver;
use esp_idf_hal::gpio::{Level, Output, OutputPin, PinDriver};
use esp_idf_hal::peripheral::Peripheral;

/// ULN2003-driven coil bank for ESP32.
///
/// # Example
///
/// ```ignore
/// use rs_feedz::hal::esp32::Esp32Coils;
/// use rs_feedz::traits::CoilDriver;
///
/// let peripherals = Peripherals::take()?;
/// let mut coils = Esp32Coils::new(
///     peripherals.pins.gpio33,
///     peripherals.pins.gpio25,
///     peripherals.pins.gpio27,
///     peripherals.pins.gpio14,
/// )?;
///
/// coils.energize([true, false, false, false])?;
/// coils.release()?;
/// ```
pub struct Esp32Coils<'d, P1, P2, P3, P4>
where
    P1: OutputPin,
    P2: OutputPin,
    P3: OutputPin,
    P4: OutputPin,
{
    in1: PinDriver<'d, P1, Output>,
    in2: PinDriver<'d, P2, Output>,
    in3: PinDriver<'d, P3, Output>,
    in4: PinDriver<'d, P4, Output>,
}

impl<'d, P1, P2, P3, P4> Esp32Coils<'d, P1, P2, P3, P4>
where
    P1: OutputPin,
    P2: OutputPin,
    P3: OutputPin,
    P4: OutputPin,
{
    /// Creates a new coil bank with all outputs driven low.
    ///
    /// # Arguments
    ///
    /// * `in1_pin`..`in4_pin` - GPIOs wired to ULN2003 IN1..IN4 (typically
    ///   GPIO33/25/27/14)
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(
        in1_pin: impl Peripheral<P = P1> + 'd,
        in2_pin: impl Peripheral<P = P2> + 'd,
        in3_pin: impl Peripheral<P = P3> + 'd,
        in4_pin: impl Peripheral<P = P4> + 'd,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut coils = Self {
            in1: PinDriver::output(in1_pin)?,
            in2: PinDriver::output(in2_pin)?,
            in3: PinDriver::output(in3_pin)?,
            in4: PinDriver::output(in4_pin)?,
        };

        // Start de-energized
        coils.release()?;

        Ok(coils)
    }
}

impl<P1, P2, P3, P4> CoilDriver for Esp32Coils<'_, P1, P2, P3, P4>
where
    P1: OutputPin,
    P2: OutputPin,
    P3: OutputPin,
    P4: OutputPin,
{
    type Error = esp_idf_hal::sys::EspError;

    fn energize(&mut self, pattern: [bool; 4]) -> Result<(), Self::Error> {
        self.in1.set_level(Level::from(pattern[0]))?;
        self.in2.set_level(Level::from(pattern[1]))?;
        self.in3.set_level(Level::from(pattern[2]))?;
        self.in4.set_level(Level::from(pattern[3]))?;
        Ok(())
    }
}
