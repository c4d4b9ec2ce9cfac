//! Button and limit-switch inputs for ESP32.
//!
//! All three inputs are momentary switches to ground, read active-low with
//! the internal pull-ups enabled. No software debounce; the polling loop's
//! read granularity is the only filtering.

use crate::traits::{ButtonInput, LimitSwitch};
use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

/// Momentary jog button for ESP32.
///
/// # Example
///
/// ```ignore
/// use rs_feedz::hal::esp32::Esp32Button;
/// use rs_feedz::traits::ButtonInput;
///
/// let peripherals = Peripherals::take()?;
/// let mut forward = Esp32Button::new(peripherals.pins.gpio22)?;
///
/// if forward.is_pressed() {
///     // jog
/// }
/// ```
pub struct Esp32Button<'d, P>
where
    P: InputPin + OutputPin,
{
    pin: PinDriver<'d, P, Input>,
}

impl<'d, P> Esp32Button<'d, P>
where
    P: InputPin + OutputPin,
{
    /// Creates a button input with the internal pull-up enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(pin: impl Peripheral<P = P> + 'd) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;
        Ok(Self { pin })
    }
}

impl<P> ButtonInput for Esp32Button<'_, P>
where
    P: InputPin + OutputPin,
{
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low() // Active low
    }
}

/// Reverse-travel limit switch for ESP32.
pub struct Esp32LimitSwitch<'d, P>
where
    P: InputPin + OutputPin,
{
    pin: PinDriver<'d, P, Input>,
}

impl<'d, P> Esp32LimitSwitch<'d, P>
where
    P: InputPin + OutputPin,
{
    /// Creates a limit-switch input with the internal pull-up enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(pin: impl Peripheral<P = P> + 'd) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;
        Ok(Self { pin })
    }
}

impl<P> LimitSwitch for Esp32LimitSwitch<'_, P>
where
    P: InputPin + OutputPin,
{
    fn is_engaged(&mut self) -> bool {
        self.pin.is_low() // Active low
    }
}
