//! Debounced push-button edge detection.
//!
//! Mechanical buttons bounce: a single press shows up as a burst of level
//! changes. The detector accepts a level change only if it survives a
//! settle window, and reports each physical press exactly once no matter
//! how often the held button is sampled.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Default settle window for suspected level changes
pub const DEBOUNCE_SETTLE: Duration = Duration::from_millis(10);

/// Emitted once per physical button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressEvent;

/// Per-input debouncer and rising-edge detector.
///
/// Buttons are wired active-low (pulled up, pressed shorts to ground);
/// `is_low` is therefore the pressed level. Sample at a steady cadence;
/// the settle re-check only costs time when the raw level disagrees with
/// the debounced state.
#[derive(Debug)]
pub struct Debouncer {
    pressed: bool,
    edge_reported: bool,
    settle: Duration,
}

impl Debouncer {
    /// Create a debouncer with the given settle window
    pub const fn new(settle: Duration) -> Self {
        Self {
            pressed: false,
            edge_reported: false,
            settle,
        }
    }

    /// Debounced level after the last [`sample`](Self::sample)
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Take one sample of the input.
    ///
    /// Returns `Ok(Some(PressEvent))` exactly once per press: on the
    /// sample where the debounced level transitions to pressed. Holding
    /// the button never repeat-fires; releasing emits nothing and re-arms
    /// the detector. A glitch that does not outlive the settle window
    /// leaves the debounced level untouched.
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample<P, D>(
        &mut self,
        pin: &mut P,
        delay: &mut D,
    ) -> Result<Option<PressEvent>, P::Error>
    where
        P: InputPin,
        D: DelayNs,
    {
        if pin.is_low()? != self.pressed {
            // Suspected transition: wait out the settle window and only
            // accept the new level if it is still there.
            delay.delay_us(self.settle.as_micros() as u32);
            if pin.is_low()? != self.pressed {
                self.pressed = !self.pressed;
            }
        }

        if self.pressed && !self.edge_reported {
            self.edge_reported = true;
            return Ok(Some(PressEvent));
        }
        if !self.pressed {
            self.edge_reported = false;
        }
        Ok(None)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_SETTLE)
    }
}
