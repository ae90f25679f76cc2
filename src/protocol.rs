//! Line-delimited JSON control and telemetry boundary.
//!
//! Inbound: newline-terminated JSON objects; the only recognized shape is
//! `{"led":{"pattern":<0..3>}}`. Everything else (malformed JSON, wrong
//! shape, out-of-range id) decodes to an explicit [`Decoded::Unrecognized`]
//! and never reaches the engine as an error. Outbound: one JSON object per
//! notification, `{"time":<s>,"event":...,"state":...}`. The transport
//! (UART, USB CDC, stdin) stays outside the crate; [`LineReader`] only
//! assembles bytes into lines.

use embassy_time::Instant;
use heapless::Vec;
use serde::{Deserialize, Serialize};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::pattern::PatternId;

/// Decoded inbound control request
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct ControlMessage {
    pub led: LedCommand,
}

/// The `led` object of a control request
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct LedCommand {
    pub pattern: u8,
}

/// Result of decoding one inbound line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A valid pattern request
    SelectPattern(PatternId),
    /// Anything else; log and drop
    Unrecognized,
}

/// Decode one line into a typed control request.
///
/// Leading/trailing ASCII whitespace (including a CR left by the line
/// reader) is ignored.
pub fn decode_line(line: &[u8]) -> Decoded {
    let line = line.trim_ascii();
    match serde_json_core::from_slice::<ControlMessage>(line) {
        Ok((message, _)) => match PatternId::from_raw(message.led.pattern) {
            Some(id) => Decoded::SelectPattern(id),
            None => {
                #[cfg(feature = "esp32-log")]
                println!("control: pattern {} out of range", message.led.pattern);
                Decoded::Unrecognized
            }
        },
        Err(_) => {
            #[cfg(feature = "esp32-log")]
            println!("control: unrecognized line");
            Decoded::Unrecognized
        }
    }
}

/// Assembles raw bytes into newline-terminated lines.
///
/// A line longer than `CAP` is dropped wholesale: the reader swallows
/// bytes until the next newline and starts clean. The returned slice
/// stays valid until the next `push`.
#[derive(Debug)]
pub struct LineReader<const CAP: usize> {
    buf: Vec<u8, CAP>,
    ready: bool,
    overflowed: bool,
}

impl<const CAP: usize> LineReader<CAP> {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            ready: false,
            overflowed: false,
        }
    }

    /// Feed one byte; returns the completed line when `byte` is a newline.
    ///
    /// The newline itself is not part of the returned line.
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        if self.ready {
            self.buf.clear();
            self.ready = false;
        }

        if byte == b'\n' {
            if self.overflowed {
                self.overflowed = false;
                self.buf.clear();
                return None;
            }
            self.ready = true;
            return Some(&self.buf);
        }

        if !self.overflowed && self.buf.push(byte).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("control: line overflow, dropping");
            self.overflowed = true;
            self.buf.clear();
        }
        None
    }
}

impl<const CAP: usize> Default for LineReader<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outbound notification class
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Button,
    System,
    Error,
}

/// Which physical button fired
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonId {
    Start,
    Main,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum EventState<'a> {
    Button { button: ButtonId, pressed: bool },
    Message { mesg: &'a str },
}

/// One outbound telemetry line: `{"time":<s>,"event":...,"state":...}`
#[derive(Debug, Serialize)]
pub struct Notification<'a> {
    time: f64,
    event: EventKind,
    state: EventState<'a>,
}

impl<'a> Notification<'a> {
    /// A debounced button press
    pub fn button(now: Instant, button: ButtonId) -> Self {
        Self {
            time: seconds(now),
            event: EventKind::Button,
            state: EventState::Button {
                button,
                pressed: true,
            },
        }
    }

    /// A system message (pattern acknowledgments, shutdown notices)
    pub fn system(now: Instant, mesg: &'a str) -> Self {
        Self {
            time: seconds(now),
            event: EventKind::System,
            state: EventState::Message { mesg },
        }
    }

    /// A fatal engine error report
    pub fn error(now: Instant, mesg: &'a str) -> Self {
        Self {
            time: seconds(now),
            event: EventKind::Error,
            state: EventState::Message { mesg },
        }
    }

    /// Serialize to a JSON object (no trailing newline)
    pub fn to_json<const N: usize>(
        &self,
    ) -> Result<heapless::String<N>, serde_json_core::ser::Error> {
        serde_json_core::to_string(self)
    }
}

/// Uptime as fractional seconds, the wire format of `time`
#[allow(clippy::cast_precision_loss)]
fn seconds(now: Instant) -> f64 {
    now.as_millis() as f64 / 1000.0
}
