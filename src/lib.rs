#![no_std]

pub mod color;
pub mod control;
pub mod debounce;
pub mod pattern;
pub mod protocol;
pub mod rings;
pub mod rng;
pub mod supervisor;

pub use color::{BLACK, PALETTE, Rgb};
pub use control::{ControlHandle, ControlState, Selection};
pub use debounce::{DEBOUNCE_SETTLE, Debouncer, PressEvent};
pub use pattern::{PatternId, PatternSlot};
pub use protocol::{ButtonId, ControlMessage, Decoded, EventKind, LineReader, Notification};
pub use rng::PatternRng;
pub use supervisor::{AnimationSupervisor, SupervisorState};

pub use embassy_time::{Duration, Instant};

/// Abstract frame sink trait
///
/// The sink owns the full-frame pixel buffer; runners address it by pixel
/// index and make a frame visible with [`FrameSink::flush`]. Implement this
/// trait to support different hardware platforms. Failures are fatal to the
/// engine, so every operation reports them.
pub trait FrameSink {
    /// Sink failure type. Use [`core::convert::Infallible`] for sinks that
    /// cannot fail.
    type Error;

    /// Set a single pixel in the frame buffer
    fn write(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error>;

    /// Set every pixel in the frame buffer to one color
    fn fill(&mut self, color: Rgb) -> Result<(), Self::Error>;

    /// Make the buffered frame visible on the display
    fn flush(&mut self) -> Result<(), Self::Error>;
}
