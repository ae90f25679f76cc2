//! Pattern system with compile-time known pattern variants
//!
//! All patterns are stored in an enum to avoid heap allocations. Each
//! pattern implements the [`Pattern`] trait: a blocking rendering loop
//! that polls the shared run flag and always leaves the display blanked
//! when it returns cleanly.

mod chase;
mod orbit;
mod pulse;
mod sparkle;

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

pub use chase::ChasePattern;
pub use orbit::OrbitPattern;
pub use pulse::PulsePattern;
pub use sparkle::SparklePattern;

use crate::color::BLACK;
use crate::control::ControlState;
use crate::rng::PatternRng;
use crate::FrameSink;

const PATTERN_NAME_CHASE: &str = "chase";
const PATTERN_NAME_ORBIT: &str = "orbit";
const PATTERN_NAME_PULSE: &str = "pulse";
const PATTERN_NAME_SPARKLE: &str = "sparkle";

const PATTERN_ID_CHASE: u8 = 0;
const PATTERN_ID_ORBIT: u8 = 1;
const PATTERN_ID_PULSE: u8 = 2;
const PATTERN_ID_SPARKLE: u8 = 3;

/// Odds of swapping the shared pacing intervals, per rendering step
pub(crate) const INTERVAL_SWAP_ODDS: u32 = 54;

/// Odds of reversing the rotation direction, per carousel step
pub(crate) const DIRECTION_FLIP_ODDS: u32 = 54;

pub trait Pattern {
    /// Run the rendering loop until the shared run flag is cleared.
    ///
    /// The contract every pattern follows:
    /// 1. re-arm the run flag and restore interval ordering on entry;
    /// 2. render steps, polling the run flag at least once per step
    ///    (each pattern fixes its own polling granularity, and with it
    ///    its own worst-case cancellation latency);
    /// 3. on a cleared flag: blank the whole frame, flush, re-arm,
    ///    return `Ok(())`.
    ///
    /// Sink failures propagate immediately; the supervisor handles the
    /// final blank attempt on that path.
    fn run<S, D>(
        &mut self,
        ctl: &ControlState,
        sink: &mut S,
        delay: &mut D,
        rng: &mut PatternRng,
    ) -> Result<(), S::Error>
    where
        S: FrameSink,
        D: DelayNs;
}

/// Pattern slot - enum containing all possible patterns
#[derive(Debug, Clone)]
pub enum PatternSlot {
    /// Single-pixel chase over both rings
    Chase(ChasePattern),
    /// Counter-rotating ring carousel
    Orbit(OrbitPattern),
    /// Alternating spoke flash
    Pulse(PulsePattern),
    /// Carousel with random doubled-brightness sparkles
    Sparkle(SparklePattern),
}

/// Known pattern ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternId {
    Chase = PATTERN_ID_CHASE,
    Orbit = PATTERN_ID_ORBIT,
    Pulse = PATTERN_ID_PULSE,
    Sparkle = PATTERN_ID_SPARKLE,
}

impl PatternId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_CHASE => Self::Chase,
            PATTERN_ID_ORBIT => Self::Orbit,
            PATTERN_ID_PULSE => Self::Pulse,
            PATTERN_ID_SPARKLE => Self::Sparkle,
            _ => return None,
        })
    }

    /// Build a slot with fresh pattern-local state.
    ///
    /// Dispatching through a new slot is what makes re-selecting the
    /// active pattern a restart rather than a no-op.
    pub fn to_slot(self) -> PatternSlot {
        match self {
            Self::Chase => PatternSlot::Chase(ChasePattern::new()),
            Self::Orbit => PatternSlot::Orbit(OrbitPattern::new()),
            Self::Pulse => PatternSlot::Pulse(PulsePattern::new()),
            Self::Sparkle => PatternSlot::Sparkle(SparklePattern::new()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chase => PATTERN_NAME_CHASE,
            Self::Orbit => PATTERN_NAME_ORBIT,
            Self::Pulse => PATTERN_NAME_PULSE,
            Self::Sparkle => PATTERN_NAME_SPARKLE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_CHASE => Some(Self::Chase),
            PATTERN_NAME_ORBIT => Some(Self::Orbit),
            PATTERN_NAME_PULSE => Some(Self::Pulse),
            PATTERN_NAME_SPARKLE => Some(Self::Sparkle),
            _ => None,
        }
    }
}

impl PatternSlot {
    /// Run the current pattern (see [`Pattern::run`])
    pub fn run<S, D>(
        &mut self,
        ctl: &ControlState,
        sink: &mut S,
        delay: &mut D,
        rng: &mut PatternRng,
    ) -> Result<(), S::Error>
    where
        S: FrameSink,
        D: DelayNs,
    {
        match self {
            Self::Chase(pattern) => pattern.run(ctl, sink, delay, rng),
            Self::Orbit(pattern) => pattern.run(ctl, sink, delay, rng),
            Self::Pulse(pattern) => pattern.run(ctl, sink, delay, rng),
            Self::Sparkle(pattern) => pattern.run(ctl, sink, delay, rng),
        }
    }

    /// Get the pattern ID for external observation
    pub fn id(&self) -> PatternId {
        match self {
            Self::Chase(_) => PatternId::Chase,
            Self::Orbit(_) => PatternId::Orbit,
            Self::Pulse(_) => PatternId::Pulse,
            Self::Sparkle(_) => PatternId::Sparkle,
        }
    }
}

/// Write an all-off frame and flush it
pub(crate) fn blank<S: FrameSink>(sink: &mut S) -> Result<(), S::Error> {
    sink.fill(BLACK)?;
    sink.flush()
}

/// Common clean-exit path: blank the display, then re-arm the run flag
/// so the next runner's entry arm is a no-op.
pub(crate) fn finish<S: FrameSink>(
    ctl: &ControlState,
    sink: &mut S,
) -> Result<(), S::Error> {
    blank(sink)?;
    ctl.arm();
    Ok(())
}

/// Block for one pacing interval
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn pace<D: DelayNs>(delay: &mut D, interval: Duration) {
    delay.delay_us(interval.as_micros() as u32);
}
