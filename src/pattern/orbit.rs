//! Counter-rotating ring carousel.

use embedded_hal::delay::DelayNs;

use super::{pace, Pattern, DIRECTION_FLIP_ODDS, INTERVAL_SWAP_ODDS};
use crate::color::{OFF_INDEX, PALETTE};
use crate::control::ControlState;
use crate::rings::{inner, outer, INNER_LEN, OUTER_LEN};
use crate::rng::PatternRng;
use crate::FrameSink;

/// Outer-ring spoke spacing (a spoke every 90°)
const OUTER_SPOKE_STEP: usize = OUTER_LEN / 4;

/// Offset of the second outer spoke set (45° between the two sets)
const OUTER_SPOKE_OFFSET: usize = OUTER_LEN / 8;

/// Inner-ring spoke spacing (a spoke every 90°)
const INNER_SPOKE_STEP: usize = INNER_LEN / 4;

/// Rotation sense of the carousel; the two rings always turn opposite ways
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub(crate) fn flip(&mut self) {
        *self = match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        };
    }
}

/// Palette-index buffers for both rings plus the rotation state.
///
/// Shared between [`OrbitPattern`] and the sparkle variant: the rings hold
/// palette indices (black = unlit) and advance one pixel per step, the
/// outer ring one way and the inner ring the other.
#[derive(Debug, Clone)]
pub(crate) struct RingCarousel {
    outer: [u8; OUTER_LEN],
    inner: [u8; INNER_LEN],
    direction: Direction,
}

impl RingCarousel {
    pub(crate) const fn new() -> Self {
        Self {
            outer: [OFF_INDEX; OUTER_LEN],
            inner: [OFF_INDEX; INNER_LEN],
            direction: Direction::Clockwise,
        }
    }

    /// Lay out the initial spokes.
    ///
    /// Outer ring: one color on the 90° spokes, a second color on the
    /// 45°-offset spokes. Inner ring: an independent random color per
    /// 90° spoke.
    pub(crate) fn seed(&mut self, rng: &mut PatternRng) {
        self.outer = [OFF_INDEX; OUTER_LEN];
        self.inner = [OFF_INDEX; INNER_LEN];
        self.direction = Direction::Clockwise;

        let color = rng.color_index();
        for i in (0..OUTER_LEN).step_by(OUTER_SPOKE_STEP) {
            self.outer[i] = color;
        }
        let color = rng.color_index();
        for i in (OUTER_SPOKE_OFFSET..OUTER_LEN).step_by(OUTER_SPOKE_STEP) {
            self.outer[i] = color;
        }
        for i in (0..INNER_LEN).step_by(INNER_SPOKE_STEP) {
            self.inner[i] = rng.color_index();
        }
    }

    /// Pixel color at an outer-ring position
    pub(crate) fn outer_color(&self, index: usize) -> crate::Rgb {
        PALETTE[self.outer[index] as usize]
    }

    /// Pixel color at an inner-ring position
    pub(crate) fn inner_color(&self, index: usize) -> crate::Rgb {
        PALETTE[self.inner[index] as usize]
    }

    /// Write the whole carousel frame to the sink (no flush)
    pub(crate) fn paint<S: FrameSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        for i in 0..OUTER_LEN {
            sink.write(outer(i), self.outer_color(i))?;
        }
        for i in 0..INNER_LEN {
            sink.write(inner(i), self.inner_color(i))?;
        }
        Ok(())
    }

    /// Advance both rings one pixel in their current senses
    pub(crate) fn rotate(&mut self) {
        match self.direction {
            Direction::Clockwise => {
                self.outer.rotate_right(1);
                self.inner.rotate_left(1);
            }
            Direction::CounterClockwise => {
                self.outer.rotate_left(1);
                self.inner.rotate_right(1);
            }
        }
    }

    /// Occasionally reverse the rotation sense
    pub(crate) fn maybe_flip(&mut self, rng: &mut PatternRng) {
        if rng.one_in(DIRECTION_FLIP_ODDS) {
            self.direction.flip();
        }
    }
}

/// Orbit pattern: spoked rings slowly turning against each other.
///
/// Polls the run flag once per carousel step (one whole-frame redraw):
/// coarse granularity, bounded by a single primary interval plus the
/// frame write.
#[derive(Debug, Clone)]
pub struct OrbitPattern {
    carousel: RingCarousel,
}

impl OrbitPattern {
    pub const fn new() -> Self {
        Self {
            carousel: RingCarousel::new(),
        }
    }
}

impl Default for OrbitPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for OrbitPattern {
    fn run<S, D>(
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
        ctl.arm();
        ctl.order_intervals();
        self.carousel.seed(rng);

        while ctl.is_running() {
            let (primary, _) = ctl.intervals();
            pace(delay, primary);
            if !ctl.is_running() {
                break;
            }

            self.carousel.paint(sink)?;
            sink.flush()?;
            self.carousel.rotate();
            self.carousel.maybe_flip(rng);
            if rng.one_in(INTERVAL_SWAP_ODDS) {
                ctl.swap_intervals();
            }
        }

        super::finish(ctl, sink)
    }
}
