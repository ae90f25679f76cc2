//! Carousel with random sparkle highlights.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

use super::orbit::RingCarousel;
use super::{pace, Pattern};
use crate::color::{brighten, PALETTE};
use crate::control::ControlState;
use crate::rings::LED_COUNT;
use crate::rng::PatternRng;
use crate::FrameSink;

/// Chance per pixel per frame of a sparkle highlight
const SPARKLE_PERCENT: u32 = 20;

/// Odds of swapping the pattern-local intervals, per step
const LOCAL_SWAP_ODDS: u32 = 25;

/// Pacing runs at 60 % of the shared intervals
const SPEED_NUM: u64 = 3;
const SPEED_DEN: u64 = 5;

fn speed_up(interval: Duration) -> Duration {
    Duration::from_ticks(interval.as_ticks() * SPEED_NUM / SPEED_DEN)
}

/// Sparkle pattern: the orbit carousel, sped up, with one pixel in five
/// replaced each frame by a random color at doubled brightness.
///
/// Works on pattern-local copies of the pacing intervals taken at entry,
/// so its interval swaps never disturb the shared pair. Polls the run
/// flag once per carousel step, like orbit.
#[derive(Debug, Clone)]
pub struct SparklePattern {
    carousel: RingCarousel,
}

impl SparklePattern {
    pub const fn new() -> Self {
        Self {
            carousel: RingCarousel::new(),
        }
    }
}

impl Default for SparklePattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for SparklePattern {
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

        let (primary, secondary) = ctl.intervals();
        let mut local = speed_up(primary);
        let mut local_slow = speed_up(secondary);

        while ctl.is_running() {
            pace(delay, local);
            if !ctl.is_running() {
                break;
            }

            self.carousel.paint(sink)?;
            for i in 0..LED_COUNT {
                if rng.percent(SPARKLE_PERCENT) {
                    let color = PALETTE[rng.color_index() as usize];
                    sink.write(i, brighten(color))?;
                }
            }
            sink.flush()?;

            self.carousel.rotate();
            self.carousel.maybe_flip(rng);
            if rng.one_in(LOCAL_SWAP_ODDS) {
                core::mem::swap(&mut local, &mut local_slow);
            }
        }

        super::finish(ctl, sink)
    }
}
