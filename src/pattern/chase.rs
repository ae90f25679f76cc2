//! Single-pixel chase over both rings.

use embedded_hal::delay::DelayNs;

use super::{pace, Pattern, INTERVAL_SWAP_ODDS};
use crate::color::{BLACK, PALETTE};
use crate::control::ControlState;
use crate::rings::LED_COUNT;
use crate::rng::PatternRng;
use crate::FrameSink;

/// Every n-th pixel takes part in the spoke sweep phases
const SPOKE_STRIDE: usize = 4;

/// Chase pattern: one lit pixel walks the full strip, then every fourth
/// pixel lights up and winks out in a slower sweep.
///
/// Polls the run flag before every single pixel write, the finest
/// cancellation granularity of the set, bounded by one pixel interval.
#[derive(Debug, Clone, Default)]
pub struct ChasePattern;

impl ChasePattern {
    pub const fn new() -> Self {
        Self
    }
}

impl Pattern for ChasePattern {
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

        while ctl.is_running() {
            // Walking pixel, full strip.
            let color = PALETTE[rng.color_index() as usize];
            for i in 0..LED_COUNT {
                if !ctl.is_running() {
                    break;
                }
                sink.write(i, color)?;
                sink.flush()?;
                let (primary, _) = ctl.intervals();
                pace(delay, primary);
                if rng.one_in(INTERVAL_SWAP_ODDS) {
                    ctl.swap_intervals();
                }
                if !ctl.is_running() {
                    break;
                }
                sink.write(i, BLACK)?;
                sink.flush()?;
            }

            // Slow spoke sweep: light every fourth pixel...
            let color = PALETTE[rng.color_index() as usize];
            for i in (0..LED_COUNT).step_by(SPOKE_STRIDE) {
                if !ctl.is_running() {
                    break;
                }
                sink.write(i, color)?;
                sink.flush()?;
                let (_, secondary) = ctl.intervals();
                pace(delay, secondary);
                if rng.one_in(INTERVAL_SWAP_ODDS) {
                    ctl.swap_intervals();
                }
            }

            // ...then wink them out in the same order.
            for i in (0..LED_COUNT).step_by(SPOKE_STRIDE) {
                if !ctl.is_running() {
                    break;
                }
                sink.write(i, BLACK)?;
                sink.flush()?;
                let (_, secondary) = ctl.intervals();
                pace(delay, secondary);
            }
        }

        super::finish(ctl, sink)
    }
}
