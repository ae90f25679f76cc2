//! Alternating spoke flash.

use embedded_hal::delay::DelayNs;

use super::{blank, pace, Pattern};
use crate::color::PALETTE;
use crate::control::ControlState;
use crate::rings::{inner, outer, INNER_LEN, OUTER_LEN};
use crate::rng::PatternRng;
use crate::FrameSink;

/// Outer-ring spoke spacing (a spoke every 45°)
const OUTER_SPOKE_STEP: usize = OUTER_LEN / 8;

/// Inner-ring spoke spacing (a spoke every 45°)
const INNER_SPOKE_STEP: usize = INNER_LEN / 8;

/// Inner spokes sit half a step ahead of the outer ones
const INNER_SPOKE_OFFSET: usize = INNER_LEN / 16;

/// Pulse pattern: two-color spoke flash, colors trading rings each phase.
///
/// Polls the run flag at every spoke loop: per-phase granularity. A stop
/// landing at the start of a cycle still pays the rest of that cycle's
/// two pacing intervals before the exit path runs.
#[derive(Debug, Clone, Default)]
pub struct PulsePattern;

impl PulsePattern {
    pub const fn new() -> Self {
        Self
    }

    /// Light the spokes of one phase: `outer_color` on the outer ring,
    /// `inner_color` on the offset inner spokes.
    fn light_spokes<S: FrameSink>(
        ctl: &ControlState,
        sink: &mut S,
        outer_color: crate::Rgb,
        inner_color: crate::Rgb,
    ) -> Result<(), S::Error> {
        for i in (0..OUTER_LEN).step_by(OUTER_SPOKE_STEP) {
            if !ctl.is_running() {
                return Ok(());
            }
            sink.write(outer(i), outer_color)?;
        }
        for i in (INNER_SPOKE_OFFSET..INNER_LEN).step_by(INNER_SPOKE_STEP) {
            if !ctl.is_running() {
                return Ok(());
            }
            sink.write(inner(i), inner_color)?;
        }
        sink.flush()
    }
}

impl Pattern for PulsePattern {
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
            let first = PALETTE[rng.color_index() as usize];
            let second = PALETTE[rng.color_index() as usize];

            // First phase, then the same spokes with the colors traded.
            Self::light_spokes(ctl, sink, first, second)?;
            let (primary, _) = ctl.intervals();
            pace(delay, primary);
            blank(sink)?;

            Self::light_spokes(ctl, sink, second, first)?;
            let (primary, _) = ctl.intervals();
            pace(delay, primary);
            blank(sink)?;
        }

        super::finish(ctl, sink)
    }
}
