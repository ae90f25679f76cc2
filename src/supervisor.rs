//! Background dispatch loop.
//!
//! Owns the sink, the delay provider and the RNG for the lifetime of the
//! engine. Repeatedly reads the shared selection, runs the matching
//! pattern until it is told to stop, and re-dispatches. The runners own
//! the clean blank-on-exit path; the supervisor owns the final blank on
//! shutdown and on the fatal sink-failure path.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::control::{ControlState, Selection};
use crate::pattern::{blank, pace, PatternId};
use crate::rng::PatternRng;
use crate::FrameSink;

/// Pause between a runner returning and the next dispatch
const DISPATCH_PAUSE: Duration = Duration::from_millis(100);

/// Supervisor life-cycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// Created, `run` not yet called
    Idle,
    /// A runner is active
    Running(PatternId),
    /// Stop observed or sink failed; no way back
    ShuttingDown,
}

/// The background execution context of the engine.
///
/// `run` blocks until shutdown; the embedding gives it a dedicated thread,
/// task or core. Exactly one supervisor drives a given [`ControlState`]:
/// runner dispatch is strictly sequential through `&mut self`, which is
/// what keeps the single run-flag arm/re-arm protocol sound.
pub struct AnimationSupervisor<S, D> {
    sink: S,
    delay: D,
    rng: PatternRng,
    state: SupervisorState,
}

impl<S, D> AnimationSupervisor<S, D>
where
    S: FrameSink,
    D: DelayNs,
{
    /// Create a supervisor over a sink and a delay provider.
    ///
    /// `seed` feeds the pattern RNG; pass hardware entropy where
    /// available.
    pub const fn new(sink: S, delay: D, seed: u64) -> Self {
        Self {
            sink,
            delay,
            rng: PatternRng::new(seed),
            state: SupervisorState::Idle,
        }
    }

    /// Run the dispatch loop until shutdown.
    ///
    /// Returns `Ok(())` after a stop request, with the display blanked.
    /// Returns the sink error after an I/O failure, with one best-effort
    /// blank attempted on the way out; the embedding reports the error
    /// and must not call back in.
    pub fn run(&mut self, ctl: &ControlState) -> Result<(), S::Error> {
        loop {
            match ctl.selection() {
                Selection::Pattern(id) => {
                    #[cfg(feature = "esp32-log")]
                    println!("pattern {}: dispatch", id.as_str());
                    self.state = SupervisorState::Running(id);
                    let mut slot = id.to_slot();
                    if let Err(err) =
                        slot.run(ctl, &mut self.sink, &mut self.delay, &mut self.rng)
                    {
                        #[cfg(feature = "esp32-log")]
                        println!("pattern {}: sink failure, shutting down", id.as_str());
                        self.state = SupervisorState::ShuttingDown;
                        // One attempt to leave the display dark; the
                        // original failure is what gets reported.
                        let _ = blank(&mut self.sink);
                        return Err(err);
                    }
                    pace(&mut self.delay, DISPATCH_PAUSE);
                }
                Selection::Stopped => {
                    #[cfg(feature = "esp32-log")]
                    println!("engine stopped");
                    self.state = SupervisorState::ShuttingDown;
                    // The exiting runner already blanked; this also covers
                    // a stop before any pattern ran.
                    blank(&mut self.sink)?;
                    return Ok(());
                }
            }
        }
    }

    /// Current life-cycle state
    pub const fn state(&self) -> SupervisorState {
        self.state
    }

    /// Borrow the sink (frame inspection in tests and previews)
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Give the sink back
    pub fn into_sink(self) -> S {
        self.sink
    }
}
