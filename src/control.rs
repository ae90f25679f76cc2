//! Shared control state for the animation engine.
//!
//! One `critical-section` mutex guards everything the foreground and the
//! background context both touch: the selected pattern, the run flag and
//! the two pacing intervals. Every critical section is field assignment
//! only; nothing sleeps or flushes while holding the lock.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;

use crate::pattern::PatternId;

/// Default fast pacing interval
pub const DEFAULT_PRIMARY: Duration = Duration::from_millis(40);

/// Default slow pacing interval
pub const DEFAULT_SECONDARY: Duration = Duration::from_millis(120);

/// What the supervisor should be running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Run this pattern
    Pattern(PatternId),
    /// Shut the engine down
    Stopped,
}

#[derive(Debug, Clone, Copy)]
struct ControlData {
    selected: Selection,
    running: bool,
    primary: Duration,
    secondary: Duration,
}

/// Cross-context engine control state.
///
/// Designed to live in a `static`: `new` is const, and all methods take
/// `&self`. The foreground mutates it through a [`ControlHandle`]; the
/// background supervisor and the active runner poll it between rendering
/// steps.
pub struct ControlState {
    inner: Mutex<RefCell<ControlData>>,
}

impl ControlState {
    /// Create control state with the default intervals, selecting `initial`
    pub const fn new(initial: PatternId) -> Self {
        Self::with_intervals(initial, DEFAULT_PRIMARY, DEFAULT_SECONDARY)
    }

    /// Create control state with explicit pacing intervals
    ///
    /// Both intervals must be positive; tests inject short ones here.
    pub const fn with_intervals(
        initial: PatternId,
        primary: Duration,
        secondary: Duration,
    ) -> Self {
        debug_assert!(primary.as_ticks() > 0);
        debug_assert!(secondary.as_ticks() > 0);
        Self {
            inner: Mutex::new(RefCell::new(ControlData {
                selected: Selection::Pattern(initial),
                running: true,
                primary,
                secondary,
            })),
        }
    }

    /// Get a foreground handle for this control state
    ///
    /// The handle is the only surface the button and serial plumbing should
    /// call into.
    pub const fn handle(&self) -> ControlHandle<'_> {
        ControlHandle { control: self }
    }

    /// Request a pattern switch.
    ///
    /// Sets the selection and clears the run flag in one critical section.
    /// Does not wait for the active runner to notice; the switch takes
    /// effect within that runner's own polling granularity. Selecting the
    /// pattern that is already active restarts it from scratch.
    pub fn select_pattern(&self, id: PatternId) {
        critical_section::with(|cs| {
            let mut data = self.inner.borrow(cs).borrow_mut();
            data.selected = Selection::Pattern(id);
            data.running = false;
        });
    }

    /// Request full shutdown. Idempotent.
    pub fn stop(&self) {
        critical_section::with(|cs| {
            let mut data = self.inner.borrow(cs).borrow_mut();
            data.selected = Selection::Stopped;
            data.running = false;
        });
    }

    /// Read the current selection
    pub fn selection(&self) -> Selection {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().selected)
    }

    /// Read the run flag
    ///
    /// Runners poll this at least once per rendering step; `false` means
    /// "finish up: blank, flush, return".
    pub fn is_running(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().running)
    }

    /// Read both pacing intervals as `(primary, secondary)`
    pub fn intervals(&self) -> (Duration, Duration) {
        critical_section::with(|cs| {
            let data = self.inner.borrow(cs).borrow();
            (data.primary, data.secondary)
        })
    }

    /// Exchange the two pacing intervals
    pub fn swap_intervals(&self) {
        critical_section::with(|cs| {
            let mut data = self.inner.borrow(cs).borrow_mut();
            let data = &mut *data;
            core::mem::swap(&mut data.primary, &mut data.secondary);
        });
    }

    /// Set the run flag.
    ///
    /// Called by a runner at entry (so a freshly selected pattern starts
    /// active) and again after its blank-on-exit, so the next runner's
    /// entry arm is a no-op. Sound only because runner entry and exit are
    /// strictly sequential on the single background context; the flag
    /// doubles as the stop request, so a second concurrent runner would
    /// race it.
    pub(crate) fn arm(&self) {
        critical_section::with(|cs| {
            self.inner.borrow(cs).borrow_mut().running = true;
        });
    }

    /// Swap the intervals if primary is the slower of the two.
    ///
    /// Runner entry step: patterns rely on primary ≤ secondary and the
    /// pair may have been left swapped by the previous runner.
    pub(crate) fn order_intervals(&self) {
        critical_section::with(|cs| {
            let mut data = self.inner.borrow(cs).borrow_mut();
            let data = &mut *data;
            if data.primary > data.secondary {
                core::mem::swap(&mut data.primary, &mut data.secondary);
            }
        });
    }
}

/// Foreground facade over a [`ControlState`].
///
/// Lightweight and `Copy`, like a channel sender; exposes only the two
/// mutations the foreground is allowed to make.
#[derive(Clone, Copy)]
pub struct ControlHandle<'a> {
    control: &'a ControlState,
}

impl ControlHandle<'_> {
    /// Request a pattern switch (see [`ControlState::select_pattern`])
    pub fn select_pattern(&self, id: PatternId) {
        self.control.select_pattern(id);
    }

    /// Request full shutdown (see [`ControlState::stop`])
    pub fn stop(&self) {
        self.control.stop();
    }
}
