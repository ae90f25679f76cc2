mod tests {
    use duoring::rings::LED_COUNT;
    use duoring::{
        ControlState, Duration, FrameSink, PatternId, PatternRng, Rgb, BLACK,
    };
    use embedded_hal::delay::DelayNs;

    type Frame = [Rgb; LED_COUNT];

    /// Sink that records one frame per flush; can be told to start
    /// failing flushes after a number of successes.
    struct RecordingSink {
        buf: Frame,
        frames: Vec<Frame>,
        fail_after: Option<usize>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                buf: [BLACK; LED_COUNT],
                frames: Vec::new(),
                fail_after: None,
            }
        }

        fn failing_after(flushes: usize) -> Self {
            let mut sink = Self::new();
            sink.fail_after = Some(flushes);
            sink
        }
    }

    impl FrameSink for RecordingSink {
        type Error = &'static str;

        fn write(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error> {
            self.buf[index] = color;
            Ok(())
        }

        fn fill(&mut self, color: Rgb) -> Result<(), Self::Error> {
            self.buf = [color; LED_COUNT];
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            if let Some(limit) = self.fail_after {
                if self.frames.len() >= limit {
                    return Err("flush failed");
                }
            }
            self.frames.push(self.buf);
            Ok(())
        }
    }

    /// Delay that requests a stop after a fixed number of sleeps.
    struct StopAfter<'a> {
        ctl: &'a ControlState,
        remaining: u32,
    }

    impl DelayNs for StopAfter<'_> {
        fn delay_ns(&mut self, _ns: u32) {
            if self.remaining > 0 {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.ctl.stop();
                }
            }
        }
    }

    fn is_all_off(frame: &Frame) -> bool {
        frame.iter().all(|pixel| *pixel == BLACK)
    }

    fn short_ctl(initial: PatternId) -> ControlState {
        ControlState::with_intervals(
            initial,
            Duration::from_millis(1),
            Duration::from_millis(3),
        )
    }

    fn run_until_stopped(id: PatternId, sleeps: u32) -> RecordingSink {
        let ctl = short_ctl(id);
        let mut sink = RecordingSink::new();
        let mut delay = StopAfter {
            ctl: &ctl,
            remaining: sleeps,
        };
        let mut rng = PatternRng::new(0x5eed);

        let mut slot = id.to_slot();
        slot.run(&ctl, &mut sink, &mut delay, &mut rng).unwrap();

        // The exit path re-arms the run flag for the next runner.
        assert!(ctl.is_running());
        sink
    }

    #[test]
    fn test_chase_blanks_on_stop() {
        let sink = run_until_stopped(PatternId::Chase, 7);
        assert!(sink.frames.len() > 1);
        assert!(is_all_off(sink.frames.last().unwrap()));
    }

    #[test]
    fn test_orbit_blanks_on_stop() {
        let sink = run_until_stopped(PatternId::Orbit, 5);
        assert!(is_all_off(sink.frames.last().unwrap()));
    }

    #[test]
    fn test_pulse_blanks_on_stop() {
        let sink = run_until_stopped(PatternId::Pulse, 5);
        assert!(is_all_off(sink.frames.last().unwrap()));
    }

    #[test]
    fn test_sparkle_blanks_on_stop() {
        let sink = run_until_stopped(PatternId::Sparkle, 5);
        assert!(is_all_off(sink.frames.last().unwrap()));
    }

    #[test]
    fn test_chase_lights_one_pixel_at_a_time() {
        let sink = run_until_stopped(PatternId::Chase, 5);

        // While walking, each flushed frame holds at most one lit pixel.
        let walking = sink.frames.iter().take(4);
        for frame in walking {
            let lit = frame.iter().filter(|pixel| **pixel != BLACK).count();
            assert!(lit <= 1);
        }
    }

    #[test]
    fn test_sparkle_leaves_shared_intervals_alone() {
        let ctl = short_ctl(PatternId::Sparkle);
        let mut sink = RecordingSink::new();
        let mut delay = StopAfter {
            ctl: &ctl,
            remaining: 40,
        };
        let mut rng = PatternRng::new(1);

        let mut slot = PatternId::Sparkle.to_slot();
        slot.run(&ctl, &mut sink, &mut delay, &mut rng).unwrap();

        // Sparkle swaps only its local interval copies.
        assert_eq!(
            ctl.intervals(),
            (Duration::from_millis(1), Duration::from_millis(3))
        );
    }

    #[test]
    fn test_stop_before_first_step_still_blanks() {
        let ctl = short_ctl(PatternId::Orbit);
        ctl.stop();
        // Entry re-arms, so the runner starts; first poll after the first
        // pace sees the flag again only if someone clears it. Clear it
        // immediately after entry instead: stop once more via the delay.
        let mut sink = RecordingSink::new();
        let mut delay = StopAfter {
            ctl: &ctl,
            remaining: 1,
        };
        let mut rng = PatternRng::new(2);

        let mut slot = PatternId::Orbit.to_slot();
        slot.run(&ctl, &mut sink, &mut delay, &mut rng).unwrap();

        assert_eq!(sink.frames.len(), 1);
        assert!(is_all_off(&sink.frames[0]));
    }

    #[test]
    fn test_flush_failure_propagates() {
        let ctl = short_ctl(PatternId::Chase);
        let mut sink = RecordingSink::failing_after(3);
        let mut delay = StopAfter {
            ctl: &ctl,
            remaining: 1000,
        };
        let mut rng = PatternRng::new(3);

        let mut slot = PatternId::Chase.to_slot();
        let result = slot.run(&ctl, &mut sink, &mut delay, &mut rng);

        assert_eq!(result, Err("flush failed"));
        assert_eq!(sink.frames.len(), 3);
    }

    #[test]
    fn test_reselect_restarts_pattern_state() {
        // Two fresh dispatches of the same id must both start the walk at
        // pixel zero, regardless of how far the first one got.
        let first = run_until_stopped(PatternId::Chase, 9);
        let second = run_until_stopped(PatternId::Chase, 9);

        let first_lit = |sink: &RecordingSink| {
            sink.frames[0]
                .iter()
                .position(|pixel| *pixel != BLACK)
        };
        assert_eq!(first_lit(&first), Some(0));
        assert_eq!(first_lit(&second), Some(0));
    }
}
