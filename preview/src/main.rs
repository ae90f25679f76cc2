//! Terminal preview for the duoring engine.
//!
//! Renders both rings as ANSI color blocks and speaks the serial control
//! protocol on stdin/stdout: feed it `{"led":{"pattern":0}}`-style lines,
//! read `{"time":...,"event":...,"state":...}` notifications back. The
//! engine runs on its own thread, exactly like the background context of
//! a firmware embedding; this process is the foreground.
//!
//! Buttons are the one boundary a host build cannot exercise; their
//! debounce path is wired in firmware embeddings only.

use std::io::{self, Read as _, Write as _};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use embedded_hal::delay::DelayNs;

use duoring::rings::{INNER_LEN, LED_COUNT, OUTER_LEN};
use duoring::{
    AnimationSupervisor, ControlState, Decoded, FrameSink, Instant, LineReader,
    Notification, PatternId, Rgb, protocol,
};

/// Shared control state between the stdin loop and the engine thread
static CONTROL: ControlState = ControlState::new(PatternId::Chase);

/// Terminal brightness boost: the palette is dimmed for real LEDs
const TERMINAL_GAIN: u8 = 4;

struct TerminalSink {
    buf: [Rgb; LED_COUNT],
    out: io::Stderr,
}

impl TerminalSink {
    fn new() -> Self {
        Self {
            buf: [Rgb { r: 0, g: 0, b: 0 }; LED_COUNT],
            out: io::stderr(),
        }
    }

    fn paint_pixel(out: &mut impl io::Write, pixel: Rgb) -> io::Result<()> {
        let r = pixel.r.saturating_mul(TERMINAL_GAIN);
        let g = pixel.g.saturating_mul(TERMINAL_GAIN);
        let b = pixel.b.saturating_mul(TERMINAL_GAIN);
        write!(out, "\x1b[38;2;{r};{g};{b}m\u{2588}\u{2588}")
    }
}

impl FrameSink for TerminalSink {
    type Error = io::Error;

    fn write(&mut self, index: usize, color: Rgb) -> Result<(), io::Error> {
        self.buf[index] = color;
        Ok(())
    }

    fn fill(&mut self, color: Rgb) -> Result<(), io::Error> {
        self.buf = [color; LED_COUNT];
        Ok(())
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        let mut out = self.out.lock();
        write!(out, "\x1b[H")?;
        for pixel in &self.buf[..OUTER_LEN] {
            Self::paint_pixel(&mut out, *pixel)?;
        }
        write!(out, "\x1b[0m\r\n")?;
        // Center the inner ring under the outer one.
        write!(out, "{:width$}", "", width = OUTER_LEN - INNER_LEN)?;
        for pixel in &self.buf[OUTER_LEN..] {
            Self::paint_pixel(&mut out, *pixel)?;
        }
        write!(out, "\x1b[0m\r\n")?;
        out.flush()
    }
}

/// Blocking delay on top of the OS scheduler
struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

fn seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(1)
}

fn emit(notification: &Notification<'_>) {
    if let Ok(line) = notification.to_json::<192>() {
        println!("{line}");
    }
}

fn main() -> io::Result<()> {
    eprint!("\x1b[2J");
    emit(&Notification::system(Instant::now(), "engine started"));

    let engine = thread::spawn(|| {
        let mut supervisor = AnimationSupervisor::new(TerminalSink::new(), ThreadDelay, seed());
        supervisor.run(&CONTROL)
    });

    let handle = CONTROL.handle();
    let mut reader: LineReader<256> = LineReader::new();

    // Foreground loop: byte-at-a-time off the control channel, exactly
    // like the serial read path on a device. EOF acts as the interrupt.
    for byte in io::stdin().lock().bytes() {
        let Some(line) = reader.push(byte?) else {
            continue;
        };
        match protocol::decode_line(line) {
            Decoded::SelectPattern(id) => {
                handle.select_pattern(id);
                emit(&Notification::system(Instant::now(), id.as_str()));
            }
            Decoded::Unrecognized => {
                emit(&Notification::system(Instant::now(), "unrecognized message"));
            }
        }
    }

    emit(&Notification::system(Instant::now(), "stopping"));
    handle.stop();

    match engine.join() {
        Ok(Ok(())) => emit(&Notification::system(Instant::now(), "stopped")),
        Ok(Err(err)) => {
            handle.stop();
            let mesg = err.to_string();
            emit(&Notification::error(Instant::now(), &mesg));
        }
        Err(_) => emit(&Notification::error(Instant::now(), "engine thread panicked")),
    }

    Ok(())
}
