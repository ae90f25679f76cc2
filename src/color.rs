use smart_leds::RGB8;

pub type Rgb = RGB8;

/// All-off pixel value
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Working palette, quarter brightness to keep ring current draw low.
///
/// Black is deliberately the last entry: ring index buffers use it as the
/// "unlit" slot, and random color draws stop short of it (see
/// [`crate::rng::PatternRng::color_index`]).
pub const PALETTE: [Rgb; 8] = [
    Rgb { r: 63, g: 0, b: 0 },   // red
    Rgb { r: 0, g: 63, b: 0 },   // green
    Rgb { r: 0, g: 0, b: 63 },   // blue
    Rgb { r: 63, g: 63, b: 0 },  // yellow
    Rgb { r: 0, g: 63, b: 63 },  // cyan
    Rgb { r: 63, g: 0, b: 63 },  // magenta
    Rgb { r: 63, g: 63, b: 63 }, // white
    BLACK,
];

/// Palette index of the unlit slot
pub const OFF_INDEX: u8 = 7;

/// Double each channel, saturating. Used for sparkle highlights.
#[inline]
pub const fn brighten(color: Rgb) -> Rgb {
    Rgb {
        r: color.r.saturating_mul(2),
        g: color.g.saturating_mul(2),
        b: color.b.saturating_mul(2),
    }
}
