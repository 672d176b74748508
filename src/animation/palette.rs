use serde::{Serialize, Serializer};
use std::fmt;

/// An RGB color with 8 bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub(crate) const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linearly interpolate every channel from `self` towards `target`.
    ///
    /// `factor` is clamped to `[0, 1]`, so `0.0` yields `self` and `1.0` yields `target`.
    pub(crate) fn interpolate(self, target: Rgb, factor: f64) -> Rgb {
        let factor = factor.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| {
            let from = f64::from(from);
            (from + factor * (f64::from(to) - from)).round() as u8
        };
        Rgb::new(channel(self.r, target.r), channel(self.g, target.g), channel(self.b, target.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(color: Rgb) -> Self {
        Self::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

/// The neon palette the snake cycles through: greens into blues into violet.
pub(crate) const PALETTE: [Rgb; 5] = [
    Rgb::new(32, 247, 0),
    Rgb::new(3, 252, 100),
    Rgb::new(28, 255, 198),
    Rgb::new(28, 81, 255),
    Rgb::new(85, 28, 255),
];
