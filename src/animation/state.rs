use super::palette::PALETTE;
use serde::{Deserialize, Serialize};
use strum::Display;

/// The smallest number of rows or columns a grid can have.
pub(crate) const MIN_DIMENSION: u16 = 5;
pub(crate) const MIN_SPEED_MS: u16 = 50;
pub(crate) const MAX_SPEED_MS: u16 = 500;
pub(crate) const SPEED_STEP_MS: u16 = 10;

/// The number of blend steps in one color cycle.
pub(crate) const BLEND_STEPS: u8 = 6;

/// A sweep direction, either towards the last column or towards the first one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The signed offset a single step in this direction moves by.
    pub(crate) fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub(crate) fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Which ticks advance the color cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Display, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ColorCycleTrigger {
    /// Only ticks where the sweep bounces off either edge.
    #[default]
    Bounce,

    /// Every tick.
    Step,
}

/// What happened during a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Tick {
    pub bounced: bool,
    pub color_cycled: bool,
}

/// The full state of the animation.
///
/// Every field is plain data: the transitions below are the only way the animation moves forward, and
/// [`crate::animation::color_of`] derives cell colors from a snapshot of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AnimationState {
    pub rows: u16,
    pub columns: u16,
    pub active_index: u16,
    pub direction: Direction,
    pub paused: bool,
    pub speed_ms: u16,
    pub cur_color: usize,
    pub next_color: usize,
    pub blend_step: u8,
    pub color_direction: Direction,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            rows: 15,
            columns: 20,
            active_index: 0,
            direction: Direction::Forward,
            paused: false,
            speed_ms: 100,
            cur_color: 0,
            next_color: 1,
            blend_step: 0,
            color_direction: Direction::Forward,
        }
    }
}

impl AnimationState {
    pub(crate) fn new(rows: u16, columns: u16, speed_ms: u16) -> Self {
        Self {
            rows: rows.max(MIN_DIMENSION),
            columns: columns.max(MIN_DIMENSION),
            speed_ms: clamp_speed(speed_ms.into()),
            ..Default::default()
        }
    }

    /// Run one tick: move the active cell and, depending on `trigger`, advance the color cycle.
    pub(crate) fn tick(&mut self, trigger: ColorCycleTrigger) -> Tick {
        let bounced = self.advance_position();
        let color_cycled = match trigger {
            ColorCycleTrigger::Bounce => bounced,
            ColorCycleTrigger::Step => true,
        };
        if color_cycled {
            self.advance_color_cycle();
        }
        Tick { bounced, color_cycled }
    }

    /// Move the active cell one step, or flip the direction without moving if it sits on the edge
    /// it is heading towards. Returns whether the direction flipped.
    pub(crate) fn advance_position(&mut self) -> bool {
        let last = self.columns - 1;
        match self.direction {
            Direction::Forward if self.active_index >= last => {
                self.active_index = last;
                self.direction = Direction::Backward;
                true
            }
            Direction::Backward if self.active_index == 0 => {
                self.direction = Direction::Forward;
                true
            }
            Direction::Forward => {
                self.active_index += 1;
                false
            }
            Direction::Backward => {
                self.active_index -= 1;
                false
            }
        }
    }

    /// Advance the blend step, moving on to the next palette pair every time it wraps.
    pub(crate) fn advance_color_cycle(&mut self) {
        self.blend_step = (self.blend_step + 1) % BLEND_STEPS;
        if self.blend_step == 0 {
            self.cur_color = self.next_color;
            self.next_color = (self.next_color + 1) % PALETTE.len();
            self.color_direction = self.color_direction.flipped();
        }
    }

    pub(crate) fn set_columns(&mut self, columns: u16) {
        self.columns = columns.max(MIN_DIMENSION);
        self.active_index = self.active_index.min(self.columns - 1);
    }

    pub(crate) fn set_rows(&mut self, rows: u16) {
        self.rows = rows.max(MIN_DIMENSION);
    }

    pub(crate) fn set_speed(&mut self, speed_ms: u32) {
        self.speed_ms = clamp_speed(speed_ms);
    }
}

/// Turn free-form user input into a grid dimension.
///
/// Leading digits are read and whatever follows them ignored, so `"12abc"` and `"12.7"` are both 12.
/// Input without leading digits, negative or below the minimum becomes [`MIN_DIMENSION`].
pub(crate) fn sanitize_dimension(input: &str) -> u16 {
    let input = input.trim_start();
    let (negative, unsigned) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let digits_end = unsigned.find(|c: char| !c.is_ascii_digit()).unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() || negative {
        return MIN_DIMENSION;
    }
    // Only digits are left, so the parse can only fail by overflowing.
    let value = digits.parse::<u64>().map_or(u16::MAX, |value| u16::try_from(value).unwrap_or(u16::MAX));
    value.max(MIN_DIMENSION)
}

/// Clamp a speed into the supported range, snapping it to the slider's step.
pub(crate) fn clamp_speed(speed_ms: u32) -> u16 {
    let step = u32::from(SPEED_STEP_MS);
    let snapped = speed_ms.saturating_add(step / 2) / step * step;
    snapped.clamp(MIN_SPEED_MS.into(), MAX_SPEED_MS.into()) as u16
}
