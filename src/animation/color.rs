use super::palette::{Rgb, PALETTE};
use super::state::{AnimationState, Direction};

/// How many cells the brightness falls off over, counting back from the head.
const FALLOFF_SPAN: f64 = 6.0;

/// The fixed brightness of the active cell itself.
const ACTIVE_BRIGHTNESS: f64 = 0.4;

/// The colored band around the active cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Band {
    /// The leading edge, three cells ahead of the active cell.
    pub head: i32,
    /// The trailing edge, two cells behind the active cell.
    pub tail: i32,
}

impl Band {
    pub(crate) fn around(state: &AnimationState) -> Self {
        let active = i32::from(state.active_index);
        let sign = state.direction.sign();
        Self { head: active + 3 * sign, tail: active - 2 * sign }
    }

    /// Whether `cell` lies between tail and head, inclusive.
    pub(crate) fn contains(&self, cell: i32) -> bool {
        let (low, high) = (self.head.min(self.tail), self.head.max(self.tail));
        (low..=high).contains(&cell)
    }
}

/// Compute the color of the cell at column `cell`.
///
/// Cells outside the band are black. Inside it, brightness falls off linearly from the head, except
/// for the active cell which is pinned to a dim fixed value. The sub-band that is transitioning
/// grows by one cell per blend step, anchored at the tail or the head depending on the color direction,
/// and is painted with the next palette color while the rest of the band keeps the current one.
pub(crate) fn color_of(cell: i32, state: &AnimationState) -> Rgb {
    let band = Band::around(state);
    if !band.contains(cell) {
        return Rgb::BLACK;
    }

    let brightness = if cell == i32::from(state.active_index) {
        ACTIVE_BRIGHTNESS
    } else {
        (1.0 - f64::from((band.head - cell).abs()) / FALLOFF_SPAN).max(0.0)
    };

    let target = if in_transition(cell, &band, state) { PALETTE[state.next_color] } else { PALETTE[state.cur_color] };
    Rgb::BLACK.interpolate(target, brightness)
}

/// Colors for a whole row, one per column.
pub(crate) fn row_colors(state: &AnimationState) -> Vec<Rgb> {
    (0..i32::from(state.columns)).map(|cell| color_of(cell, state)).collect()
}

fn in_transition(cell: i32, band: &Band, state: &AnimationState) -> bool {
    let blend = i32::from(state.blend_step);
    // The sub-band always grows from its anchor towards the other end of the band.
    let (anchor, towards) = match state.color_direction {
        Direction::Backward => (band.head, band.tail),
        Direction::Forward => (band.tail, band.head),
    };
    let reach = anchor + blend * (towards - anchor).signum();
    (anchor.min(reach)..=anchor.max(reach)).contains(&cell)
}
