mod color;
mod driver;
mod palette;
mod state;
mod ticker;

pub(crate) use driver::AnimationDriver;
pub(crate) use palette::Rgb;
pub(crate) use state::{
    clamp_speed, sanitize_dimension, AnimationState, ColorCycleTrigger, Direction, MIN_DIMENSION, SPEED_STEP_MS,
};
