use super::color::row_colors;
use super::palette::Rgb;
use super::state::{AnimationState, ColorCycleTrigger, Tick};
use super::ticker::Ticker;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Owns the animation state and the timer that moves it.
///
/// Every change to anything the timer depends on (pause, columns, speed) cancels the in-flight wait
/// and starts a fresh one at the current interval, so a change never skips nor repeats a step. Regular
/// ticks, bounces included, keep to the schedule of the previous deadline.
#[derive(Debug)]
pub(crate) struct AnimationDriver {
    state: AnimationState,
    trigger: ColorCycleTrigger,
    ticker: Ticker,
}

impl AnimationDriver {
    pub(crate) fn new(state: AnimationState, trigger: ColorCycleTrigger, now: Instant) -> Self {
        let mut driver = Self { ticker: Ticker::new(interval_of(&state)), state, trigger };
        driver.restart(now);
        driver
    }

    pub(crate) fn state(&self) -> &AnimationState {
        &self.state
    }

    pub(crate) fn trigger(&self) -> ColorCycleTrigger {
        self.trigger
    }

    /// Run a tick if the timer is due. Returns whether the state changed.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        if self.state.paused || !self.ticker.fire(now) {
            return false;
        }
        // A bounce flips the direction without touching the interval; the wait that `fire` just scheduled
        // already starts at the bouncing tick.
        self.step();
        true
    }

    /// Run a single tick right away, regardless of the timer.
    pub(crate) fn step(&mut self) -> Tick {
        let tick = self.state.tick(self.trigger);
        trace!(
            active = self.state.active_index,
            direction = ?self.state.direction,
            blend_step = self.state.blend_step,
            "tick"
        );
        if tick.bounced {
            debug!(direction = ?self.state.direction, "sweep bounced");
        }
        if tick.color_cycled && self.state.blend_step == 0 {
            debug!(cur = self.state.cur_color, next = self.state.next_color, "palette pair advanced");
        }
        tick
    }

    pub(crate) fn toggle_pause(&mut self, now: Instant) {
        self.state.paused = !self.state.paused;
        debug!(paused = self.state.paused, "pause toggled");
        self.restart(now);
    }

    pub(crate) fn set_speed(&mut self, speed_ms: u32, now: Instant) {
        let previous = self.state.speed_ms;
        self.state.set_speed(speed_ms);
        if self.state.speed_ms != previous {
            debug!(from = previous, to = self.state.speed_ms, "speed changed");
            self.restart(now);
        }
    }

    /// Nudge the speed by `delta_ms`, which may be negative.
    pub(crate) fn adjust_speed(&mut self, delta_ms: i32, now: Instant) {
        let speed = (i32::from(self.state.speed_ms) + delta_ms).max(0);
        self.set_speed(speed as u32, now);
    }

    pub(crate) fn set_columns(&mut self, columns: u16, now: Instant) {
        let previous = self.state.columns;
        self.state.set_columns(columns);
        if self.state.columns != previous {
            debug!(from = previous, to = self.state.columns, "columns changed");
            self.restart(now);
        }
    }

    pub(crate) fn set_rows(&mut self, rows: u16) {
        self.state.set_rows(rows);
    }

    /// The colors of every column; every row of the grid looks the same.
    pub(crate) fn frame(&self) -> Vec<Rgb> {
        row_colors(&self.state)
    }

    /// How long until the next tick, or `None` while paused.
    pub(crate) fn remaining(&self, now: Instant) -> Option<Duration> {
        self.ticker.remaining(now)
    }

    fn restart(&mut self, now: Instant) {
        if self.state.paused {
            self.ticker.cancel();
        } else {
            self.ticker.rearm(interval_of(&self.state), now);
        }
    }
}

fn interval_of(state: &AnimationState) -> Duration {
    Duration::from_millis(state.speed_ms.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::state::Direction;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn driver(start: Instant) -> AnimationDriver {
        AnimationDriver::new(AnimationState::default(), ColorCycleTrigger::Bounce, start)
    }

    #[test]
    fn ticks_on_interval() {
        let start = Instant::now();
        let mut driver = driver(start);
        assert!(!driver.poll(start + ms(50)));
        assert!(driver.poll(start + ms(100)));
        assert_eq!(driver.state().active_index, 1);
        assert!(!driver.poll(start + ms(150)));
        assert!(driver.poll(start + ms(200)));
        assert_eq!(driver.state().active_index, 2);
    }

    #[test]
    fn late_polls_do_not_drift_across_bounces() {
        let start = Instant::now();
        let state = AnimationState { columns: 5, ..Default::default() };
        let mut driver = AnimationDriver::new(state, ColorCycleTrigger::Bounce, start);
        for tick in 1..=10 {
            let late = start + ms(tick * 100 + 30);
            assert!(driver.poll(late), "tick {tick}");
            assert_eq!(driver.remaining(late), Some(ms(70)), "tick {tick}");
        }
        // Bounced off both edges on the way.
        assert_eq!(driver.state().direction, Direction::Forward);
        assert_eq!(driver.state().active_index, 0);
    }

    #[test]
    fn speed_change_restarts_without_skipping() {
        let start = Instant::now();
        let mut driver = driver(start);
        assert!(driver.poll(start + ms(100)));

        driver.set_speed(300, start + ms(150));
        assert_eq!(driver.state().speed_ms, 300);
        assert!(!driver.poll(start + ms(200)));
        assert!(!driver.poll(start + ms(449)));
        assert_eq!(driver.state().active_index, 1);
        assert!(driver.poll(start + ms(450)));
        assert_eq!(driver.state().active_index, 2);
        assert!(!driver.poll(start + ms(451)));
    }

    #[test]
    fn unchanged_speed_keeps_the_wait() {
        let start = Instant::now();
        let mut driver = driver(start);
        driver.set_speed(100, start + ms(90));
        assert!(driver.poll(start + ms(100)));
    }

    #[test]
    fn pause_freezes_and_resume_waits_a_full_interval() {
        let start = Instant::now();
        let mut driver = driver(start);
        driver.toggle_pause(start + ms(10));
        assert_eq!(driver.remaining(start + ms(10)), None);
        assert!(!driver.poll(start + ms(5_000)));
        assert_eq!(driver.state().active_index, 0);

        driver.toggle_pause(start + ms(5_000));
        assert!(!driver.poll(start + ms(5_099)));
        assert!(driver.poll(start + ms(5_100)));
        assert_eq!(driver.state().active_index, 1);
    }

    #[test]
    fn adjust_speed_is_clamped() {
        let start = Instant::now();
        let mut driver = driver(start);
        driver.adjust_speed(-1_000, start);
        assert_eq!(driver.state().speed_ms, 50);
        driver.adjust_speed(10, start);
        assert_eq!(driver.state().speed_ms, 60);
        driver.adjust_speed(1_000, start);
        assert_eq!(driver.state().speed_ms, 500);
    }

    #[test]
    fn shrinking_columns_keeps_active_in_range() {
        let start = Instant::now();
        let mut driver = driver(start);
        for _ in 0..15 {
            driver.step();
        }
        assert_eq!(driver.state().active_index, 15);
        driver.set_columns(6, start);
        assert_eq!(driver.state().active_index, 5);
        assert_eq!(driver.frame().len(), 6);

        driver.step();
        assert_eq!(driver.state().direction, Direction::Backward);
        assert_eq!(driver.state().active_index, 5);
    }
}
