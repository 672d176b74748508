use crate::animation::{AnimationDriver, Direction, Rgb};
use serde::Serialize;
use std::io::Write;

/// How headless frames are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum FrameFormat {
    /// One human readable line per frame.
    #[default]
    Text,

    /// One JSON object per line.
    Json,
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    tick: u64,
    active_index: u16,
    direction: Direction,
    blend_step: u8,
    cur_color: usize,
    next_color: usize,
    colors: &'a [Rgb],
}

/// Print `frames` consecutive frames, ticking the driver between them without waiting on a clock.
pub(crate) fn export_frames<W: Write>(
    out: &mut W,
    driver: &mut AnimationDriver,
    frames: u64,
    format: FrameFormat,
) -> anyhow::Result<()> {
    for tick in 0..frames {
        let colors = driver.frame();
        let state = driver.state();
        let record = FrameRecord {
            tick,
            active_index: state.active_index,
            direction: state.direction,
            blend_step: state.blend_step,
            cur_color: state.cur_color,
            next_color: state.next_color,
            colors: &colors,
        };
        match format {
            FrameFormat::Text => writeln!(out, "{}", text_line(&record))?,
            FrameFormat::Json => {
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }
        driver.step();
    }
    out.flush()?;
    Ok(())
}

fn text_line(record: &FrameRecord) -> String {
    let arrow = match record.direction {
        Direction::Forward => '>',
        Direction::Backward => '<',
    };
    let colors: Vec<String> = record.colors.iter().map(Rgb::to_string).collect();
    format!("{:>4} {:>3}{arrow} {}: {}", record.tick, record.active_index, record.blend_step, colors.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationState, ColorCycleTrigger};
    use std::time::Instant;

    fn driver() -> AnimationDriver {
        AnimationDriver::new(AnimationState::new(5, 5, 100), ColorCycleTrigger::Bounce, Instant::now())
    }

    #[test]
    fn text_frames() {
        let mut out = Vec::new();
        export_frames(&mut out, &mut driver(), 6, FrameFormat::Text).expect("export failed");
        let output = String::from_utf8(out).expect("not utf8");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "   0   0> 0: rgb(13,99,0) rgb(21,165,0) rgb(27,206,0) rgb(32,247,0) rgb(0,0,0)");
        assert!(lines[4].starts_with("   4   4> 0:"));
        assert!(lines[5].starts_with("   5   4< 1:"));
    }

    #[test]
    fn json_frames() {
        let mut out = Vec::new();
        export_frames(&mut out, &mut driver(), 2, FrameFormat::Json).expect("export failed");
        let output = String::from_utf8(out).expect("not utf8");
        let frames: Vec<serde_json::Value> =
            output.lines().map(|line| serde_json::from_str(line).expect("invalid json")).collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1]["tick"], 1);
        assert_eq!(frames[1]["active_index"], 1);
        assert_eq!(frames[1]["direction"], "forward");
        assert_eq!(frames[1]["colors"].as_array().map(Vec::len), Some(5));
        assert_eq!(frames[0]["colors"][3], "rgb(32,247,0)");
    }

    #[test]
    fn zero_frames() {
        let mut out = Vec::new();
        export_frames(&mut out, &mut driver(), 0, FrameFormat::Json).expect("export failed");
        assert!(out.is_empty());
    }
}
