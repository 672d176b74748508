use crate::animation::{AnimationState, ColorCycleTrigger, Rgb};
use crate::banner::block_width;
use crate::input::{Command, Prompt};
use crossterm::cursor::MoveTo;
use crossterm::style::{Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};
use strum::IntoEnumIterator;
use unicode_width::UnicodeWidthStr;

/// The terminal's dimensions in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WindowSize {
    pub columns: u16,
    pub rows: u16,
}

/// Everything needed to paint one frame.
pub(crate) struct View<'a> {
    pub state: &'a AnimationState,
    pub colors: &'a [Rgb],
    pub title: &'a [String],
    pub cell_width: u16,
    pub trigger: ColorCycleTrigger,
    pub prompt: Option<&'a Prompt>,
}

/// Where the grid lands on screen and how much of it fits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GridLayout {
    pub left: u16,
    pub top: u16,
    pub columns: u16,
    pub rows: u16,
}

impl GridLayout {
    /// Fit the grid under a header of `header_height` lines, leaving room for the footer.
    /// Whatever doesn't fit is clipped.
    pub(crate) fn fit(state: &AnimationState, cell_width: u16, header_height: u16, window: WindowSize) -> Self {
        let cell_width = cell_width.max(1);
        let columns = state.columns.min(window.columns / cell_width);
        let rows = state.rows.min(window.rows.saturating_sub(header_height + FOOTER_HEIGHT));
        let left = (window.columns - columns * cell_width) / 2;
        Self { left, top: header_height, columns, rows }
    }
}

/// A blank line and the help or prompt line.
const FOOTER_HEIGHT: u16 = 2;

/// The status line: dimensions, whether the animation runs and how fast.
pub(crate) fn status_line(state: &AnimationState, trigger: ColorCycleTrigger) -> String {
    let run_state = if state.paused { "paused" } else { "running" };
    format!(
        "rows {}  columns {}  {run_state}  speed {} ms  color cycle: {trigger}",
        state.rows, state.columns, state.speed_ms
    )
}

/// The key help shown at the bottom.
pub(crate) fn help_line() -> String {
    Command::iter()
        .filter_map(|command| command.key_hint().map(|keys| format!("{keys} {command}")))
        .collect::<Vec<_>>()
        .join("  ")
}

fn prompt_line(prompt: &Prompt) -> String {
    format!("{}: {}_  (enter to apply, esc to cancel)", prompt.dimension, prompt.buffer)
}

fn header_height(title: &[String]) -> u16 {
    // The title, a blank line, the status line and another blank line.
    title.len() as u16 + 3
}

/// Paint a frame. On a `full` redraw the screen is cleared and the title drawn too, otherwise only the
/// parts that change between ticks are repainted.
pub(crate) fn draw<W: Write>(out: &mut W, view: &View, window: WindowSize, full: bool) -> io::Result<()> {
    let header = header_height(view.title);
    let layout = GridLayout::fit(view.state, view.cell_width, header, window);
    if full {
        out.queue(ResetColor)?.queue(Clear(ClearType::All))?;
        let title_left = centered(block_width(view.title), window.columns);
        for (row, line) in view.title.iter().enumerate() {
            out.queue(MoveTo(title_left, row as u16))?.queue(Print(line))?;
        }
    }

    let status = status_line(view.state, view.trigger);
    write_line(out, header.saturating_sub(2), &status, window)?;

    let cell = " ".repeat(view.cell_width.max(1).into());
    for row in 0..layout.rows {
        out.queue(MoveTo(layout.left, layout.top + row))?;
        for color in view.colors.iter().take(layout.columns.into()) {
            out.queue(SetBackgroundColor((*color).into()))?.queue(Print(&cell))?;
        }
        out.queue(ResetColor)?;
    }

    let footer = match view.prompt {
        Some(prompt) => prompt_line(prompt),
        None => help_line(),
    };
    write_line(out, layout.top + layout.rows + 1, &footer, window)?;
    out.flush()
}

fn write_line<W: Write>(out: &mut W, row: u16, text: &str, window: WindowSize) -> io::Result<()> {
    if row >= window.rows {
        return Ok(());
    }
    out.queue(MoveTo(0, row))?
        .queue(Clear(ClearType::CurrentLine))?
        .queue(MoveTo(centered(text.width(), window.columns), row))?
        .queue(Print(text))?;
    Ok(())
}

fn centered(width: usize, available: u16) -> u16 {
    let width = u16::try_from(width).unwrap_or(u16::MAX);
    available.saturating_sub(width) / 2
}
