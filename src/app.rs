use crate::animation::{AnimationDriver, SPEED_STEP_MS};
use crate::banner::title_lines;
use crate::config::Settings;
use crate::input::{Action, Command, Dimension, KeyHandler};
use crate::render::{draw, View, WindowSize};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, style::ResetColor};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long to wait on input when no tick is scheduled, e.g. while paused.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Puts the terminal in raw mode on the alternate screen, and puts it back when dropped.
struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { stdout })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// The interactive terminal application.
pub(crate) struct GridApp {
    driver: AnimationDriver,
    keys: KeyHandler,
    title: String,
    title_lines: Vec<String>,
    cell_width: u16,
    window: WindowSize,
}

impl GridApp {
    pub(crate) fn new(settings: Settings) -> Self {
        let driver = AnimationDriver::new(settings.initial_state(), settings.color_cycle, Instant::now());
        Self {
            driver,
            keys: KeyHandler::default(),
            title: settings.title,
            title_lines: Vec::new(),
            cell_width: settings.cell_width,
            window: WindowSize { columns: 80, rows: 24 },
        }
    }

    /// Run until the user quits.
    pub(crate) fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = TerminalGuard::enter()?;
        let (columns, rows) = terminal::size()?;
        self.resize(WindowSize { columns, rows });
        info!(window = ?self.window, "grid started");

        // `Some(full)` when the screen needs painting.
        let mut redraw = Some(true);
        loop {
            if let Some(full) = redraw.take() {
                self.paint(&mut terminal.stdout, full)?;
            }

            let timeout = self.driver.remaining(Instant::now()).unwrap_or(IDLE_POLL);
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => match self.keys.handle(key) {
                        Some(Action::Run(Command::Quit)) => break,
                        Some(action) => redraw = Some(self.apply(action)),
                        None => (),
                    },
                    Event::Resize(columns, rows) => {
                        self.resize(WindowSize { columns, rows });
                        redraw = Some(true);
                    }
                    _ => (),
                }
            }
            if self.driver.poll(Instant::now()) {
                redraw.get_or_insert(false);
            }
        }
        info!("grid stopped");
        Ok(())
    }

    /// Apply an action, returning whether the screen needs a full redraw.
    fn apply(&mut self, action: Action) -> bool {
        let now = Instant::now();
        let step = i32::from(SPEED_STEP_MS);
        let state = self.driver.state();
        let (rows, columns) = (state.rows, state.columns);
        match action {
            Action::Run(command) => match command {
                Command::TogglePause => self.driver.toggle_pause(now),
                Command::IncreaseSpeed => self.driver.adjust_speed(step, now),
                Command::DecreaseSpeed => self.driver.adjust_speed(-step, now),
                Command::AddRow => self.driver.set_rows(rows.saturating_add(1)),
                Command::RemoveRow => self.driver.set_rows(rows.saturating_sub(1)),
                Command::AddColumn => self.driver.set_columns(columns.saturating_add(1), now),
                Command::RemoveColumn => self.driver.set_columns(columns.saturating_sub(1), now),
                Command::EditRows | Command::EditColumns | Command::Quit => (),
            },
            Action::Resize(Dimension::Rows, value) => self.driver.set_rows(value),
            Action::Resize(Dimension::Columns, value) => self.driver.set_columns(value, now),
            Action::PromptChanged => return false,
        }
        let state = self.driver.state();
        let resized = (state.rows, state.columns) != (rows, columns);
        if resized {
            debug!(rows = state.rows, columns = state.columns, "grid resized");
        }
        resized
    }

    fn resize(&mut self, window: WindowSize) {
        self.window = window;
        self.title_lines = title_lines(&self.title, window.columns);
    }

    fn paint<W: Write>(&self, out: &mut W, full: bool) -> io::Result<()> {
        let colors = self.driver.frame();
        let view = View {
            state: self.driver.state(),
            colors: &colors,
            title: &self.title_lines,
            cell_width: self.cell_width,
            trigger: self.driver.trigger(),
            prompt: self.keys.prompt(),
        };
        draw(out, &view, self.window, full)
    }
}
