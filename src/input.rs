use crate::animation::sanitize_dimension;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strum::{Display, EnumIter};

/// Commands bound to a single key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub(crate) enum Command {
    #[strum(to_string = "pause/resume")]
    TogglePause,

    #[strum(to_string = "speed +10ms")]
    IncreaseSpeed,

    #[strum(to_string = "speed -10ms")]
    DecreaseSpeed,

    #[strum(to_string = "rows +/-")]
    AddRow,

    #[strum(to_string = "rows -")]
    RemoveRow,

    #[strum(to_string = "columns +/-")]
    AddColumn,

    #[strum(to_string = "columns -")]
    RemoveColumn,

    #[strum(to_string = "set rows")]
    EditRows,

    #[strum(to_string = "set columns")]
    EditColumns,

    #[strum(to_string = "quit")]
    Quit,
}

impl Command {
    /// The keys shown in the help footer, or `None` for commands listed together with their counterpart.
    pub(crate) fn key_hint(self) -> Option<&'static str> {
        let hint = match self {
            Self::TogglePause => "space",
            Self::IncreaseSpeed => "+/→",
            Self::DecreaseSpeed => "-/←",
            Self::AddRow => "↑/↓",
            Self::AddColumn => "]/[",
            Self::EditRows => "r",
            Self::EditColumns => "c",
            Self::Quit => "q",
            Self::RemoveRow | Self::RemoveColumn => return None,
        };
        Some(hint)
    }

    fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(Self::Quit);
        }
        let command = match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') => Self::TogglePause,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => Self::IncreaseSpeed,
            KeyCode::Char('-') | KeyCode::Left => Self::DecreaseSpeed,
            KeyCode::Up => Self::AddRow,
            KeyCode::Down => Self::RemoveRow,
            KeyCode::Char(']') => Self::AddColumn,
            KeyCode::Char('[') => Self::RemoveColumn,
            KeyCode::Char('r') => Self::EditRows,
            KeyCode::Char('c') => Self::EditColumns,
            KeyCode::Char('q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// The grid dimension a prompt edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub(crate) enum Dimension {
    #[strum(to_string = "rows")]
    Rows,

    #[strum(to_string = "columns")]
    Columns,
}

/// A numeric prompt being typed into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Prompt {
    pub dimension: Dimension,
    pub buffer: String,
}

/// What the application should do in response to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Run(Command),
    Resize(Dimension, u16),
    /// The prompt changed and needs redrawing.
    PromptChanged,
}

/// Translates key events into actions, tracking whether a prompt is open.
#[derive(Debug, Default)]
pub(crate) struct KeyHandler {
    prompt: Option<Prompt>,
}

impl KeyHandler {
    pub(crate) fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub(crate) fn handle(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if self.prompt.is_some() {
            return self.handle_prompt(key);
        }
        let command = Command::from_key(&key)?;
        match command {
            Command::EditRows => self.open_prompt(Dimension::Rows),
            Command::EditColumns => self.open_prompt(Dimension::Columns),
            _ => Some(Action::Run(command)),
        }
    }

    fn open_prompt(&mut self, dimension: Dimension) -> Option<Action> {
        self.prompt = Some(Prompt { dimension, buffer: String::new() });
        Some(Action::PromptChanged)
    }

    fn handle_prompt(&mut self, key: KeyEvent) -> Option<Action> {
        let prompt = self.prompt.as_mut()?;
        match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'c' => {
                self.prompt = None;
                Some(Action::Run(Command::Quit))
            }
            KeyCode::Char(c) if c.is_ascii_digit() && prompt.buffer.len() < 5 => {
                prompt.buffer.push(c);
                Some(Action::PromptChanged)
            }
            KeyCode::Backspace => {
                prompt.buffer.pop();
                Some(Action::PromptChanged)
            }
            KeyCode::Enter => {
                let prompt = self.prompt.take()?;
                Some(Action::Resize(prompt.dimension, sanitize_dimension(&prompt.buffer)))
            }
            KeyCode::Esc => {
                self.prompt = None;
                Some(Action::PromptChanged)
            }
            _ => None,
        }
    }
}
