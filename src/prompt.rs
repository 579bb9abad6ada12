//! Interactive prompt collaborators.
//!
//! The wizard talks to the user through the [`Interact`] trait: a
//! single-choice select menu plus plain/secret line input. The real
//! implementation ([`TerminalPrompt`]) renders with crossterm and scopes
//! raw mode to each prompt call via [`RawModeGuard`], so the terminal is
//! restored on every exit path. [`ScriptedInteract`] drives the same
//! contract from a canned script for tests and non-interactive use.

use crate::error::{Error, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use std::collections::VecDeque;
use std::io::Write;

/// One selectable menu entry: `name` is what the user sees, `value` what
/// the caller gets back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub name: String,
    pub value: String,
}

impl Choice {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single-choice select request. Non-looping: navigation stops at the
/// first and last entry.
#[derive(Debug, Clone)]
pub struct SelectPrompt {
    pub message: String,
    pub choices: Vec<Choice>,
    /// Pre-selected value, highlighted when present in `choices`.
    pub default: Option<String>,
    /// Maximum entries visible at once.
    pub page_size: usize,
}

impl SelectPrompt {
    #[must_use]
    pub fn new(message: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            message: message.into(),
            choices,
            default: None,
            page_size: 10,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: Option<String>) -> Self {
        self.default = default;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Index of the default value, if it is one of the choices.
    #[must_use]
    pub fn default_index(&self) -> usize {
        self.default
            .as_deref()
            .and_then(|d| self.choices.iter().position(|c| c.value == d))
            .unwrap_or(0)
    }
}

/// Interactive collaborator contract.
///
/// `select` fails with [`Error::Cancelled`] when the user aborts; `input`
/// reads one line, masking the echo when `secret` is set.
pub trait Interact {
    fn select(&mut self, prompt: &SelectPrompt) -> Result<String>;
    fn input(&mut self, message: &str, secret: bool) -> Result<String>;
}

/// Page size for a full-height menu: terminal rows minus the message line,
/// clamped to `10..=20`, falling back to 10 when the size is unknown.
#[must_use]
pub fn terminal_page_size() -> usize {
    terminal::size().map_or(10, |(_cols, rows)| {
        usize::from(rows.saturating_sub(2)).clamp(10, 20)
    })
}

/// Raw-mode scope. Enables raw mode on construction and restores the prior
/// mode on drop, whichever way the prompt call exits.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Crossterm-backed prompt implementation.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn redraw(
        out: &mut impl Write,
        prompt: &SelectPrompt,
        selected: usize,
        offset: usize,
        drawn: &mut u16,
    ) -> Result<()> {
        if *drawn > 0 {
            execute!(
                out,
                cursor::MoveUp(*drawn),
                cursor::MoveToColumn(0),
                terminal::Clear(terminal::ClearType::FromCursorDown)
            )?;
        }

        let window = prompt
            .choices
            .iter()
            .enumerate()
            .skip(offset)
            .take(prompt.page_size);

        write!(out, "{}\r\n", prompt.message)?;
        let mut lines: u16 = 1;
        for (idx, choice) in window {
            let marker = if idx == selected { "\u{276f}" } else { " " };
            write!(out, "{marker} {}\r\n", choice.name)?;
            lines += 1;
        }
        out.flush()?;
        *drawn = lines;
        Ok(())
    }

    fn run_select(prompt: &SelectPrompt) -> Result<String> {
        let mut out = std::io::stdout();
        let mut selected = prompt.default_index();
        let mut offset = selected.saturating_sub(prompt.page_size.saturating_sub(1));
        let mut drawn: u16 = 0;

        loop {
            Self::redraw(&mut out, prompt, selected, offset, &mut drawn)?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    selected = selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    selected = (selected + 1).min(prompt.choices.len() - 1);
                }
                KeyCode::Enter => {
                    execute!(
                        out,
                        cursor::MoveUp(drawn),
                        cursor::MoveToColumn(0),
                        terminal::Clear(terminal::ClearType::FromCursorDown)
                    )?;
                    let choice = &prompt.choices[selected];
                    write!(out, "{} {}\r\n", prompt.message, choice.name)?;
                    out.flush()?;
                    return Ok(choice.value.clone());
                }
                KeyCode::Esc => return Err(Error::Cancelled),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(Error::Cancelled);
                }
                _ => {}
            }

            // Keep the highlighted entry inside the visible window.
            if selected < offset {
                offset = selected;
            } else if selected >= offset + prompt.page_size {
                offset = selected - prompt.page_size + 1;
            }
        }
    }

    fn run_input(message: &str, secret: bool) -> Result<String> {
        let mut out = std::io::stdout();
        write!(out, "{message} ")?;
        out.flush()?;

        let mut buffer = String::new();
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => {
                    write!(out, "\r\n")?;
                    out.flush()?;
                    return Ok(buffer);
                }
                KeyCode::Esc => return Err(Error::Cancelled),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(Error::Cancelled);
                }
                KeyCode::Backspace => {
                    if buffer.pop().is_some() {
                        write!(out, "\u{8} \u{8}")?;
                        out.flush()?;
                    }
                }
                KeyCode::Char(ch) if !ch.is_control() => {
                    buffer.push(ch);
                    if secret {
                        write!(out, "*")?;
                    } else {
                        write!(out, "{ch}")?;
                    }
                    out.flush()?;
                }
                _ => {}
            }
        }
    }
}

impl Interact for TerminalPrompt {
    fn select(&mut self, prompt: &SelectPrompt) -> Result<String> {
        if prompt.choices.is_empty() {
            return Err(Error::config("select prompt requires at least one choice"));
        }
        let _raw = RawModeGuard::new()?;
        Self::run_select(prompt)
    }

    fn input(&mut self, message: &str, secret: bool) -> Result<String> {
        let _raw = RawModeGuard::new()?;
        Self::run_input(message, secret)
    }
}

/// One scripted response for [`ScriptedInteract`].
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Answer the next select prompt with this value.
    Select(String),
    /// Answer the next input prompt with this line.
    Input(String),
    /// Abort the next prompt as a user cancellation.
    Cancel,
}

/// Deterministic [`Interact`] implementation driven by a canned script.
/// Records every prompt message it sees for assertions.
#[derive(Debug, Default)]
pub struct ScriptedInteract {
    script: VecDeque<ScriptedResponse>,
    pub seen: Vec<String>,
}

impl ScriptedInteract {
    #[must_use]
    pub fn new(script: Vec<ScriptedResponse>) -> Self {
        Self {
            script: script.into(),
            seen: Vec::new(),
        }
    }

    fn next(&mut self, message: &str) -> Result<ScriptedResponse> {
        self.seen.push(message.to_string());
        self.script
            .pop_front()
            .ok_or_else(|| Error::config(format!("scripted prompt exhausted at: {message}")))
    }
}

impl Interact for ScriptedInteract {
    fn select(&mut self, prompt: &SelectPrompt) -> Result<String> {
        match self.next(&prompt.message)? {
            ScriptedResponse::Select(value) => Ok(value),
            ScriptedResponse::Cancel => Err(Error::Cancelled),
            ScriptedResponse::Input(_) => {
                Err(Error::config(format!("expected select at: {}", prompt.message)))
            }
        }
    }

    fn input(&mut self, message: &str, _secret: bool) -> Result<String> {
        match self.next(message)? {
            ScriptedResponse::Input(line) => Ok(line),
            ScriptedResponse::Cancel => Err(Error::Cancelled),
            ScriptedResponse::Select(_) => {
                Err(Error::config(format!("expected input at: {message}")))
            }
        }
    }
}
