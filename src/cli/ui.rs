//! Terminal primitives for the command loop
//!
//! Conventions:
//! - Prompts come from the locale tables, never hard-coded here
//! - A closed input (Ctrl+D, Esc, end of pipe) ends the loop like `q`

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, InquireError, Text};
use std::io::{self, BufRead, Write};

/// Source of command lines
pub trait LineReader {
    /// Next line, or `None` once input is closed
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive prompt backed by inquire
pub struct TerminalReader;

impl LineReader for TerminalReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let result = Text::new(prompt)
            .with_render_config(minimal_render_config())
            .prompt();

        match result {
            Ok(input) => Ok(Some(input)),
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Line reader over any buffered input (pipes, files, tests).
/// The prompt is not echoed.
pub struct PipedReader<R> {
    input: R,
}

impl<R: BufRead> PipedReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> LineReader for PipedReader<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Clear the terminal screen and move cursor to top-left
pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}
