//! Interactive prompts for filling the entry form.
//!
//! Batch mode (or a non-terminal stdin) disables all prompting; omitted
//! values stay at their defaults.

use dialoguer::{theme::ColorfulTheme, Editor, Input};
use std::io::{self, IsTerminal};

/// Options for prompting behavior.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    /// If true, never prompt even on a terminal.
    pub batch_mode: bool,
}

impl PromptOptions {
    /// Whether prompting is possible in this invocation.
    pub fn interactive(&self) -> bool {
        io::stdin().is_terminal() && !self.batch_mode
    }
}

/// Error type for prompting.
#[derive(Debug)]
pub enum PromptError {
    Io(io::Error),
    Cancelled,
}

impl std::fmt::Display for PromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptError::Io(e) => write!(f, "IO error: {e}"),
            PromptError::Cancelled => write!(f, "input cancelled by user"),
        }
    }
}

impl std::error::Error for PromptError {}

/// Prompt for a single-line field with an optional pre-filled default.
pub fn prompt_for_field(
    prompt_text: &str,
    default: Option<&str>,
    required: bool,
) -> Result<String, PromptError> {
    let theme = ColorfulTheme::default();

    let mut input = Input::<String>::with_theme(&theme);
    input = input.with_prompt(prompt_text);
    input = input.allow_empty(!required);

    if let Some(def) = default {
        input = input.with_initial_text(def);
    }

    input.interact_text().map_err(dialoguer_error_to_prompt_error)
}

/// Open the user's editor for multi-line text. Returns the initial text
/// unchanged when the editor is closed without saving.
pub fn prompt_multiline(initial: &str) -> Result<String, PromptError> {
    let content = Editor::new()
        .edit(initial)
        .map_err(dialoguer_error_to_prompt_error)?;
    Ok(content.unwrap_or_else(|| initial.to_string()))
}

fn dialoguer_error_to_prompt_error(e: dialoguer::Error) -> PromptError {
    match e {
        dialoguer::Error::IO(io_err) => {
            if io_err.kind() == io::ErrorKind::UnexpectedEof {
                PromptError::Cancelled
            } else {
                PromptError::Io(io_err)
            }
        }
    }
}
