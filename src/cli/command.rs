//! Shell command parsing.

use std::str::FromStr;

use thiserror::Error;

use listwise::{ListingInput, ViewMode};

/// A command entered at the listing shell prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Replace the raw search text. An empty argument clears it.
    Search(String),
    /// Clear the search text.
    Clear,
    /// Next page (table view).
    Next,
    /// Previous page (table view).
    Prev,
    /// Jump to a page (table view).
    Page(u32),
    /// Scroll to the end of the grid, loading the next page.
    More,
    /// Select a view.
    Mode(ViewMode),
    /// Switch to the other view.
    Toggle,
    /// Re-issue the last failed fetch.
    Retry,
    /// Render the current snapshot.
    Show,
    /// Print the command summary.
    Help,
    /// Leave the shell.
    Quit,
}

/// Errors produced while parsing a shell command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The line held no command.
    #[error("no command entered")]
    Empty,
    /// The command word is not recognised.
    #[error("unknown command '{command}' (type 'help' for a list)")]
    Unknown {
        /// The unrecognised command word.
        command: String,
    },
    /// The command needs an argument that was not given.
    #[error("'{command}' needs an argument")]
    MissingArgument {
        /// The command missing its argument.
        command: &'static str,
    },
    /// The argument could not be interpreted.
    #[error("invalid argument for '{command}': {detail}")]
    InvalidArgument {
        /// The command whose argument was rejected.
        command: &'static str,
        /// Why the argument was rejected.
        detail: String,
    },
}

/// One-line summary of every command.
pub const HELP: &str = "\
commands:
  search <text>     filter by text (debounced)
  clear             clear the search text
  next | prev       move between pages (table view)
  page <n>          jump to page n (table view)
  more              load the next page (grid view)
  mode grid|table   select a view
  toggle            switch view
  retry             retry the last failed fetch
  show              print the current listing
  help              print this summary
  quit              leave";

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        let (word, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "search" | "s" | "/" => Ok(Self::Search(rest.to_owned())),
            "clear" => Ok(Self::Clear),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "page" => parse_page(rest).map(Self::Page),
            "more" | "m" => Ok(Self::More),
            "mode" => parse_mode(rest).map(Self::Mode),
            "toggle" | "t" => Ok(Self::Toggle),
            "retry" | "r" => Ok(Self::Retry),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown {
                command: other.to_owned(),
            }),
        }
    }
}

impl ShellCommand {
    /// Returns the session input this command sends, if any.
    ///
    /// `show`, `help` and `quit` are handled by the shell itself.
    #[must_use]
    pub fn into_input(self) -> Option<ListingInput> {
        match self {
            Self::Search(text) => Some(ListingInput::Search(text)),
            Self::Clear => Some(ListingInput::Search(String::new())),
            Self::Next => Some(ListingInput::NextPage),
            Self::Prev => Some(ListingInput::PrevPage),
            Self::Page(page) => Some(ListingInput::GoToPage(page)),
            Self::More => Some(ListingInput::NearEnd(true)),
            Self::Mode(mode) => Some(ListingInput::SetMode(mode)),
            Self::Toggle => Some(ListingInput::ToggleMode),
            Self::Retry => Some(ListingInput::Retry),
            Self::Show | Self::Help | Self::Quit => None,
        }
    }
}

fn parse_page(argument: &str) -> Result<u32, CommandError> {
    if argument.is_empty() {
        return Err(CommandError::MissingArgument { command: "page" });
    }
    argument
        .parse::<u32>()
        .map_err(|error| CommandError::InvalidArgument {
            command: "page",
            detail: error.to_string(),
        })
}

fn parse_mode(argument: &str) -> Result<ViewMode, CommandError> {
    if argument.is_empty() {
        return Err(CommandError::MissingArgument { command: "mode" });
    }
    argument
        .parse::<ViewMode>()
        .map_err(|error| CommandError::InvalidArgument {
            command: "mode",
            detail: error.to_string(),
        })
}
