//! Slash-command parser for the navigation shell
//!
//! Commands are prefixed with `/`. The command word is case-insensitive;
//! arguments keep their case so search text and file names survive.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from parsing a shell command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Navigate to a route path
    Go(String),
    /// Open the login view
    Login,
    /// End the session and go home
    Logout,
    /// Show the current session
    Whoami,
    /// Show the navigation bar
    Nav,
    /// Set the search text of the current list
    Search(String),
    /// Set an exact-match filter on the current list
    Filter { field: String, value: String },
    /// Drop search and filters
    Clear,
    /// Jump to a page
    Page(usize),
    /// Next page
    Next,
    /// Previous page
    Prev,
    /// Export the filtered list to CSV
    Export(Option<PathBuf>),
    /// Show one record of the current list
    Show(u64),
    /// Delete one record of the current list
    Delete(u64),
    /// Reload the current view
    Refresh,
    /// Show command help
    Help,
    /// Leave the shell
    Exit,
    /// Blank or plain-text input
    None,
}

/// Parse one line of shell input
///
/// # Examples
///
/// ```
/// use reliefdesk::shell::commands::{parse_shell_command, ShellCommand};
///
/// assert_eq!(
///     parse_shell_command("/go /volunteers").unwrap(),
///     ShellCommand::Go("/volunteers".to_string())
/// );
/// assert_eq!(parse_shell_command("/NEXT").unwrap(), ShellCommand::Next);
/// assert_eq!(parse_shell_command("hello").unwrap(), ShellCommand::None);
/// assert!(parse_shell_command("/frobnicate").is_err());
/// ```
pub fn parse_shell_command(input: &str) -> Result<ShellCommand, CommandError> {
    let trimmed = input.trim();
    let (word, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    if !word.starts_with('/') && word != "exit" && word != "quit" {
        return Ok(ShellCommand::None);
    }

    match word.as_str() {
        "/go" | "/open" | "/cd" => {
            required(&word, arg, "/go <path>").map(|p| ShellCommand::Go(p.to_string()))
        }
        "/login" => no_arg(&word, arg, ShellCommand::Login),
        "/logout" => no_arg(&word, arg, ShellCommand::Logout),
        "/whoami" => no_arg(&word, arg, ShellCommand::Whoami),
        "/nav" => no_arg(&word, arg, ShellCommand::Nav),
        // bare /search clears the search text
        "/search" => Ok(ShellCommand::Search(arg.to_string())),
        "/filter" => {
            let filter = required(&word, arg, "/filter <field>=<value>")?;
            match filter.split_once('=') {
                Some((field, value)) if !field.trim().is_empty() => Ok(ShellCommand::Filter {
                    field: field.trim().to_string(),
                    value: value.trim().to_string(),
                }),
                _ => Err(CommandError::UnsupportedArgument {
                    command: word.clone(),
                    arg: filter.to_string(),
                }),
            }
        }
        "/clear" => no_arg(&word, arg, ShellCommand::Clear),
        "/page" => {
            let page = required(&word, arg, "/page <n>")?;
            match page.parse::<usize>() {
                Ok(n) if n > 0 => Ok(ShellCommand::Page(n)),
                _ => Err(CommandError::UnsupportedArgument {
                    command: word.clone(),
                    arg: page.to_string(),
                }),
            }
        }
        "/next" | "/n" => no_arg(&word, arg, ShellCommand::Next),
        "/prev" | "/p" => no_arg(&word, arg, ShellCommand::Prev),
        "/export" => Ok(ShellCommand::Export(
            (!arg.is_empty()).then(|| PathBuf::from(arg)),
        )),
        "/show" => parse_id(&word, arg, "/show <id>").map(ShellCommand::Show),
        "/delete" | "/rm" => parse_id(&word, arg, "/delete <id>").map(ShellCommand::Delete),
        "/refresh" | "/r" => no_arg(&word, arg, ShellCommand::Refresh),
        "/help" | "/?" => Ok(ShellCommand::Help),
        "exit" | "quit" | "/exit" | "/quit" => Ok(ShellCommand::Exit),
        _ => Err(CommandError::UnknownCommand(word)),
    }
}

fn required<'a>(command: &str, arg: &'a str, usage: &str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        })
    } else {
        Ok(arg)
    }
}

fn no_arg(command: &str, arg: &str, parsed: ShellCommand) -> Result<ShellCommand, CommandError> {
    if arg.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
    }
}

fn parse_id(command: &str, arg: &str, usage: &str) -> Result<u64, CommandError> {
    required(command, arg, usage)?
        .parse::<u64>()
        .map_err(|_| CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
}

/// Print the shell command reference
pub fn print_help() {
    println!(
        r#"
Shell Commands
==============

NAVIGATION:
  /go <path>          - Open a view (/, /help-requests, /volunteers,
                        /emergency-contacts, /rescue-operations,
                        /relief-supplies, /login)
  /nav                - Show the navigation bar
  /refresh            - Reload the current view

SESSION:
  /login              - Log in as administrator
  /logout             - Log out and return home
  /whoami             - Show the current session

LISTS:
  /search [text]      - Search the current list (no text clears it)
  /filter <f>=<v>     - Exact-match filter, e.g. /filter status=pending
                        (value 'all' removes the filter)
  /clear              - Drop search and filters
  /page <n>           - Jump to page n
  /next, /prev        - Page forward or back
  /show <id>          - Show one record
  /delete <id>        - Delete one record
  /export [file]      - Export the filtered list to CSV

OTHER:
  /help, /?           - Show this help
  /exit, exit, quit   - Leave the shell
"#
    );
}
