//! Slash command parsing for the chat application.
//!
//! Input that starts with `/` controls the session locally and is never sent to the model.

use crate::chat::config::parse_temperature;

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Start a fresh session; the greeting is shown again.
    Restart,

    /// Re-render the whole transcript without animation.
    History,

    /// Change the model.
    Model(String),

    /// Set the sampling temperature.
    Temperature(f32),

    /// Clear the sampling temperature (use provider default).
    ClearTemperature,

    /// Toggle the typing animation.
    Typing(bool),

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it should be treated
/// as a regular message.
///
/// # Examples
///
/// ```
/// # use costbench::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/model gpt-4o").is_some());
/// assert!(parse_command("Cost model for a wheel hub").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "restart" | "new" => ChatCommand::Restart,
        "history" => ChatCommand::History,
        "model" => match argument {
            Some(model) => ChatCommand::Model(model.to_string()),
            None => ChatCommand::Invalid("/model requires a model name".to_string()),
        },
        "temperature" => match argument {
            Some(arg) if arg.eq_ignore_ascii_case("clear") => ChatCommand::ClearTemperature,
            Some(arg) => match parse_temperature(arg) {
                Ok(value) => ChatCommand::Temperature(value),
                Err(err) => ChatCommand::Invalid(format!("/temperature {err}")),
            },
            None => ChatCommand::Invalid("/temperature requires a value".to_string()),
        },
        "typing" => match argument.and_then(parse_on_off) {
            Some(value) => ChatCommand::Typing(value),
            None => ChatCommand::Invalid("/typing expects 'on' or 'off'".to_string()),
        },
        "stats" | "status" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /restart               Start over with a fresh conversation
  /history               Show the whole conversation again
  /model <name>          Change the model (e.g., /model gpt-5.1)
  /temperature <v>       Set temperature 0.0-2.0 (use 'clear' to reset)
  /typing on|off         Animate replies or print them at once
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat"#
}
