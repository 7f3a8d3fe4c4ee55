//! The `/setup` slash command.

use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandOptionType, CreateCommand,
    CreateCommandOption,
};

pub const SETUP: &str = "setup";
const FEN_OPTION: &str = "fen";

#[must_use]
pub fn setup_command() -> CreateCommand {
    CreateCommand::new(SETUP)
        .description("Setup a new chess game")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                FEN_OPTION,
                "Starting position in FEN (standard position if omitted)",
            )
            .required(false),
        )
}

/// The `fen` option, trimmed; blank counts as absent.
#[must_use]
pub fn fen_option(options: &[CommandDataOption]) -> Option<String> {
    options
        .iter()
        .find(|o| o.name == FEN_OPTION)
        .and_then(|o| match &o.value {
            CommandDataOptionValue::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
}
