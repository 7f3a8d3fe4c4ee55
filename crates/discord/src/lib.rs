//! Discord adapter: receives messages and the `/setup` slash command,
//! recovers the game from the message a command answers, and replies with
//! the rendered board.

pub mod bot;
pub mod commands;
pub mod error;
pub mod gating;
pub mod handler;
pub mod history;
pub mod outbound;
pub mod state;

pub use {
    bot::start,
    error::{Error, Result},
    handler::FenbotHandler,
};
