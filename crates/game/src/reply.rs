//! Reply text.

use {
    fenbot_rules::{Color, GameStatus},
    std::fmt,
};

use crate::anchor::Anchor;

/// What a board reply reports having done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    Setup,
    Moved(&'a [String]),
    Flipped,
    Status,
}

impl fmt::Display for Action<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => f.write_str("Set up game from FEN"),
            Self::Moved(tokens) => write!(f, "Moved `{}`", tokens.join(" ")),
            Self::Flipped => f.write_str("Flipped board"),
            Self::Status => f.write_str("Status"),
        }
    }
}

/// Everything shown in a board reply.
#[derive(Debug, Clone)]
pub struct PositionSummary<'a> {
    pub anchor: &'a Anchor,
    pub action: Action<'a>,
    pub turn: Color,
    pub fullmove: u32,
    pub status: GameStatus,
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn status_line(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::Ongoing => None,
        GameStatus::Check => Some("Check"),
        GameStatus::Checkmate => Some("Checkmate"),
        GameStatus::Stalemate => Some("Stalemate"),
        GameStatus::InsufficientMaterial => Some("Draw by insufficient material"),
    }
}

/// Text of a board reply; its first line is the anchor for the next command.
#[must_use]
pub fn position_text(summary: &PositionSummary<'_>) -> String {
    let mut text = format!(
        "{}\n**{}**\n**{} to play, move {}**",
        summary.anchor.header_line(),
        summary.action,
        color_name(summary.turn),
        summary.fullmove,
    );
    if let Some(line) = status_line(summary.status) {
        text.push_str(&format!("\n**{line}**"));
    }
    text
}

#[must_use]
pub fn invalid_fen_text(reason: &str) -> String {
    format!("**Invalid FEN**\n`{reason}`")
}

#[must_use]
pub fn invalid_move_text(token: &str, reason: &str) -> String {
    format!("**Invalid move `{token}`**\n`{reason}`")
}
