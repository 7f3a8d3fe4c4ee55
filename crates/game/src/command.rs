//! Text commands understood by the bot.

/// A recognised command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a game from `fen`, or the standard position when absent.
    Setup { fen: Option<String> },
    /// Apply the move tokens in order.
    Move { tokens: Vec<String> },
    Flip,
    Status,
}

impl Command {
    /// Classify a message. Anything that is not a command yields `None`.
    ///
    /// `flip` and `status` must be the whole (trimmed) message. `move` and
    /// `setup` must be the first word; the rest of the text is their
    /// argument. A `move` without tokens is not a command. Move tokens are
    /// not checked here.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (head, rest) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));

        match head {
            "flip" if rest.is_empty() => Some(Self::Flip),
            "status" if rest.is_empty() => Some(Self::Status),
            "move" => {
                let tokens: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
                (!tokens.is_empty()).then_some(Self::Move { tokens })
            },
            "setup" => {
                let fen = rest.trim();
                Some(Self::Setup {
                    fen: (!fen.is_empty()).then(|| fen.to_string()),
                })
            },
            _ => None,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Setup { .. } => "setup",
            Self::Move { .. } => "move",
            Self::Flip => "flip",
            Self::Status => "status",
        }
    }
}
