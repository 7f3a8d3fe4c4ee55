//! The first line of every board reply doubles as the game state:
//!
//! ```text
//! **FEN** `<fen>` **<W|B>**
//! ```
//!
//! A later command is resolved against the bot message it answers, so no
//! state is stored between requests.

use tracing::debug;

const PREFIX: &str = "**FEN** `";

/// Perspective of the board image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    #[must_use]
    pub fn marker(self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'B',
        }
    }

    #[must_use]
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "W" => Some(Self::White),
            "B" => Some(Self::Black),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Whether the image is drawn from Black's side.
    #[must_use]
    pub fn is_flipped(self) -> bool {
        self == Self::Black
    }
}

/// State recovered from a previous board reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Trimmed FEN; not validated until a command uses it.
    pub fen: String,
    pub side: Side,
}

impl Anchor {
    #[must_use]
    pub fn new(fen: impl Into<String>, side: Side) -> Self {
        Self {
            fen: fen.into(),
            side,
        }
    }

    /// Read the anchor from the first line of `text`.
    ///
    /// A missing side marker means White. Anything after the closing
    /// backtick other than `**W**` or `**B**` makes the line malformed.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let line = text.lines().next()?;
        let rest = line.trim_end().strip_prefix(PREFIX)?;
        let (fen, tail) = rest.split_once('`')?;

        let tail = tail.trim();
        let side = if tail.is_empty() {
            Side::White
        } else {
            tail.strip_prefix("**")
                .and_then(|t| t.strip_suffix("**"))
                .and_then(Side::from_marker)?
        };

        Some(Self::new(fen.trim(), side))
    }

    /// The first line of a reply carrying this state.
    #[must_use]
    pub fn header_line(&self) -> String {
        format!("{PREFIX}{}` **{}**", self.fen, self.side.marker())
    }
}

/// Platform-neutral view of a message that may hold an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author_id: u64,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(author_id: u64, content: impl Into<String>) -> Self {
        Self {
            author_id,
            content: content.into(),
        }
    }
}

/// Why a command was not tied to a game. None of these produce a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnchorRejection {
    #[error("command does not answer an earlier message")]
    NotAReply,
    #[error("answered message was not written by the bot")]
    WrongAuthor,
    #[error("answered message has no board header")]
    MalformedAnchor,
}

/// Check that `candidate` is a board reply written by `bot_id` and read its
/// state.
pub fn resolve_anchor(
    candidate: Option<&ChatMessage>,
    bot_id: u64,
) -> Result<Anchor, AnchorRejection> {
    let message = candidate.ok_or(AnchorRejection::NotAReply)?;
    if message.author_id != bot_id {
        debug!(
            author_id = message.author_id,
            bot_id, "anchor candidate has another author"
        );
        return Err(AnchorRejection::WrongAuthor);
    }
    Anchor::parse(&message.content).ok_or(AnchorRejection::MalformedAnchor)
}
