use {
    shakmaty::{
        Board, CastlingMode, Chess, Color, EnPassantMode, File, Move, Position, Square, fen::Fen,
        san::SanPlus, uci::UciMove,
    },
    tracing::trace,
};

use crate::error::{Error, Result};

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A move applied through [`Game::play`], kept for drawing arrows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub from: Square,
    /// Destination of the moving piece; the king's square for castling.
    pub to: Square,
}

/// Informational state of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
}

/// A position plus the moves applied to it since it was parsed.
#[derive(Debug, Clone)]
pub struct Game {
    position: Chess,
    history: Vec<PlayedMove>,
}

impl Default for Game {
    fn default() -> Self {
        Self {
            position: Chess::default(),
            history: Vec::new(),
        }
    }
}

impl Game {
    /// Parse a FEN into a playable position.
    ///
    /// Castling rights that do not match the board, a pointless en-passant
    /// square and an impossible check are tolerated; anything else the rules
    /// library rejects is an [`Error::InvalidFen`].
    pub fn from_fen(fen: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        let parsed: Fen = fen
            .trim()
            .parse()
            .map_err(|e| invalid(format!("{e}: {:?}", fen.trim())))?;
        let position = parsed
            .into_position::<Chess>(CastlingMode::Standard)
            .or_else(|e| e.ignore_invalid_castling_rights())
            .or_else(|e| e.ignore_invalid_ep_square())
            .or_else(|e| e.ignore_impossible_check())
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            position,
            history: Vec::new(),
        })
    }

    /// Apply one move given as SAN (`Nf3`, `exd8=Q+`, `O-O`), falling back
    /// to UCI (`g1f3`) when the SAN reading does not fit the position.
    pub fn play(&mut self, token: &str) -> Result<&PlayedMove> {
        self.play_indexed(0, token)
    }

    /// Apply `tokens` in order to a copy of this game.
    ///
    /// The first token that fails aborts the batch; `self` is never touched,
    /// so a failed batch leaves no partially applied position behind.
    pub fn play_all<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Game> {
        let mut next = self.clone();
        for (index, token) in tokens.iter().enumerate() {
            next.play_indexed(index, token.as_ref())?;
        }
        Ok(next)
    }

    fn play_indexed(&mut self, index: usize, token: &str) -> Result<&PlayedMove> {
        let m = self.resolve(token).map_err(|reason| Error::IllegalMove {
            index,
            token: token.to_string(),
            reason,
        })?;
        let (from, to) = arrow_squares(&m).ok_or_else(|| Error::IllegalMove {
            index,
            token: token.to_string(),
            reason: "drop moves are not supported".into(),
        })?;

        trace!(token, %from, %to, "applying move");
        self.position.play_unchecked(m);
        self.history.push(PlayedMove { from, to });
        Ok(&self.history[self.history.len() - 1])
    }

    fn resolve(&self, token: &str) -> std::result::Result<Move, String> {
        let san_text = normalize_castling(token);
        let san_err = match san_text.parse::<SanPlus>() {
            Ok(san_plus) => match san_plus.san.to_move(&self.position) {
                Ok(m) => return Ok(m),
                Err(e) => format!("{e}: '{token}' in {}", self.fen()),
            },
            Err(e) => format!("{e}: '{token}'"),
        };

        token
            .parse::<UciMove>()
            .ok()
            .and_then(|uci| uci.to_move(&self.position).ok())
            .ok_or(san_err)
    }

    /// Serialize the current position. The en-passant square is written only
    /// when an en-passant capture is actually legal.
    #[must_use]
    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmoves().get()
    }

    #[must_use]
    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.position.board().king_of(color)
    }

    /// Square of the side-to-move's king when it is in check.
    #[must_use]
    pub fn checked_king(&self) -> Option<Square> {
        if self.is_check() {
            self.king_square(self.turn())
        } else {
            None
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        let pos = &self.position;
        if pos.is_checkmate() {
            GameStatus::Checkmate
        } else if pos.is_stalemate() {
            GameStatus::Stalemate
        } else if pos.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if pos.is_check() {
            GameStatus::Check
        } else {
            GameStatus::Ongoing
        }
    }

    /// Moves applied since parsing, oldest first.
    #[must_use]
    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }
}

/// Accept digit-zero castling (`0-0`, `0-0-0+`) as written by hand.
fn normalize_castling(token: &str) -> std::borrow::Cow<'_, str> {
    if token.starts_with("0-0") {
        token.replace('0', "O").into()
    } else {
        token.into()
    }
}

fn arrow_squares(m: &Move) -> Option<(Square, Square)> {
    match *m {
        Move::Normal { from, to, .. } | Move::EnPassant { from, to } => Some((from, to)),
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            Some((king, Square::from_coords(file, king.rank())))
        },
        Move::Put { .. } => None,
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn start_fen_round_trips() {
        let game = Game::from_fen(START_FEN).unwrap();
        assert_eq!(game.fen(), START_FEN);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.fullmove_number(), 1);
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let game = Game::from_fen(&format!("  {START_FEN} ")).unwrap();
        assert_eq!(game.fen(), START_FEN);
    }

    #[rstest]
    #[case("")]
    #[case("not a fen")]
    #[case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1")]
    #[case("8/8/8/8/8/8/8/8 w - - 0 1")]
    fn invalid_fen(#[case] fen: &str) {
        let err = Game::from_fen(fen).unwrap_err();
        assert!(matches!(err, Error::InvalidFen { .. }), "{err:?}");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn opening_sequence() {
        let mut game = Game::default();
        game.play("e4").unwrap();
        game.play("e5").unwrap();
        let nf3 = game.play("Nf3").unwrap().clone();
        assert_eq!(nf3.from, Square::G1);
        assert_eq!(nf3.to, Square::F3);
        assert_eq!(
            game.fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.fullmove_number(), 2);
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn uci_fallback() {
        let mut game = Game::default();
        let played = game.play("g1f3").unwrap().clone();
        assert_eq!((played.from, played.to), (Square::G1, Square::F3));
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn check_suffix_accepted() {
        let mut game =
            Game::from_fen("rnbqkbnr/ppppp2p/5p2/6p1/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3")
                .unwrap();
        game.play("Qh5#").unwrap();
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.checked_king(), Some(Square::E8));
    }

    #[rstest]
    #[case("O-O")]
    #[case("0-0")]
    #[case("e1g1")]
    fn castling_arrow_targets_king_square(#[case] token: &str) {
        let mut game =
            Game::from_fen("r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
                .unwrap();
        let played = game.play(token).unwrap().clone();
        assert_eq!((played.from, played.to), (Square::E1, Square::G1));
        assert!(game.fen().starts_with("r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq"));
    }

    #[test]
    fn illegal_move_reason_names_token() {
        let mut game = Game::default();
        let err = game.play("Ke2").unwrap_err();
        match err {
            Error::IllegalMove { index, token, reason } => {
                assert_eq!(index, 0);
                assert_eq!(token, "Ke2");
                assert!(reason.contains("'Ke2'"), "{reason}");
            },
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(game.fen(), START_FEN);
    }

    #[test]
    fn garbage_token_is_illegal_move() {
        let mut game = Game::default();
        let err = game.play("hello").unwrap_err();
        assert!(matches!(err, Error::IllegalMove { ref token, .. } if token == "hello"));
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let game = Game::default();
        let err = game.play_all(&["e4", "e5", "Ke3", "Nf3"]).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { index: 2, ref token, .. } if token == "Ke3"));
        assert_eq!(game.fen(), START_FEN);
        assert!(game.history().is_empty());

        let next = game.play_all(&["d4", "d5"]).unwrap();
        assert_eq!(next.history().len(), 2);
        assert_eq!(game.fen(), START_FEN);
    }

    #[test]
    fn en_passant_square_only_when_legal() {
        let game = Game::default().play_all(&["e4"]).unwrap();
        assert_eq!(
            game.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );

        let game = Game::default()
            .play_all(&["e4", "a6", "e5", "d5"])
            .unwrap();
        assert!(game.fen().contains(" w KQkq d6 0 3"), "{}", game.fen());
    }

    #[test]
    fn stalemate_and_insufficient_material() {
        let stalemate = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(stalemate.status(), GameStatus::Stalemate);

        let bare = Game::from_fen("8/8/4k3/8/8/4K3/8/8 w - - 0 1").unwrap();
        assert_eq!(bare.status(), GameStatus::InsufficientMaterial);
    }

    #[test]
    fn check_highlight_square() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
        assert_eq!(game.status(), GameStatus::Check);
        assert_eq!(game.checked_king(), Some(Square::E8));
        assert_eq!(game.king_square(Color::White), Some(Square::G1));
    }
}
