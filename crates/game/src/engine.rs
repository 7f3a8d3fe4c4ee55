//! Turns a command and its anchor into a reply with a rendered board.

use {
    fenbot_common::{Attachment, ReplyPayload},
    fenbot_config::{RenderConfig, parse_hex_color, validate::BOARD_SIZE_RANGE},
    fenbot_render::{Arrow, BoardRenderer, Color as Rgba, RenderOptions, Theme},
    fenbot_rules::{Game, START_FEN},
    tracing::{debug, info},
};

use crate::{
    anchor::{Anchor, Side},
    command::Command,
    error::{Error, Result},
    reply::{self, Action, PositionSummary},
};

/// File name of the board image attached to replies.
pub const IMAGE_FILENAME: &str = "position.png";

/// Stateless command executor. Safe to share between concurrent handlers.
#[derive(Debug, Clone)]
pub struct GameEngine {
    renderer: BoardRenderer,
    size: u32,
    coordinates: bool,
    last_move_arrow: Rgba,
    move_arrow: Rgba,
}

fn color(field: &'static str, value: &str) -> Result<Rgba> {
    parse_hex_color(value).ok_or_else(|| Error::InvalidColor {
        field,
        value: value.to_string(),
    })
}

impl GameEngine {
    pub fn new(config: &RenderConfig) -> Result<Self> {
        if !BOARD_SIZE_RANGE.contains(&config.size) {
            return Err(Error::InvalidSize {
                size: config.size,
                min: *BOARD_SIZE_RANGE.start(),
                max: *BOARD_SIZE_RANGE.end(),
            });
        }
        let theme = Theme {
            light_square: color("light_square", &config.light_square)?,
            dark_square: color("dark_square", &config.dark_square)?,
            margin: color("margin_color", &config.margin_color)?,
            coordinate: color("coordinate_color", &config.coordinate_color)?,
            check: color("check_highlight", &config.check_highlight)?,
            ..Theme::default()
        };
        Ok(Self {
            renderer: BoardRenderer::new(theme),
            size: config.size,
            coordinates: config.coordinates,
            last_move_arrow: color("last_move_arrow", &config.last_move_arrow)?,
            move_arrow: color("move_arrow", &config.move_arrow)?,
        })
    }

    /// Start a game from `fen`, or from the standard position.
    ///
    /// An unparsable FEN is answered with an error reply, not an `Err`.
    pub fn setup(&self, fen: Option<&str>) -> Result<ReplyPayload> {
        let fen = fen.unwrap_or(START_FEN);
        match Game::from_fen(fen) {
            Ok(game) => self.board_reply(&game, Side::White, Action::Setup),
            Err(e) => {
                debug!(fen, error = %e, "setup rejected");
                Ok(ReplyPayload::text(reply::invalid_fen_text(&e.to_string())))
            },
        }
    }

    /// Run `command` against the state in `anchor`.
    ///
    /// Bad FENs and illegal moves become text replies; only rendering
    /// failures are returned as `Err`.
    pub fn respond(&self, command: &Command, anchor: &Anchor) -> Result<ReplyPayload> {
        if let Command::Setup { fen } = command {
            return self.setup(fen.as_deref());
        }

        let game = match Game::from_fen(&anchor.fen) {
            Ok(game) => game,
            Err(e) => {
                debug!(fen = %anchor.fen, error = %e, "anchor holds an invalid FEN");
                return Ok(ReplyPayload::text(reply::invalid_fen_text(
                    &e.to_string(),
                )));
            },
        };

        match command {
            Command::Move { tokens } => match game.play_all(tokens) {
                Ok(next) => self.board_reply(&next, anchor.side, Action::Moved(tokens)),
                Err(e) => {
                    let (token, index) = match &e {
                        fenbot_rules::Error::IllegalMove { token, index, .. } => {
                            (token.as_str(), *index)
                        },
                        fenbot_rules::Error::InvalidFen { .. } => ("", 0),
                    };
                    debug!(token, index, batch = tokens.len(), error = %e, "move rejected");
                    Ok(ReplyPayload::text(reply::invalid_move_text(
                        token,
                        &e.to_string(),
                    )))
                },
            },
            Command::Flip => self.board_reply(&game, anchor.side.toggled(), Action::Flipped),
            Command::Setup { .. } | Command::Status => {
                self.board_reply(&game, anchor.side, Action::Status)
            },
        }
    }

    /// Newest move first; the newest is drawn in the last-move colour.
    fn arrows(&self, game: &Game) -> Vec<Arrow> {
        game.history()
            .iter()
            .rev()
            .enumerate()
            .map(|(i, played)| Arrow {
                from: played.from,
                to: played.to,
                color: if i == 0 {
                    self.last_move_arrow
                } else {
                    self.move_arrow
                },
            })
            .collect()
    }

    fn board_reply(&self, game: &Game, side: Side, action: Action<'_>) -> Result<ReplyPayload> {
        let anchor = Anchor::new(game.fen(), side);
        let options = RenderOptions {
            size: self.size,
            flipped: side.is_flipped(),
            coordinates: self.coordinates,
            check: game.checked_king(),
            arrows: self.arrows(game),
        };
        let png = self.renderer.render_png(game.board(), &options)?;

        let text = reply::position_text(&PositionSummary {
            anchor: &anchor,
            action,
            turn: game.turn(),
            fullmove: game.fullmove_number(),
            status: game.status(),
        });
        info!(
            fen = %anchor.fen,
            side = %side.marker(),
            action = %action,
            arrows = options.arrows.len(),
            "board reply ready"
        );
        Ok(ReplyPayload::text(text).with_attachment(Attachment::png(IMAGE_FILENAME, png)))
    }
}
