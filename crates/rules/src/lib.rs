//! Chess rules for fenbot.
//!
//! A thin layer over `shakmaty`: parse a FEN, apply SAN/UCI move tokens in
//! order, and answer the questions the responder and renderer ask (side to
//! move, move number, check, king squares).

pub mod error;
pub mod game;

pub use {
    error::{Error, Result},
    game::{Game, GameStatus, PlayedMove, START_FEN},
    shakmaty::{Board, Color, Square},
};
