//! Chessboard images: squares, pieces, check highlight, move arrows and
//! coordinate labels. Boards are drawn as SVG and rasterized to PNG.

pub mod board;
pub mod error;
mod pieces;
mod svg;

pub use {
    board::{Arrow, BoardRenderer, Color, DEFAULT_SIZE, MIN_SIZE, RenderOptions, Theme},
    error::{Error, Result},
};
