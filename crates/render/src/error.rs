use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse board SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("failed to encode board image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("board size {size} is too small to draw")]
    TooSmall { size: u32 },

    #[error("cannot allocate a {size}x{size} image")]
    Allocate { size: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
