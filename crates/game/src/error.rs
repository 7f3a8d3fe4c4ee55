#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Render(#[from] fenbot_render::Error),

    #[error("board size {size} is outside {min}..={max}")]
    InvalidSize { size: u32, min: u32, max: u32 },

    #[error("invalid colour {value:?} for render.{field}")]
    InvalidColor { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
