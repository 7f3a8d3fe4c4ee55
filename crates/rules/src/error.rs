use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The text could not be parsed as a FEN, or describes an impossible
    /// position.
    #[error("{reason}")]
    InvalidFen { fen: String, reason: String },

    /// A move token was neither legal SAN nor legal UCI in the position.
    #[error("{reason}")]
    IllegalMove {
        /// Zero-based position of the token in its batch.
        index: usize,
        token: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
