use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("discord token is not configured")]
    MissingToken,

    #[error(transparent)]
    Discord(#[from] serenity::Error),

    #[error(transparent)]
    Game(#[from] fenbot_game::Error),

    #[error("board rendering task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
