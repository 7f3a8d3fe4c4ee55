//! Game flow for fenbot: recognise a command, recover the board from the
//! message it answers, apply it and build the reply.
//!
//! Nothing here talks to a chat platform; adapters hand in message text and
//! send back the returned [`ReplyPayload`](fenbot_common::ReplyPayload).

pub mod anchor;
pub mod command;
pub mod engine;
pub mod error;
pub mod reply;

pub use {
    anchor::{Anchor, AnchorRejection, ChatMessage, Side, resolve_anchor},
    command::Command,
    engine::{GameEngine, IMAGE_FILENAME},
    error::{Error, Result},
    fenbot_rules::START_FEN,
};
