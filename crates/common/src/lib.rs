//! Shared types and error plumbing used across the fenbot crates.

pub mod error;
pub mod types;

pub use {
    error::FromMessage,
    types::{Attachment, ReplyPayload},
};
