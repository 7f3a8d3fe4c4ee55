//! Configuration loading, validation, and env substitution.
//!
//! Config files: `fenbot.toml`, `fenbot.yaml`, `fenbot.yml` or `fenbot.json`,
//! searched in `./` then `~/.config/fenbot/`.
//!
//! Supports `${ENV_VAR}` and `${ENV_VAR:-default}` substitution in the raw
//! file text.

pub mod color;
pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    color::parse_hex_color,
    error::{Error, Result},
    loader::{LoadedConfig, apply_env_overrides, config_dir, discover_and_load, load_config},
    schema::{DiscordConfig, DmPolicy, FenbotConfig, GuildPolicy, RenderConfig},
    validate::{Diagnostic, Severity, ValidationResult, validate_config, validate_file},
};
