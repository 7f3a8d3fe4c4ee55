use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{
    env_subst::substitute_env,
    error::{Context, Error, Result},
    schema::FenbotConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["fenbot.toml", "fenbot.yaml", "fenbot.yml", "fenbot.json"];

/// A loaded config and the file it came from, if any.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: FenbotConfig,
    pub path: Option<PathBuf>,
}

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<FenbotConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&substitute_env(&raw), path)
}

/// Load config from `explicit` when given, otherwise discover it.
///
/// Search order for discovery:
/// 1. `./fenbot.{toml,yaml,yml,json}`
/// 2. `~/.config/fenbot/fenbot.{toml,yaml,yml,json}`
///
/// An explicit path must load; a discovered file that fails to parse is
/// logged and replaced by defaults. Environment overrides are applied last.
pub fn discover_and_load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let mut loaded = match explicit {
        Some(path) => LoadedConfig {
            config: load_config(path)?,
            path: Some(path.to_path_buf()),
        },
        None => match find_config_file() {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                match load_config(&path) {
                    Ok(config) => LoadedConfig {
                        config,
                        path: Some(path),
                    },
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                        LoadedConfig::default()
                    },
                }
            },
            None => {
                debug!("no config file found, using defaults");
                LoadedConfig::default()
            },
        },
    };

    apply_env_overrides(&mut loaded.config, |name| std::env::var(name).ok())?;
    Ok(loaded)
}

/// Fill gaps from the process environment.
///
/// `DISCORD_TOKEN` is used when the file did not set a token;
/// `FENBOT_BOARD_SIZE` always wins over `render.size`.
pub fn apply_env_overrides(
    config: &mut FenbotConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if !config.discord.has_token() {
        if let Some(token) = lookup("DISCORD_TOKEN").filter(|t| !t.trim().is_empty()) {
            debug!("using discord token from DISCORD_TOKEN");
            config.discord.token = Secret::new(token.trim().to_string());
        }
    }

    if let Some(size) = lookup("FENBOT_BOARD_SIZE") {
        config.render.size = size
            .trim()
            .parse()
            .with_context(|| format!("invalid FENBOT_BOARD_SIZE {size:?}"))?;
    }

    Ok(())
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(PathBuf::from)
        .chain(config_dir().into_iter().flat_map(|dir| {
            CONFIG_FILENAMES
                .iter()
                .map(move |name| dir.join(name))
        }))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/fenbot/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "fenbot").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> Result<FenbotConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => toml::from_str(raw).with_context(|| format!("parse {}", path.display())),
        "yaml" | "yml" => {
            serde_yaml::from_str(raw).with_context(|| format!("parse {}", path.display()))
        },
        "json" => serde_json::from_str(raw).with_context(|| format!("parse {}", path.display())),
        other => Err(Error::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}
