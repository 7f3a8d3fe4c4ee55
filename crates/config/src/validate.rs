//! Configuration validation.
//!
//! Detects unknown or misspelled keys in the raw file and checks values the
//! bot cannot run with (missing token, unusable board size, bad colours).

use std::path::{Path, PathBuf};

use crate::{color::parse_hex_color, schema::FenbotConfig};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "unknown-field", "missing-token", "range", "color"
    pub category: &'static str,
    /// Dotted path, e.g. "render.size"
    pub path: String,
    pub message: String,
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<PathBuf>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(
        &mut self,
        severity: Severity,
        category: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(Diagnostic {
            severity,
            category,
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Smallest and largest accepted board image edge, in pixels.
pub const BOARD_SIZE_RANGE: std::ops::RangeInclusive<u32> = 64..=2048;

const TOP_LEVEL_KEYS: &[&str] = &["discord", "render"];

const DISCORD_KEYS: &[&str] = &[
    "token",
    "activity",
    "register_commands",
    "dm_policy",
    "guild_policy",
    "guild_allowlist",
    "channel_allowlist",
    "user_allowlist",
];

const RENDER_KEYS: &[&str] = &[
    "size",
    "coordinates",
    "light_square",
    "dark_square",
    "margin_color",
    "coordinate_color",
    "last_move_arrow",
    "move_arrow",
    "check_highlight",
];

/// Validate a TOML file on disk: syntax, unknown keys, then values.
pub fn validate_file(path: &Path, require_token: bool) -> ValidationResult {
    let mut result = match std::fs::read_to_string(path) {
        Ok(raw) => validate_toml_str(&crate::env_subst::substitute_env(&raw), require_token),
        Err(e) => {
            let mut result = ValidationResult::default();
            result.push(
                Severity::Error,
                "syntax",
                "",
                format!("cannot read {}: {e}", path.display()),
            );
            result
        },
    };
    result.config_path = Some(path.to_path_buf());
    result
}

/// Validate raw TOML text.
pub fn validate_toml_str(toml_str: &str, require_token: bool) -> ValidationResult {
    let mut result = ValidationResult::default();

    let value: toml::Value = match toml::from_str(toml_str) {
        Ok(v) => v,
        Err(e) => {
            result.push(Severity::Error, "syntax", "", e.to_string());
            return result;
        },
    };
    check_unknown_fields(&value, &mut result);

    match toml::from_str::<FenbotConfig>(toml_str) {
        Ok(config) => result
            .diagnostics
            .extend(validate_config(&config, require_token).diagnostics),
        Err(e) => result.push(Severity::Error, "syntax", "", e.to_string()),
    }
    result
}

/// Check semantic constraints on an already-parsed config.
pub fn validate_config(config: &FenbotConfig, require_token: bool) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !config.discord.has_token() {
        let severity = if require_token {
            Severity::Error
        } else {
            Severity::Warning
        };
        result.push(
            severity,
            "missing-token",
            "discord.token",
            "no bot token configured (set discord.token or DISCORD_TOKEN)",
        );
    }

    if !BOARD_SIZE_RANGE.contains(&config.render.size) {
        result.push(
            Severity::Error,
            "range",
            "render.size",
            format!(
                "board size {} outside {}..={}",
                config.render.size,
                BOARD_SIZE_RANGE.start(),
                BOARD_SIZE_RANGE.end()
            ),
        );
    }

    let render = &config.render;
    for (key, value) in [
        ("light_square", &render.light_square),
        ("dark_square", &render.dark_square),
        ("margin_color", &render.margin_color),
        ("coordinate_color", &render.coordinate_color),
        ("last_move_arrow", &render.last_move_arrow),
        ("move_arrow", &render.move_arrow),
        ("check_highlight", &render.check_highlight),
    ] {
        if parse_hex_color(value).is_none() {
            result.push(
                Severity::Error,
                "color",
                format!("render.{key}"),
                format!("{value:?} is not a #rrggbb or #rrggbbaa colour"),
            );
        }
    }

    if config.discord.activity.as_deref().is_some_and(str::is_empty) {
        result.push(
            Severity::Info,
            "range",
            "discord.activity",
            "empty activity; omit the key to show no presence",
        );
    }

    result
}

fn check_unknown_fields(value: &toml::Value, result: &mut ValidationResult) {
    let Some(table) = value.as_table() else {
        return;
    };
    for (key, section) in table {
        let known = match key.as_str() {
            "discord" => DISCORD_KEYS,
            "render" => RENDER_KEYS,
            _ => {
                report_unknown(key, key, TOP_LEVEL_KEYS, result);
                continue;
            },
        };
        if let Some(section) = section.as_table() {
            for field in section.keys() {
                if !known.contains(&field.as_str()) {
                    report_unknown(&format!("{key}.{field}"), field, known, result);
                }
            }
        }
    }
}

fn report_unknown(path: &str, key: &str, candidates: &[&str], result: &mut ValidationResult) {
    let message = match suggest(key, candidates, 3) {
        Some(hint) => format!("unknown field \"{key}\" (did you mean \"{hint}\"?)"),
        None => format!("unknown field \"{key}\""),
    };
    result.push(Severity::Warning, "unknown-field", path, message);
}

/// Levenshtein distance between two ASCII-ish strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn suggest<'a>(needle: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (levenshtein(needle, c), *c))
        .filter(|(d, _)| *d <= max_distance)
        .min_by_key(|(d, _)| *d)
        .map(|(_, c)| c)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("size", "size"), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("szie", "size"), 2);
        assert_eq!(levenshtein("tokn", "token"), 1);
    }

    #[test]
    fn empty_config_only_lacks_token() {
        let result = validate_toml_str("", false);
        assert!(!result.has_errors(), "{:?}", result.diagnostics);
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.diagnostics[0].category, "missing-token");
    }

    #[test]
    fn missing_token_is_error_when_required() {
        let result = validate_toml_str("", true);
        assert!(result.has_errors());
    }

    #[test]
    fn unknown_field_with_suggestion() {
        let result = validate_toml_str("[render]\nszie = 300\n", false);
        let d = result
            .diagnostics
            .iter()
            .find(|d| d.category == "unknown-field")
            .unwrap();
        assert_eq!(d.path, "render.szie");
        assert!(d.message.contains("did you mean \"size\""), "{}", d.message);
    }

    #[test]
    fn unknown_top_level_section() {
        let result = validate_toml_str("[discrod]\ntoken = \"x\"\n", false);
        let d = result
            .diagnostics
            .iter()
            .find(|d| d.category == "unknown-field")
            .unwrap();
        assert_eq!(d.path, "discrod");
        assert!(d.message.contains("\"discord\""));
    }

    #[test]
    fn size_out_of_range() {
        let result = validate_toml_str("[render]\nsize = 16\n", false);
        assert!(result.has_errors());
        assert!(result.diagnostics.iter().any(|d| d.path == "render.size"));
    }

    #[test]
    fn bad_colour_reported() {
        let result = validate_toml_str("[render]\nmove_arrow = \"blue\"\n", false);
        let d = result
            .diagnostics
            .iter()
            .find(|d| d.category == "color")
            .unwrap();
        assert_eq!(d.path, "render.move_arrow");
        assert_eq!(d.severity, Severity::Error);
    }

    #[test]
    fn syntax_error_detected() {
        let result = validate_toml_str("this is not valid toml [[[", false);
        assert!(result.has_errors());
        assert!(result.diagnostics.iter().any(|d| d.category == "syntax"));
    }

    #[test]
    fn full_valid_config_has_no_diagnostics() {
        let toml = r##"
[discord]
token = "abc"
activity = "chess"
dm_policy = "allowlist"
user_allowlist = ["42"]

[render]
size = 400
coordinates = false
light_square = "#eeeed2"
dark_square = "#769656"
"##;
        let result = validate_toml_str(toml, true);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }
}
