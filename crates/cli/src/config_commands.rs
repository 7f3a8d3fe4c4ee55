use std::path::Path;

use {
    anyhow::Result,
    clap::Subcommand,
    fenbot_config::{FenbotConfig, Severity, ValidationResult, discover_and_load, validate_config},
    secrecy::Secret,
};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors/warnings.
    Check {
        /// Show informational diagnostics in addition to errors and warnings.
        #[arg(long)]
        verbose: bool,
    },
    /// Print the resolved configuration with the token redacted.
    Show,
}

pub fn handle_config(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Check { verbose } => check(explicit, verbose),
        ConfigAction::Show => show(explicit),
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Key-level checks come from the file itself; value checks run on the
/// resolved config so `DISCORD_TOKEN` and `FENBOT_BOARD_SIZE` count.
pub fn diagnose(explicit: Option<&Path>) -> Result<ValidationResult> {
    let loaded = discover_and_load(explicit)?;

    let mut result = match loaded.path.as_deref() {
        Some(path) if path.extension().is_some_and(|e| e == "toml") => {
            let mut file = fenbot_config::validate_file(path, false);
            file.diagnostics
                .retain(|d| matches!(d.category, "syntax" | "unknown-field"));
            file
        },
        other => ValidationResult {
            diagnostics: Vec::new(),
            config_path: other.map(Path::to_path_buf),
        },
    };
    result
        .diagnostics
        .extend(validate_config(&loaded.config, true).diagnostics);
    Ok(result)
}

fn check(explicit: Option<&Path>, verbose: bool) -> Result<()> {
    let result = diagnose(explicit)?;

    // Print which file we're checking
    if let Some(ref path) = result.config_path {
        eprintln!("Checking {}\n", path.display());
    } else {
        eprintln!("No config file found; checking defaults and environment.\n");
    }

    let mut shown = 0;
    for d in &result.diagnostics {
        if d.severity == Severity::Info && !verbose {
            continue;
        }

        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
            Severity::Info => CYAN,
        };

        if d.path.is_empty() {
            eprintln!("  {BOLD}{color}{}{RESET} {}", d.severity, d.message);
        } else {
            eprintln!("  {BOLD}{color}{}{RESET} {}: {}", d.severity, d.path, d.message);
        }
        shown += 1;
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if shown > 0 {
        eprintln!();
    }

    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    if errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// TOML rendering of `config` that never contains the real token.
pub fn redacted_toml(config: &FenbotConfig) -> Result<String> {
    let mut config = config.clone();
    if config.discord.has_token() {
        config.discord.token = Secret::new("[REDACTED]".into());
    }
    Ok(toml::to_string_pretty(&config)?)
}

fn show(explicit: Option<&Path>) -> Result<()> {
    let loaded = discover_and_load(explicit)?;
    match &loaded.path {
        Some(path) => eprintln!("# loaded from {}", path.display()),
        None => eprintln!("# no config file found; defaults and environment"),
    }
    print!("{}", redacted_toml(&loaded.config)?);
    Ok(())
}
