mod config_commands;
mod render_commands;

use std::path::PathBuf;

use {
    anyhow::bail,
    clap::{Parser, Subcommand},
    fenbot_config::{Severity, discover_and_load, validate_config},
    tracing::{error, info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "fenbot", about = "Chess boards for Discord, kept in the replies", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to use instead of searching ./ and ~/.config/fenbot/.
    #[arg(long, global = true, env = "FENBOT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve commands (default).
    Run,
    /// Render a position to a PNG file without connecting.
    Render(render_commands::RenderArgs),
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let loaded = discover_and_load(cli.config.as_deref())?;
    if let Some(path) = &loaded.path {
        info!(path = %path.display(), "config loaded");
    }

    let report = validate_config(&loaded.config, true);
    for d in &report.diagnostics {
        match d.severity {
            Severity::Error => error!(path = %d.path, "{}", d.message),
            Severity::Warning => warn!(path = %d.path, "{}", d.message),
            Severity::Info => {},
        }
    }
    if report.has_errors() {
        bail!("invalid configuration; run `fenbot config check` for details");
    }

    fenbot_discord::start(&loaded.config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "fenbot starting");

    match cli.command {
        None | Some(Commands::Run) => run(&cli).await,
        Some(Commands::Render(args)) => {
            let loaded = discover_and_load(cli.config.as_deref())?;
            render_commands::handle_render(args, &loaded.config.render)
        },
        Some(Commands::Config { action }) => {
            config_commands::handle_config(action, cli.config.as_deref())
        },
    }
}
