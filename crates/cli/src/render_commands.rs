use std::path::{Path, PathBuf};

use {
    anyhow::{Result, bail},
    clap::Args,
    fenbot_config::{RenderConfig, validate::BOARD_SIZE_RANGE},
    fenbot_game::{Anchor, Command, GameEngine, START_FEN, Side},
    tracing::info,
};

/// Offline rendering through the same engine the bot uses.
#[derive(Args)]
pub struct RenderArgs {
    /// Position to start from (standard position if omitted).
    #[arg(long)]
    pub fen: Option<String>,
    /// Moves to apply, in SAN or UCI.
    #[arg(long, num_args = 1..)]
    pub moves: Vec<String>,
    /// Draw from Black's side.
    #[arg(long)]
    pub flip: bool,
    /// Image edge in pixels (overrides render.size).
    #[arg(long)]
    pub size: Option<u32>,
    /// Where to write the PNG.
    #[arg(short, long, default_value = "position.png")]
    pub output: PathBuf,
}

pub fn handle_render(args: RenderArgs, config: &RenderConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(size) = args.size {
        if !BOARD_SIZE_RANGE.contains(&size) {
            bail!(
                "--size {size} is outside {}..={}",
                BOARD_SIZE_RANGE.start(),
                BOARD_SIZE_RANGE.end()
            );
        }
        config.size = size;
    }
    let engine = GameEngine::new(&config)?;

    let side = if args.flip {
        Side::Black
    } else {
        Side::White
    };
    let anchor = Anchor::new(args.fen.as_deref().unwrap_or(START_FEN).trim(), side);
    let command = if args.moves.is_empty() {
        Command::Status
    } else {
        Command::Move { tokens: args.moves }
    };

    let reply = engine.respond(&command, &anchor)?;
    println!("{}", reply.text);
    let Some(image) = reply.attachment else {
        bail!("no board rendered");
    };
    write_image(&args.output, &image.data)?;
    info!(path = %args.output.display(), bytes = image.data.len(), "board written");
    Ok(())
}

fn write_image(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: PathBuf) -> RenderArgs {
        RenderArgs {
            fen: None,
            moves: Vec::new(),
            flip: false,
            size: Some(96),
            output,
        }
    }

    #[test]
    fn writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("boards").join("start.png");
        let mut render = args(output.clone());
        render.moves = vec!["e4".into(), "c5".into()];
        render.flip = true;
        handle_render(render, &RenderConfig::default()).unwrap();

        let data = std::fs::read(&output).unwrap();
        assert_eq!(&data[..4], b"\x89PNG");
    }

    #[test]
    fn illegal_move_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("never.png");
        let mut render = args(output.clone());
        render.moves = vec!["e5".into()];
        assert!(handle_render(render, &RenderConfig::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn size_flag_is_range_checked() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("huge.png");
        let mut render = args(output.clone());
        render.size = Some(1_000_000);
        let err = handle_render(render, &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--size 1000000"), "{err}");
        assert!(!output.exists());
    }
}
