use {
    fenbot_config::FenbotConfig,
    fenbot_game::GameEngine,
    secrecy::ExposeSecret,
    serenity::{Client, gateway::ActivityData},
    tracing::info,
};

use crate::{
    error::{Error, Result},
    handler::FenbotHandler,
};

/// Connect to the gateway and process events until the connection ends.
pub async fn start(config: &FenbotConfig) -> Result<()> {
    if !config.discord.has_token() {
        return Err(Error::MissingToken);
    }

    let engine = GameEngine::new(&config.render)?;
    let handler = FenbotHandler::new(config.discord.clone(), engine);

    let mut builder = Client::builder(
        config.discord.token.expose_secret().trim(),
        FenbotHandler::intents(),
    )
    .event_handler(handler);
    if let Some(activity) = config.discord.activity.as_deref().filter(|a| !a.is_empty()) {
        builder = builder.activity(ActivityData::playing(activity));
    }
    let mut client = builder.await?;

    info!(
        register_commands = config.discord.register_commands,
        board_size = config.render.size,
        "starting discord client"
    );
    client.start().await?;
    Ok(())
}
