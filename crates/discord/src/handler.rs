//! Discord event handler for serenity.

use std::sync::Arc;

use {
    fenbot_common::ReplyPayload,
    fenbot_config::DiscordConfig,
    fenbot_game::{Anchor, Command, GameEngine, resolve_anchor},
    serenity::{
        all::{
            Context, EventHandler, GatewayIntents, GuildId, Interaction, Message, Ready, Timestamp,
        },
        async_trait,
    },
    tracing::{debug, info, warn},
};

use crate::{
    commands::{self, SETUP},
    error::Result,
    gating::{Origin, check_access},
    history, outbound,
    state::BotState,
};

/// Handler for Discord gateway events.
pub struct FenbotHandler {
    pub config: DiscordConfig,
    pub engine: GameEngine,
    pub state: Arc<BotState>,
}

impl FenbotHandler {
    #[must_use]
    pub fn new(config: DiscordConfig, engine: GameEngine) -> Self {
        Self {
            config,
            engine,
            state: Arc::new(BotState::default()),
        }
    }

    /// Required gateway intents for the bot.
    #[must_use]
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// Render off the async runtime; rasterizing a board is CPU-bound.
    async fn run_engine<F>(&self, job: F) -> Result<ReplyPayload>
    where
        F: FnOnce(&GameEngine) -> fenbot_game::Result<ReplyPayload> + Send + 'static,
    {
        let engine = self.engine.clone();
        Ok(tokio::task::spawn_blocking(move || job(&engine)).await??)
    }

    /// State of the game `msg` continues, or `None` when the command should
    /// be ignored.
    async fn find_anchor(&self, ctx: &Context, msg: &Message) -> Result<Option<Anchor>> {
        let Some(bot_id) = self.state.user_id() else {
            debug!("message received before ready");
            return Ok(None);
        };
        let candidate = history::anchor_candidate(ctx, msg).await?;
        match resolve_anchor(candidate.as_ref(), bot_id.get()) {
            Ok(anchor) => Ok(Some(anchor)),
            Err(rejection) => {
                debug!(
                    channel_id = %msg.channel_id,
                    message_id = %msg.id,
                    %rejection,
                    "command ignored"
                );
                Ok(None)
            },
        }
    }

    async fn handle_message(&self, ctx: &Context, msg: &Message, command: Command) -> Result<()> {
        let payload = match command {
            Command::Setup { fen } => {
                self.run_engine(move |engine| engine.setup(fen.as_deref()))
                    .await?
            },
            command => {
                let Some(anchor) = self.find_anchor(ctx, msg).await? else {
                    return Ok(());
                };
                self.run_engine(move |engine| engine.respond(&command, &anchor))
                    .await?
            },
        };
        outbound::send_reply(ctx, msg, &payload).await
    }

    /// Parent of the thread `msg` was sent in. Only looked up when a channel
    /// allowlist is configured.
    async fn message_thread_parent(&self, ctx: &Context, msg: &Message) -> Option<String> {
        if self.config.channel_allowlist.is_empty() || msg.guild_id.is_none() {
            return None;
        }
        match history::thread_parent(ctx, msg.channel_id).await {
            Ok(parent) => parent.map(|id| id.to_string()),
            Err(e) => {
                debug!(channel_id = %msg.channel_id, error = %e, "channel lookup failed");
                None
            },
        }
    }

    async fn register_commands(&self, ctx: &Context) {
        match serenity::all::Command::create_global_command(&ctx.http, commands::setup_command())
            .await
        {
            Ok(registered) => info!(command = %registered.name, "slash command registered"),
            Err(e) => warn!(error = %e, "failed to register slash command"),
        }
    }
}

#[async_trait]
impl EventHandler for FenbotHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        if !self.state.set_user_id(ready.user.id) {
            warn!(user_id = %ready.user.id, "bot user id changed after reconnect");
        }
        info!(
            bot_name = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            ready_at = %Timestamp::now(),
            "discord bot ready"
        );

        if self.config.register_commands {
            self.register_commands(&ctx).await;
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Skip our own replies; other bots may issue commands
        if self.state.is_self(msg.author.id) {
            return;
        }

        let Some(command) = Command::parse(&msg.content) else {
            return;
        };

        let user_id = msg.author.id.to_string();
        let guild_id = msg.guild_id.map(|g| g.to_string());
        let channel_id = msg.channel_id.to_string();
        let parent_id = self.message_thread_parent(&ctx, &msg).await;
        let origin = Origin {
            user_id: &user_id,
            guild_id: guild_id.as_deref(),
            channel_id: &channel_id,
            parent_id: parent_id.as_deref(),
        };
        if !check_access(&self.config, &origin) {
            debug!(%user_id, %channel_id, "access denied");
            return;
        }

        let name = command.name();
        debug!(command = name, %user_id, %channel_id, "command received");
        if let Err(e) = self.handle_message(&ctx, &msg, command).await {
            warn!(command = name, %channel_id, error = %e, "failed to handle command");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        if command.data.name != SETUP {
            return;
        }

        let user_id = command.user.id.to_string();
        let guild_id = command.guild_id.map(|g| g.to_string());
        let channel_id = command.channel_id.to_string();
        let parent_id = command
            .channel
            .as_ref()
            .and_then(|channel| history::thread_parent_id(channel.kind, channel.parent_id))
            .map(|id| id.to_string());
        let origin = Origin {
            user_id: &user_id,
            guild_id: guild_id.as_deref(),
            channel_id: &channel_id,
            parent_id: parent_id.as_deref(),
        };
        if !check_access(&self.config, &origin) {
            debug!(%user_id, %channel_id, "access denied");
            return;
        }

        let fen = commands::fen_option(&command.data.options);
        debug!(%user_id, %channel_id, fen = ?fen, "setup command received");
        let result = match self
            .run_engine(move |engine| engine.setup(fen.as_deref()))
            .await
        {
            Ok(payload) => outbound::respond_to_command(&ctx, &command, &payload).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(%channel_id, error = %e, "failed to answer setup command");
        }
    }

    async fn cache_ready(&self, _ctx: Context, guilds: Vec<GuildId>) {
        debug!(guild_count = guilds.len(), "discord cache ready");
    }
}
