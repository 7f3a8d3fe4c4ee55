//! Config schema types (discord account, board rendering).

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FenbotConfig {
    pub discord: DiscordConfig,
    pub render: RenderConfig,
}

/// DM access policy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DmPolicy {
    /// Anyone can use the bot in DMs.
    #[default]
    Open,
    /// Only users on the allowlist.
    Allowlist,
    /// DMs disabled.
    Disabled,
}

/// Guild (server) access policy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GuildPolicy {
    /// Bot responds in every guild it is in.
    #[default]
    Open,
    /// Only in guilds on the allowlist.
    Allowlist,
    /// Guild messages ignored.
    Disabled,
}

/// Discord bot account.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Bot token from the Discord developer portal.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// Game name shown in the bot's presence ("Playing <activity>").
    pub activity: Option<String>,

    /// Register the `/setup` slash command on startup.
    pub register_commands: bool,

    pub dm_policy: DmPolicy,
    pub guild_policy: GuildPolicy,

    /// Guild IDs allowed under `guild_policy = "allowlist"`.
    pub guild_allowlist: Vec<String>,

    /// Channel IDs the bot listens in. Empty means all channels.
    pub channel_allowlist: Vec<String>,

    /// User IDs allowed under `dm_policy = "allowlist"`.
    pub user_allowlist: Vec<String>,
}

impl DiscordConfig {
    /// Whether a non-empty token has been configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"[REDACTED]")
            .field("activity", &self.activity)
            .field("dm_policy", &self.dm_policy)
            .field("guild_policy", &self.guild_policy)
            .finish_non_exhaustive()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            activity: Some("chess".into()),
            register_commands: true,
            dm_policy: DmPolicy::default(),
            guild_policy: GuildPolicy::default(),
            guild_allowlist: Vec::new(),
            channel_allowlist: Vec::new(),
            user_allowlist: Vec::new(),
        }
    }
}

/// Board image appearance. Colours are `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Edge length of the square image in pixels, margin included.
    pub size: u32,
    /// Draw file letters and rank numbers in the margin.
    pub coordinates: bool,
    pub light_square: String,
    pub dark_square: String,
    pub margin_color: String,
    pub coordinate_color: String,
    /// Arrow for the most recent move of a batch.
    pub last_move_arrow: String,
    /// Arrows for the earlier moves of a batch.
    pub move_arrow: String,
    /// Centre colour of the radial highlight under a king in check.
    pub check_highlight: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 350,
            coordinates: true,
            light_square: "#ffce9e".into(),
            dark_square: "#d18b47".into(),
            margin_color: "#212121".into(),
            coordinate_color: "#e5e5e5".into(),
            last_move_arrow: "#15781b80".into(),
            move_arrow: "#00308880".into(),
            check_highlight: "#ff0000".into(),
        }
    }
}
