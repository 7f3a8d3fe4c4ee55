//! Who may talk to the bot, and where.

use fenbot_config::{DiscordConfig, DmPolicy, GuildPolicy};

/// Check if `id` matches an allowlist.
///
/// An empty allowlist allows everyone. Entries match case-insensitively and
/// may use `*` for any run of characters.
pub fn is_allowed(id: &str, allowlist: &[String]) -> bool {
    if allowlist.is_empty() {
        return true;
    }
    let id = id.to_lowercase();
    allowlist.iter().any(|pattern| {
        let pattern = pattern.to_lowercase();
        if pattern.contains('*') {
            glob_match(&pattern, &id)
        } else {
            pattern == id
        }
    })
}

fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    let [first, middle @ .., last] = parts.as_slice() else {
        return pattern == text;
    };
    let Some(mut rest) = text.strip_prefix(*first) else {
        return false;
    };
    for part in middle.iter().filter(|part| !part.is_empty()) {
        match rest.find(*part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }
    // the last segment is anchored at the end
    rest.ends_with(*last)
}

/// Where a message or interaction came from.
#[derive(Debug, Clone, Copy)]
pub struct Origin<'a> {
    pub user_id: &'a str,
    /// `None` for direct messages.
    pub guild_id: Option<&'a str>,
    pub channel_id: &'a str,
    /// Parent channel when `channel_id` is a thread.
    pub parent_id: Option<&'a str>,
}

/// Apply the DM/guild policies and allowlists in `config` to `origin`.
pub fn check_access(config: &DiscordConfig, origin: &Origin<'_>) -> bool {
    let Some(guild_id) = origin.guild_id else {
        return match config.dm_policy {
            DmPolicy::Open => true,
            DmPolicy::Allowlist => is_allowed(origin.user_id, &config.user_allowlist),
            DmPolicy::Disabled => false,
        };
    };

    let guild_allowed = match config.guild_policy {
        GuildPolicy::Open => true,
        GuildPolicy::Allowlist => is_allowed(guild_id, &config.guild_allowlist),
        GuildPolicy::Disabled => false,
    };

    // a thread inherits its parent's allowlist entry
    let channel_allowed = is_allowed(origin.channel_id, &config.channel_allowlist)
        || origin
            .parent_id
            .is_some_and(|parent| is_allowed(parent, &config.channel_allowlist));

    guild_allowed && channel_allowed
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(&[], "anyone", true)]
    #[case(&["123", "456"], "456", true)]
    #[case(&["123"], "789", false)]
    #[case(&["12*"], "12345", true)]
    #[case(&["12*"], "21345", false)]
    #[case(&["*45"], "12345", true)]
    #[case(&["*45"], "12354", false)]
    #[case(&["1*5"], "12345", true)]
    #[case(&["*5"], "155", true)]
    #[case(&["1*b"], "1b2b", true)]
    #[case(&["1*b"], "1b2", false)]
    #[case(&["a*a"], "a", false)]
    #[case(&["1*3*5"], "12345", true)]
    #[case(&["*"], "whatever", true)]
    #[case(&["ABC"], "abc", true)]
    fn allowlist_matching(#[case] allow: &[&str], #[case] id: &str, #[case] expected: bool) {
        assert_eq!(is_allowed(id, &list(allow)), expected);
    }

    fn dm(user: &str) -> Origin<'_> {
        Origin {
            user_id: user,
            guild_id: None,
            channel_id: "900",
            parent_id: None,
        }
    }

    fn guild<'a>(guild: &'a str, channel: &'a str) -> Origin<'a> {
        Origin {
            user_id: "1",
            guild_id: Some(guild),
            channel_id: channel,
            parent_id: None,
        }
    }

    fn thread<'a>(guild_id: &'a str, thread_id: &'a str, parent: &'a str) -> Origin<'a> {
        Origin {
            parent_id: Some(parent),
            ..guild(guild_id, thread_id)
        }
    }

    #[test]
    fn open_by_default() {
        let config = DiscordConfig::default();
        assert!(check_access(&config, &dm("1")));
        assert!(check_access(&config, &guild("10", "20")));
    }

    #[test]
    fn dm_policies() {
        let mut config = DiscordConfig {
            dm_policy: DmPolicy::Allowlist,
            user_allowlist: list(&["7"]),
            ..DiscordConfig::default()
        };
        assert!(check_access(&config, &dm("7")));
        assert!(!check_access(&config, &dm("8")));

        config.dm_policy = DmPolicy::Disabled;
        assert!(!check_access(&config, &dm("7")));
        // guild traffic is unaffected
        assert!(check_access(&config, &guild("10", "20")));
    }

    #[test]
    fn guild_policies_and_channels() {
        let mut config = DiscordConfig {
            guild_policy: GuildPolicy::Allowlist,
            guild_allowlist: list(&["10"]),
            channel_allowlist: list(&["20", "3*"]),
            ..DiscordConfig::default()
        };
        assert!(check_access(&config, &guild("10", "20")));
        assert!(check_access(&config, &guild("10", "31")));
        assert!(!check_access(&config, &guild("10", "21")));
        assert!(!check_access(&config, &guild("11", "20")));

        config.guild_policy = GuildPolicy::Disabled;
        assert!(!check_access(&config, &guild("10", "20")));
    }

    #[test]
    fn threads_inherit_parent_channel_allowlist() {
        let config = DiscordConfig {
            channel_allowlist: list(&["20"]),
            ..DiscordConfig::default()
        };
        assert!(check_access(&config, &thread("10", "55", "20")));
        assert!(!check_access(&config, &thread("10", "55", "21")));
        assert!(!check_access(&config, &guild("10", "55")));
    }
}
