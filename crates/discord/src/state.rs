use std::sync::OnceLock;

use serenity::all::UserId;

/// Process-wide state shared by all event handlers.
///
/// The only mutable piece is the bot's own user id, written once when the
/// gateway reports ready.
#[derive(Debug, Default)]
pub struct BotState {
    user_id: OnceLock<UserId>,
}

impl BotState {
    /// Record the bot's id. Later calls (after a reconnect) keep the first
    /// value and report whether it differed.
    pub fn set_user_id(&self, id: UserId) -> bool {
        let stored = *self.user_id.get_or_init(|| id);
        stored == id
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id.get().copied()
    }

    /// Whether `author` is the bot itself. Always false before ready.
    #[must_use]
    pub fn is_self(&self, author: UserId) -> bool {
        self.user_id() == Some(author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_once() {
        let state = BotState::default();
        assert_eq!(state.user_id(), None);
        assert!(state.set_user_id(UserId::new(5)));
        assert!(state.set_user_id(UserId::new(5)));
        assert!(!state.set_user_id(UserId::new(6)));
        assert_eq!(state.user_id(), Some(UserId::new(5)));
    }

    #[test]
    fn only_our_own_id_is_self() {
        let state = BotState::default();
        assert!(!state.is_self(UserId::new(5)));
        state.set_user_id(UserId::new(5));
        assert!(state.is_self(UserId::new(5)));
        assert!(!state.is_self(UserId::new(9)));
    }
}
