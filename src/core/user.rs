use serde::{Deserialize, Serialize};

use crate::core::message::Message;
use crate::core::modes::{ChatMode, RpFlavor};

/// Display colors chosen by the user. Persisted for compatibility with
/// older tables; the terminal UI does not render them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTheme {
    pub bg: String,
    pub accent: String,
}

/// A stored account. Created at registration, mutated on every completed
/// exchange, never deleted.
///
/// The password is stored and compared in plaintext. That is the
/// contract: this is a local single-machine toy, and the seeded accounts
/// must keep logging in with their original passwords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub history: Vec<Message>,
    #[serde(default)]
    pub mode: ChatMode,
    #[serde(default)]
    pub rp_flavor: RpFlavor,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub pending_requests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<UserTheme>,
    #[serde(default)]
    pub is_guest: bool,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            password: password.into(),
            xp: 0,
            history: Vec::new(),
            mode: ChatMode::default(),
            rp_flavor: RpFlavor::default(),
            friends: Vec::new(),
            pending_requests: Vec::new(),
            theme: None,
            is_guest: false,
        }
    }

    /// Throwaway account: usable for a session, never written to disk.
    pub fn guest() -> Self {
        Self {
            is_guest: true,
            ..Self::new("guest", "гость", "")
        }
    }

    pub fn rank(&self) -> &'static str {
        rank_for_xp(self.xp)
    }
}

/// Display rank for an XP tally. Thresholds are part of the product lore
/// and are not meant to look principled.
pub fn rank_for_xp(xp: u64) -> &'static str {
    if xp >= 10000 {
        "БОГ РАЗРАБОТКИ 👑"
    } else if xp >= 1937 {
        "Мастер ГКО 🔥"
    } else if xp >= 1589 {
        "Мишаня (Топ) ✨"
    } else if xp >= 700 {
        "Орунчик 🗣️"
    } else if xp >= 100 {
        "Про-игрок 🎮"
    } else {
        "Новичок 🌱"
    }
}
