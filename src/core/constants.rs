//! Shared constants used across the application

/// Number of prior transcript messages forwarded to the provider as
/// conversation context. Anything older is dropped from the request.
pub const HISTORY_WINDOW: usize = 6;

/// Registration never hands out ids below this floor; the range beneath
/// it is reserved for the seeded builtin accounts.
pub const RESERVED_ID_FLOOR: u64 = 100;

/// File name of the serialized user table inside the data directory.
pub const USERS_FILE: &str = "users.json";

/// File name of the persisted session id inside the data directory.
pub const SESSION_FILE: &str = "session";

/// Reply substituted for a failed provider call. Appended to the
/// transcript as if Lucky said it; XP is not awarded for it.
pub const FALLBACK_REPLY: &str = "Упс, канал связи заискрил... Попробуй еще раз! ⚡";

/// Reply substituted when the provider answers successfully but with no
/// text at all.
pub const EMPTY_REPLY: &str = "Луки немного задумался... Можешь повторить? 😅✨";
