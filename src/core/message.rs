use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Author of a transcript message. Only these two roles exist: everything
/// the app itself wants to show (command output, warnings) stays out of
/// the persisted history and lives in the transient transcript instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }

    /// Role tag used in provider request contents. The provider happens to
    /// use the same tags the store does.
    pub fn as_api_role(self) -> &'static str {
        self.as_str()
    }

    pub fn is_user(self) -> bool {
        self == ChatRole::User
    }

    pub fn is_model(self) -> bool {
        self == ChatRole::Model
    }
}

impl TryFrom<&str> for ChatRole {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(ChatRole::User),
            "model" => Ok(ChatRole::Model),
            _ => Err(format!("invalid chat role: {value}")),
        }
    }
}

impl TryFrom<String> for ChatRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<ChatRole> for String {
    fn from(value: ChatRole) -> Self {
        value.as_str().to_string()
    }
}

/// One turn of a conversation. Immutable once created: history is
/// append-only, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: ChatRole,
    pub text: String,
    /// Data URI of an attached image, present only on user turns made in
    /// an image mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Epoch milliseconds at creation time.
    pub timestamp: i64,
}

impl Message {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            image: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn user(text: impl Into<String>, image: Option<String>) -> Self {
        Self {
            image,
            ..Self::new(ChatRole::User, text)
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_through_strings() {
        assert_eq!(ChatRole::try_from("user"), Ok(ChatRole::User));
        assert_eq!(ChatRole::try_from("model"), Ok(ChatRole::Model));
        assert_eq!(String::from(ChatRole::Model), "model");
    }

    #[test]
    fn unknown_roles_are_rejected() {
        assert!(ChatRole::try_from("assistant").is_err());
        assert!(ChatRole::try_from("").is_err());
    }

    #[test]
    fn constructors_set_roles_and_timestamps() {
        let user = Message::user("привет", Some("data:image/png;base64,AA==".into()));
        let model = Message::model("здарова");
        assert!(user.role.is_user());
        assert!(user.image.is_some());
        assert!(model.role.is_model());
        assert!(model.image.is_none());
        assert!(model.timestamp >= user.timestamp);
    }

    #[test]
    fn image_field_is_omitted_from_json_when_absent() {
        let json = serde_json::to_string(&Message::model("ок")).unwrap();
        assert!(!json.contains("image"));
    }
}
