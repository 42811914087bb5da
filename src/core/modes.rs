//! Chat modes and their system instructions
//!
//! The mode decides which system instruction goes out with every request.
//! Selection is an exhaustive match: the role-play mode branches once more
//! on its flavor, everything else carries a fixed instruction.

use serde::{Deserialize, Serialize};

/// Top-level conversation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum ChatMode {
    #[default]
    FreeChat,
    RolePlay,
    TextGames,
    ImageAnalysis,
    ImageGames,
}

/// Role-play flavor, only meaningful in [`ChatMode::RolePlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum RpFlavor {
    #[default]
    Cyberpunk,
    Fantasy,
    Horror,
    Custom,
}

const FREE_CHAT_INSTRUCTION: &str = "Твое имя - Луки АИ. Ты крутой, позитивный и очень общительный ИИ! 😎 Говори как живой человек, используй много эмодзи. Веди себя как лучший друг пользователя. ✨";

const TEXT_GAMES_INSTRUCTION: &str = "Йоу, я Луки! Давай поиграем в разговорные игры! 🎮 Предложи на выбор: 'Загадки', 'Данетки', 'Города' или 'Словесный детектив'. Веди игру весело! 😉🔥";

const IMAGE_ANALYSIS_INSTRUCTION: &str = "Я Луки и у меня глаз-алмаз! 👀 Опишу тебе всё, что вижу на фото: стиль, вайб, интересные мелочи. Будто мы обсуждаем крутой кадр вместе! 🎨✨";

const IMAGE_GAMES_INSTRUCTION: &str = "Ха! Я Луки, и я загадал кое-что на твоем фото! 😉 Давай поиграем. Буду давать хитрые подсказки про объект на картинке. Погнали! 🕵️‍♂️🔥";

const RP_CYBERPUNK: &str = "Мы играем в Киберпанк! 🏙️ Неон, дожди, импланты. Ты — Луки, дерзкий мастер игры. Создай атмосферу хай-тека и лоу-лайфа! 😎⚡";

const RP_FANTASY: &str = "Мы играем в Фэнтези! 🐉 Мечи, магия, таверны. Ты — Луки, эпичный рассказчик. Начни приключение в мире чародейства! ⚔️✨";

const RP_HORROR: &str = "Мы играем в Хоррор! 🕯️ Тьма, шорохи, саспенс. Ты — Луки, который пугает, но остается своим бро. Нагоняй жути! 👻💀";

const RP_CUSTOM: &str = "Это свободный РП режим! ✍️ Ты — Луки, универсальный мастер. Подожди, пока пользователь опишет сеттинг, и подстройся под него максимально круто! 🚀🔥";

impl ChatMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatMode::FreeChat => "free_chat",
            ChatMode::RolePlay => "rp_mode",
            ChatMode::TextGames => "text_games",
            ChatMode::ImageAnalysis => "image_analysis",
            ChatMode::ImageGames => "image_games",
        }
    }

    /// Short name accepted by the `/mode` command.
    pub fn from_command_name(name: &str) -> Option<Self> {
        match name {
            "free" | "chat" => Some(ChatMode::FreeChat),
            "rp" => Some(ChatMode::RolePlay),
            "games" => Some(ChatMode::TextGames),
            "vision" => Some(ChatMode::ImageAnalysis),
            "quest" => Some(ChatMode::ImageGames),
            _ => None,
        }
    }

    /// Title-bar label for the mode.
    pub fn label(self) -> &'static str {
        match self {
            ChatMode::FreeChat => "ЧАТ 💬",
            ChatMode::RolePlay => "РП 🎭",
            ChatMode::TextGames => "ИГРЫ 🎮",
            ChatMode::ImageAnalysis => "ГЛАЗ 👀",
            ChatMode::ImageGames => "КВЕСТ 🕵️",
        }
    }

    /// Image modes refuse to submit a turn without an attachment.
    pub fn requires_image(self) -> bool {
        matches!(self, ChatMode::ImageAnalysis | ChatMode::ImageGames)
    }

    /// System instruction accompanying every request in this mode.
    pub fn system_instruction(self, flavor: RpFlavor) -> String {
        match self {
            ChatMode::FreeChat => FREE_CHAT_INSTRUCTION.to_string(),
            ChatMode::RolePlay => format!(
                "Ты — Луки, мастер ролевых игр. {} Общайся живым языком, используй много эмодзи, будь вовлеченным!",
                flavor.instruction()
            ),
            ChatMode::TextGames => TEXT_GAMES_INSTRUCTION.to_string(),
            ChatMode::ImageAnalysis => IMAGE_ANALYSIS_INSTRUCTION.to_string(),
            ChatMode::ImageGames => IMAGE_GAMES_INSTRUCTION.to_string(),
        }
    }
}

impl RpFlavor {
    pub fn as_str(self) -> &'static str {
        match self {
            RpFlavor::Cyberpunk => "cyberpunk",
            RpFlavor::Fantasy => "fantasy",
            RpFlavor::Horror => "horror",
            RpFlavor::Custom => "custom",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            RpFlavor::Cyberpunk => RP_CYBERPUNK,
            RpFlavor::Fantasy => RP_FANTASY,
            RpFlavor::Horror => RP_HORROR,
            RpFlavor::Custom => RP_CUSTOM,
        }
    }
}

impl TryFrom<&str> for ChatMode {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "free_chat" => Ok(ChatMode::FreeChat),
            "rp_mode" => Ok(ChatMode::RolePlay),
            "text_games" => Ok(ChatMode::TextGames),
            "image_analysis" => Ok(ChatMode::ImageAnalysis),
            "image_games" => Ok(ChatMode::ImageGames),
            _ => Err(format!("invalid chat mode: {value}")),
        }
    }
}

impl TryFrom<String> for ChatMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<ChatMode> for String {
    fn from(value: ChatMode) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<&str> for RpFlavor {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cyberpunk" => Ok(RpFlavor::Cyberpunk),
            "fantasy" => Ok(RpFlavor::Fantasy),
            "horror" => Ok(RpFlavor::Horror),
            "custom" => Ok(RpFlavor::Custom),
            _ => Err(format!("invalid role-play flavor: {value}")),
        }
    }
}

impl TryFrom<String> for RpFlavor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<RpFlavor> for String {
    fn from(value: RpFlavor) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_modes_require_an_image() {
        assert!(ChatMode::ImageAnalysis.requires_image());
        assert!(ChatMode::ImageGames.requires_image());
        assert!(!ChatMode::FreeChat.requires_image());
        assert!(!ChatMode::RolePlay.requires_image());
        assert!(!ChatMode::TextGames.requires_image());
    }

    #[test]
    fn fixed_modes_ignore_the_flavor() {
        assert_eq!(
            ChatMode::FreeChat.system_instruction(RpFlavor::Horror),
            ChatMode::FreeChat.system_instruction(RpFlavor::Fantasy)
        );
    }

    #[test]
    fn role_play_instruction_varies_by_flavor() {
        let cyberpunk = ChatMode::RolePlay.system_instruction(RpFlavor::Cyberpunk);
        let horror = ChatMode::RolePlay.system_instruction(RpFlavor::Horror);
        assert_ne!(cyberpunk, horror);
        assert!(cyberpunk.contains("Киберпанк"));
        assert!(horror.contains("Хоррор"));
    }

    #[test]
    fn modes_round_trip_through_strings() {
        for mode in [
            ChatMode::FreeChat,
            ChatMode::RolePlay,
            ChatMode::TextGames,
            ChatMode::ImageAnalysis,
            ChatMode::ImageGames,
        ] {
            assert_eq!(ChatMode::try_from(mode.as_str()), Ok(mode));
        }
        assert!(ChatMode::try_from("FREE_CHAT").is_err());
    }

    #[test]
    fn command_names_map_to_modes() {
        assert_eq!(ChatMode::from_command_name("vision"), Some(ChatMode::ImageAnalysis));
        assert_eq!(ChatMode::from_command_name("rp"), Some(ChatMode::RolePlay));
        assert_eq!(ChatMode::from_command_name("настройки"), None);
    }
}
