//! Request construction
//!
//! Turns the current mode, the new message, an optional image attachment
//! and the trailing slice of prior history into one provider request.

use crate::api::{Content, ContentPart, GenerateRequest, GenerationConfig, SystemInstruction};
use crate::core::constants::HISTORY_WINDOW;
use crate::core::message::Message;
use crate::core::modes::{ChatMode, RpFlavor};
use crate::utils::image::parse_data_uri;

/// Build the outbound request for one user turn.
///
/// `history` is the transcript *before* the new message: its last
/// [`HISTORY_WINDOW`] entries become context turns, then the new text
/// (plus the image payload, when one is attached and parses as a data
/// URI) forms the final user turn.
pub fn build_request(
    mode: ChatMode,
    flavor: RpFlavor,
    text: &str,
    image: Option<&str>,
    history: &[Message],
    temperature: f32,
) -> GenerateRequest {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let mut contents: Vec<Content> = history[start..]
        .iter()
        .map(|msg| Content {
            role: msg.role.as_api_role().to_string(),
            parts: vec![ContentPart::text(msg.text.clone())],
        })
        .collect();

    let mut parts = vec![ContentPart::text(text)];
    if let Some(uri) = image {
        if let Some(payload) = parse_data_uri(uri) {
            parts.push(ContentPart::inline_data(payload.mime_type, payload.data));
        }
    }
    contents.push(Content {
        role: "user".to_string(),
        parts,
    });

    tracing::debug!(
        mode = mode.as_str(),
        turns = contents.len(),
        with_image = image.is_some(),
        "built provider request"
    );

    GenerateRequest {
        contents,
        system_instruction: SystemInstruction {
            parts: vec![ContentPart::text(mode.system_instruction(flavor))],
        },
        generation_config: GenerationConfig { temperature },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::image::encode_data_uri;

    fn long_history(len: usize) -> Vec<Message> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("вопрос {i}"), None)
                } else {
                    Message::model(format!("ответ {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn context_never_exceeds_the_window() {
        let history = long_history(40);
        let request = build_request(
            ChatMode::FreeChat,
            RpFlavor::Cyberpunk,
            "новый вопрос",
            None,
            &history,
            0.9,
        );
        // 6 context turns plus the new one.
        assert_eq!(request.contents.len(), HISTORY_WINDOW + 1);
        assert_eq!(
            request.contents[0].parts[0].text.as_deref(),
            Some("вопрос 34")
        );
        assert_eq!(
            request.contents.last().unwrap().parts[0].text.as_deref(),
            Some("новый вопрос")
        );
    }

    #[test]
    fn short_history_is_sent_whole() {
        let history = long_history(3);
        let request = build_request(
            ChatMode::FreeChat,
            RpFlavor::Cyberpunk,
            "ещё",
            None,
            &history,
            0.9,
        );
        assert_eq!(request.contents.len(), 4);
    }

    #[test]
    fn context_turns_keep_their_roles_in_order() {
        let history = long_history(4);
        let request = build_request(
            ChatMode::TextGames,
            RpFlavor::Cyberpunk,
            "города!",
            None,
            &history,
            0.9,
        );
        let roles: Vec<&str> = request.contents.iter().map(|c| c.role.as_str()).collect();
        assert_eq!(roles, ["user", "model", "user", "model", "user"]);
    }

    #[test]
    fn attached_image_becomes_an_inline_data_part() {
        let uri = encode_data_uri("image/jpeg", b"jpeg bytes");
        let request = build_request(
            ChatMode::ImageAnalysis,
            RpFlavor::Cyberpunk,
            "что тут?",
            Some(&uri),
            &[],
            0.9,
        );
        let final_turn = request.contents.last().unwrap();
        assert_eq!(final_turn.parts.len(), 2);
        let inline = final_turn.parts[1].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "image/jpeg");
    }

    #[test]
    fn unparseable_image_is_silently_dropped() {
        let request = build_request(
            ChatMode::ImageAnalysis,
            RpFlavor::Cyberpunk,
            "что тут?",
            Some("not-a-data-uri"),
            &[],
            0.9,
        );
        assert_eq!(request.contents.last().unwrap().parts.len(), 1);
    }

    #[test]
    fn system_instruction_tracks_mode_and_flavor() {
        let rp = build_request(
            ChatMode::RolePlay,
            RpFlavor::Fantasy,
            "начнем",
            None,
            &[],
            0.9,
        );
        let instruction = rp.system_instruction.parts[0].text.as_deref().unwrap();
        assert!(instruction.contains("Фэнтези"));

        let games = build_request(
            ChatMode::TextGames,
            RpFlavor::Fantasy,
            "начнем",
            None,
            &[],
            0.9,
        );
        assert!(games.system_instruction.parts[0]
            .text
            .as_deref()
            .unwrap()
            .contains("разговорные игры"));
    }
}
