use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize, Clone)]
pub struct ContentPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        ContentPart {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

#[derive(Serialize, Clone)]
pub struct Content {
    pub role: String,
    pub parts: Vec<ContentPart>,
}

#[derive(Serialize, Clone)]
pub struct SystemInstruction {
    pub parts: Vec<ContentPart>,
}

#[derive(Serialize, Clone)]
pub struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Serialize, Clone)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    pub system_instruction: SystemInstruction,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
pub struct ResponseCandidate {
    pub content: Option<ResponseContent>,
}

#[derive(Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, or `None` when the
    /// response carried no text at all.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

pub mod generate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_provider_field_names() {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    ContentPart::text("что на фото?"),
                    ContentPart::inline_data("image/png", "AA=="),
                ],
            }],
            system_instruction: SystemInstruction {
                parts: vec![ContentPart::text("будь краток")],
            },
            generation_config: GenerationConfig { temperature: 0.9 },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
        assert!(json["contents"][0]["parts"][0].get("inlineData").is_none());
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "будь краток");
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.9).abs() < 1e-6);
    }

    #[test]
    fn response_text_joins_parts_of_the_first_candidate() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Йоу"},{"text":", бро!"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Йоу, бро!"));
    }

    #[test]
    fn empty_responses_yield_no_text() {
        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.text().is_none());

        let blank: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert!(blank.text().is_none());
    }
}
