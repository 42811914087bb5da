//! Data-URI helpers for image attachments
//!
//! Attached images travel through the app as `data:` URIs, the same shape
//! the provider's `inlineData` parts expect once the mime type and payload
//! are split back apart.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::path::Path;

/// An image payload extracted from a data URI: the mime type and the
/// still-encoded base64 data, ready to be sent as an `inlineData` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

/// Split a `data:<mime>;base64,<payload>` URI into mime type and payload.
///
/// Returns `None` when the URI is not a data URI, carries no payload, or
/// the payload is not valid base64.
pub fn parse_data_uri(uri: &str) -> Option<ImagePayload> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime_type = header.split(';').next().unwrap_or_default().trim();
    if mime_type.is_empty() || payload.is_empty() {
        return None;
    }
    BASE64.decode(payload).ok()?;
    Some(ImagePayload {
        mime_type: mime_type.to_string(),
        data: payload.to_string(),
    })
}

/// Encode raw image bytes into a data URI.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

/// Guess an image mime type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_mime_and_payload() {
        let uri = encode_data_uri("image/png", b"not really a png");
        let payload = parse_data_uri(&uri).expect("valid data URI");
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(BASE64.decode(&payload.data).unwrap(), b"not really a png");
    }

    #[test]
    fn parse_rejects_non_data_uris() {
        assert_eq!(parse_data_uri("https://example.com/cat.png"), None);
        assert_eq!(parse_data_uri("data:image/png;base64"), None);
        assert_eq!(parse_data_uri("data:image/png;base64,"), None);
    }

    #[test]
    fn parse_rejects_invalid_base64_payloads() {
        assert_eq!(parse_data_uri("data:image/png;base64,@@@"), None);
    }

    #[test]
    fn mime_guessing_covers_common_image_extensions() {
        assert_eq!(mime_for_path(Path::new("photo.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("photo")), "application/octet-stream");
    }
}
