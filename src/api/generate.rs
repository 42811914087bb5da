use crate::api::{GenerateRequest, GenerateResponse};
use crate::utils::url::construct_api_url;

/// One-shot content generation call.
///
/// Returns the reply text, or `Ok(None)` when the provider answered
/// successfully but produced no text (the caller substitutes a fixed
/// reply). Errors carry the status and body so they can be logged before
/// the transcript gets its apologetic fallback.
pub async fn generate_content(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    model: &str,
    request: &GenerateRequest,
) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
    let url = construct_api_url(base_url, &format!("models/{model}:generateContent"));
    tracing::debug!(model, turns = request.contents.len(), "dispatching generateContent");

    let response = client
        .post(url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!("API request failed with status {status}: {error_text}").into());
    }

    let body = response.json::<GenerateResponse>().await?;
    Ok(body.text())
}
