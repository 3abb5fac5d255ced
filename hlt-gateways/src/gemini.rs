//! Client of the Gemini `generateContent` REST API.

use crate::prompts;
use anyhow::anyhow;
use hlt_core::{entities::*, gateways::ai::*};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
// Grounding with Google Maps requires a 2.5 model.
pub const DEFAULT_MAPS_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub maps_model: String,
    pub timeout: Duration,
    /// Images are only generated if explicitly enabled.
    pub image_generation: bool,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            maps_model: DEFAULT_MAPS_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            image_generation: false,
        }
    }
}

#[derive(Debug)]
pub struct Gemini {
    config: GeminiConfig,
    client: reqwest::blocking::Client,
}

impl Gemini {
    pub fn try_new(config: GeminiConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let GeminiConfig {
            api_base_url,
            api_key,
            ..
        } = &self.config;
        let url = format!("{api_base_url}/models/{model}:generateContent");
        log::debug!("Sending request to {model}");
        send_raw(&self.client, &url, api_key, request)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(Into::into),
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content::text(Some("user"), prompt)],
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<Value>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    fn text(&self) -> String {
        self.parts().filter_map(|p| p.text.as_deref()).collect()
    }

    fn inline_image(&self) -> Option<String> {
        self.parts()
            .find_map(|p| p.inline_data.as_ref())
            .map(|InlineData { mime_type, data }| format!("data:{mime_type};base64,{data}"))
    }

    fn grounding_chunks(&self) -> Vec<GroundingChunk> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize, thiserror::Error)]
#[error("{status} {message}")]
struct ApiError {
    #[serde(default)]
    status: String,
    message: String,
}

fn error_from_response(status: u16, body: &str) -> AiError {
    let err = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) => anyhow::Error::from(error),
        Err(_) => anyhow!("{}", body.trim()),
    };
    let message = format!("HTTP {status}: {err}");
    if status == 429 || is_quota_error(&message) {
        AiError::Quota(message)
    } else {
        AiError::Other(anyhow!(message))
    }
}

fn parse_ranking(text: &str) -> Result<Vec<String>, AiError> {
    if text.trim().is_empty() {
        return Ok(vec![]);
    }
    let ids = match serde_json::from_str::<Value>(text).map_err(anyhow::Error::from)? {
        Value::Array(ids) => ids
            .into_iter()
            .filter_map(|id| match id {
                Value::String(id) => Some(id),
                _ => None,
            })
            .collect(),
        _ => vec![],
    };
    Ok(ids)
}

#[cfg(not(test))]
fn send_raw(
    client: &reqwest::blocking::Client,
    url: &str,
    api_key: &str,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse, AiError> {
    let response = client
        .post(url)
        .header("x-goog-api-key", api_key)
        .json(request)
        .send()
        .map_err(anyhow::Error::from)?;
    let status = response.status();
    if status.is_success() {
        Ok(response.json().map_err(anyhow::Error::from)?)
    } else {
        let body = response.text().unwrap_or_default();
        Err(error_from_response(status.as_u16(), &body))
    }
}

/// Don't actually send requests while running the tests.
#[cfg(test)]
fn send_raw(
    _: &reqwest::blocking::Client,
    url: &str,
    _: &str,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse, AiError> {
    log::debug!("Would send request to {url}: {request:?}");
    Err(AiError::Unavailable)
}

impl AiGateway for Gemini {
    fn place_details(&self, place: &Place) -> Result<String, AiError> {
        let prompt = prompts::place_details(place).map_err(anyhow::Error::from)?;
        let response =
            self.generate_content(&self.config.text_model, &GenerateContentRequest::prompt(prompt))?;
        Ok(response.text())
    }

    fn generate_image(
        &self,
        title: &str,
        location: &str,
        description: &str,
    ) -> Result<Option<String>, AiError> {
        if !self.config.image_generation {
            log::debug!("Image generation is disabled");
            return Ok(None);
        }
        let prompt =
            prompts::place_image(title, location, description).map_err(anyhow::Error::from)?;
        let response = self.generate_content(
            &self.config.image_model,
            &GenerateContentRequest::prompt(prompt),
        )?;
        Ok(response.inline_image())
    }

    fn rank_places(&self, query: &str, places: &[PlaceDigest]) -> Result<Vec<String>, AiError> {
        let prompt = prompts::search(query, places)?;
        let request = GenerateContentRequest {
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json"),
            }),
            ..GenerateContentRequest::prompt(prompt)
        };
        let response = self.generate_content(&self.config.text_model, &request)?;
        parse_ranking(&response.text())
    }

    fn directions(
        &self,
        from: MapPoint,
        title: &str,
        location: &str,
    ) -> Result<Directions, AiError> {
        let prompt = prompts::directions(from, title, location).map_err(anyhow::Error::from)?;
        let (latitude, longitude) = from.to_lat_lng_deg();
        let request = GenerateContentRequest {
            tools: Some(json!([{ "googleMaps": {} }, { "googleSearch": {} }])),
            tool_config: Some(json!({
                "retrievalConfig": {
                    "latLng": { "latitude": latitude, "longitude": longitude }
                }
            })),
            ..GenerateContentRequest::prompt(prompt)
        };
        let response = self.generate_content(&self.config.maps_model, &request)?;
        Ok(Directions {
            text: response.text(),
            grounding_chunks: response.grounding_chunks(),
        })
    }

    fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String, AiError> {
        let persona = prompts::assistant().map_err(anyhow::Error::from)?;
        let mut contents: Vec<_> = history
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                };
                Content::text(Some(role), msg.text.as_str())
            })
            .collect();
        contents.push(Content::text(Some("user"), message));
        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::text(None, persona)),
            ..Default::default()
        };
        let response = self.generate_content(&self.config.text_model, &request)?;
        Ok(response.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_requests() {
        let request = GenerateContentRequest {
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json"),
            }),
            system_instruction: Some(Content::text(None, "persona")),
            ..GenerateContentRequest::prompt("hola".into())
        };
        assert_eq!(
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hola" }] }],
                "systemInstruction": { "parts": [{ "text": "persona" }] },
                "generationConfig": { "responseMimeType": "application/json" }
            }),
            serde_json::to_value(&request).unwrap()
        );
    }

    #[test]
    fn concatenate_text_parts_of_the_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "Hola, " }, { "text": "Huelva" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!("Hola, Huelva", response.text());
        assert_eq!("", GenerateContentResponse::default().text());
    }

    #[test]
    fn extract_inline_images() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Aquí tienes" },
                { "inlineData": { "mimeType": "image/png", "data": "iVBORw0" } }
            ] } }]
        }))
        .unwrap();
        assert_eq!(
            Some("data:image/png;base64,iVBORw0".to_string()),
            response.inline_image()
        );
    }

    #[test]
    fn extract_grounding_chunks() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Aprox. 45 min" }] },
                "groundingMetadata": { "groundingChunks": [
                    { "maps": { "uri": "https://maps.google.com/?cid=1", "title": "Niebla" } },
                    { "web": { "uri": "https://example.org" } },
                    { "retrievedContext": {} }
                ] }
            }]
        }))
        .unwrap();
        // Unknown kinds of chunks are passed on unchanged
        assert_eq!(
            vec![
                json!({ "maps": { "uri": "https://maps.google.com/?cid=1", "title": "Niebla" } }),
                json!({ "web": { "uri": "https://example.org" } }),
                json!({ "retrievedContext": {} }),
            ],
            response.grounding_chunks()
        );
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Sin fuentes" }] } }]
        }))
        .unwrap();
        assert!(response.grounding_chunks().is_empty());
    }

    #[test]
    fn parse_ranked_ids() {
        assert_eq!(vec!["s-1", "p-3"], parse_ranking(r#"["s-1", "p-3"]"#).unwrap());
        assert_eq!(vec!["s-1"], parse_ranking(r#"["s-1", 3, null]"#).unwrap());
        assert!(parse_ranking(r#"{"ids": ["s-1"]}"#).unwrap().is_empty());
        assert!(parse_ranking("  ").unwrap().is_empty());
        assert!(parse_ranking("not json").is_err());
    }

    #[test]
    fn map_api_errors() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(error_from_response(429, body), AiError::Quota(_)));
        let body = r#"{"error":{"code":400,"message":"You exceeded your current quota","status":"FAILED_PRECONDITION"}}"#;
        assert!(matches!(error_from_response(400, body), AiError::Quota(_)));
        let err = error_from_response(500, "Internal error");
        assert!(matches!(err, AiError::Other(_)));
        assert!(!err.is_quota());
    }

    #[test]
    fn image_generation_is_disabled_by_default() {
        let gemini = Gemini::try_new(GeminiConfig::new("key".into())).unwrap();
        assert_eq!(None, gemini.generate_image("a", "b", "c").unwrap());
    }

    #[test]
    fn requests_are_not_sent_during_tests() {
        let gemini = Gemini::try_new(GeminiConfig::new("key".into())).unwrap();
        assert!(matches!(
            gemini.chat(&[], "Hola"),
            Err(AiError::Unavailable)
        ));
    }
}
