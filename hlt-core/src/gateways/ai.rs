use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("The quota of the AI service is exhausted: {0}")]
    Quota(String),
    #[error("The AI service is not available")]
    Unavailable,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AiError {
    pub fn is_quota(&self) -> bool {
        match self {
            Self::Quota(_) => true,
            Self::Unavailable => false,
            Self::Other(err) => is_quota_error(&format!("{err:#}")),
        }
    }
}

/// Detect rate limit errors (HTTP 429) by their message.
pub fn is_quota_error(message: &str) -> bool {
    let msg = message.to_lowercase();
    msg.contains("429") || msg.contains("quota") || msg.contains("resource_exhausted")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Lightweight summary of a place that is sent
/// to the AI service instead of the full record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDigest {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub description: String,
    pub location: String,
}

impl From<&Place> for PlaceDigest {
    fn from(p: &Place) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            tags: p.tags.clone(),
            description: p.short_description.clone(),
            location: p.location.clone(),
        }
    }
}

/// A source that has been used to ground a generated answer.
///
/// Chunks are passed on to clients exactly as they
/// have been returned by the AI service.
pub type GroundingChunk = serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directions {
    pub text: String,
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// A generative AI backend.
///
/// Empty texts are returned as they are, the callers
/// decide how to present a missing answer.
pub trait AiGateway {
    fn place_details(&self, place: &Place) -> Result<String, AiError>;
    /// Returns a data URI or URL of the generated image
    /// or `None` if no image could be created.
    fn generate_image(
        &self,
        title: &str,
        location: &str,
        description: &str,
    ) -> Result<Option<String>, AiError>;
    /// Returns the ids of the matching places ordered by relevance.
    fn rank_places(&self, query: &str, places: &[PlaceDigest]) -> Result<Vec<String>, AiError>;
    fn directions(&self, from: MapPoint, title: &str, location: &str)
        -> Result<Directions, AiError>;
    fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String, AiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_quota_errors() {
        assert!(is_quota_error("HTTP status 429 Too Many Requests"));
        assert!(is_quota_error("You exceeded your current Quota"));
        assert!(is_quota_error("RESOURCE_EXHAUSTED"));
        assert!(!is_quota_error("HTTP status 500"));
    }

    #[test]
    fn classify_ai_errors() {
        assert!(AiError::Quota("x".into()).is_quota());
        assert!(!AiError::Unavailable.is_quota());
        assert!(AiError::Other(anyhow::anyhow!("status: RESOURCE_EXHAUSTED")).is_quota());
        assert!(!AiError::Other(anyhow::anyhow!("timeout")).is_quota());
    }
}
