use hlt_core::{entities::*, gateways::ai::*};

/// Used if no AI service has been configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

impl AiGateway for Offline {
    fn place_details(&self, _: &Place) -> Result<String, AiError> {
        Err(AiError::Unavailable)
    }
    fn generate_image(&self, _: &str, _: &str, _: &str) -> Result<Option<String>, AiError> {
        Err(AiError::Unavailable)
    }
    fn rank_places(&self, _: &str, _: &[PlaceDigest]) -> Result<Vec<String>, AiError> {
        Err(AiError::Unavailable)
    }
    fn directions(&self, _: MapPoint, _: &str, _: &str) -> Result<Directions, AiError> {
        Err(AiError::Unavailable)
    }
    fn chat(&self, _: &[ChatMessage], _: &str) -> Result<String, AiError> {
        Err(AiError::Unavailable)
    }
}
