use super::{admin::set_text_override, browse::get_place, prelude::*, quota::QuotaBreaker};

pub const DETAILS_RESTING: &str = "El asistente virtual está descansando por unos momentos. Por favor, disfruta de la información disponible.";
pub const DETAILS_EMPTY: &str = "No se pudo generar la descripción en este momento.";
pub const DETAILS_UNAVAILABLE: &str = "Lo sentimos, el asistente virtual no está disponible en este momento. ¡Pero te aseguramos que el lugar merece la pena!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Override,
    Description,
    Generated,
    /// A canned message instead of a real description.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceText {
    pub text: String,
    pub source: TextSource,
}

impl PlaceText {
    fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            source: TextSource::Fallback,
        }
    }
}

/// Get the long description of a place.
///
/// Generated texts are only stored as overrides in admin mode.
/// No connection is held while waiting for the AI service.
pub fn place_details<C, A>(
    db: &C,
    ai: &A,
    breaker: &QuotaBreaker,
    place_id: &str,
    admin: bool,
) -> Result<PlaceText>
where
    C: DbConnections,
    A: AiGateway + ?Sized,
{
    let place = {
        let repo = db.shared();
        if let Some(text) = repo.get_text_override(place_id)? {
            return Ok(PlaceText {
                text,
                source: TextSource::Override,
            });
        }
        get_place(&repo, place_id)?
    };
    if let Some(text) = place.full_description.as_ref().filter(|d| !d.trim().is_empty()) {
        return Ok(PlaceText {
            text: text.clone(),
            source: TextSource::Description,
        });
    }
    if breaker.is_open() {
        return Ok(PlaceText::fallback(DETAILS_RESTING));
    }
    match ai.place_details(&place) {
        Ok(text) if !text.trim().is_empty() => {
            if admin {
                let repo = db.exclusive();
                // An override that has been written in the meantime wins.
                if repo.get_text_override(place_id)?.is_none() {
                    set_text_override(&repo, place_id, &text)?;
                }
            }
            Ok(PlaceText {
                text,
                source: TextSource::Generated,
            })
        }
        Ok(_) => Ok(PlaceText::fallback(DETAILS_EMPTY)),
        Err(err) => {
            breaker.observe(&err);
            log::warn!("Unable to generate details of place {place_id}: {err}");
            if err.is_quota() {
                Ok(PlaceText::fallback(DETAILS_RESTING))
            } else {
                Ok(PlaceText::fallback(DETAILS_UNAVAILABLE))
            }
        }
    }
}
