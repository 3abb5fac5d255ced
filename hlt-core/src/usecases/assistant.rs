use super::{prelude::*, quota::QuotaBreaker};

pub const DIRECTIONS_RESTING: &str = "El servicio de rutas no está disponible temporalmente.";
pub const DIRECTIONS_FAILED: &str = "Error al conectar con el servicio de mapas.";
pub const DIRECTIONS_EMPTY: &str = "No se pudo calcular la ruta.";

pub const CHAT_RESTING: &str = "Lo siento, estoy tomando un descanso. Intenta más tarde.";
pub const CHAT_FAILED: &str = "Tuve un pequeño problema de conexión. ¿Podrías repetirlo?";
pub const CHAT_EMPTY: &str = "No tengo una respuesta para eso ahora mismo.";

fn canned_directions(text: &str) -> Directions {
    Directions {
        text: text.to_string(),
        grounding_chunks: vec![],
    }
}

/// Ask for directions from the given position to a place.
pub fn directions<A: AiGateway + ?Sized>(
    ai: &A,
    breaker: &QuotaBreaker,
    from: MapPoint,
    place: &Place,
) -> Directions {
    if breaker.is_open() {
        return canned_directions(DIRECTIONS_RESTING);
    }
    match ai.directions(from, &place.title, &place.location) {
        Ok(directions) if directions.text.trim().is_empty() => Directions {
            text: DIRECTIONS_EMPTY.to_string(),
            ..directions
        },
        Ok(directions) => directions,
        Err(err) => {
            breaker.observe(&err);
            log::warn!("Unable to get directions to {}: {err}", place.id);
            canned_directions(DIRECTIONS_FAILED)
        }
    }
}

/// Continue a conversation with the virtual guide.
pub fn chat<A: AiGateway + ?Sized>(
    ai: &A,
    breaker: &QuotaBreaker,
    history: &[ChatMessage],
    message: &str,
) -> String {
    if breaker.is_open() {
        return CHAT_RESTING.to_string();
    }
    match ai.chat(history, message) {
        Ok(reply) if reply.trim().is_empty() => CHAT_EMPTY.to_string(),
        Ok(reply) => reply,
        Err(err) => {
            breaker.observe(&err);
            log::warn!("Chat failed: {err}");
            CHAT_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockAi, *};
    use hlt_entities::builders::*;

    fn from() -> MapPoint {
        MapPoint::try_from_lat_lng_deg(37.26, -6.94).unwrap()
    }

    #[test]
    fn directions_with_grounding() {
        let ai = MockAi::default();
        let chunk = serde_json::json!({
            "maps": {
                "uri": "https://maps.google.com/?cid=1",
                "title": "Castillo de Niebla"
            }
        });
        *ai.directions.borrow_mut() = Ok(Directions {
            text: "Tome la A-49".into(),
            grounding_chunks: vec![chunk.clone()],
        });
        let breaker = QuotaBreaker::new();
        let place = Place::build().title("Castillo").location("Niebla").finish();
        let res = directions(&ai, &breaker, from(), &place);
        assert_eq!("Tome la A-49", res.text);
        assert_eq!(vec![chunk], res.grounding_chunks);
    }

    #[test]
    fn directions_fallback_texts() {
        let ai = MockAi::default();
        let breaker = QuotaBreaker::new();
        let place = Place::build().finish();

        *ai.directions.borrow_mut() = Ok(Directions::default());
        assert_eq!(DIRECTIONS_EMPTY, directions(&ai, &breaker, from(), &place).text);

        *ai.directions.borrow_mut() = Err(AiError::Unavailable);
        assert_eq!(DIRECTIONS_FAILED, directions(&ai, &breaker, from(), &place).text);
        assert!(!breaker.is_open());

        *ai.directions.borrow_mut() = Err(AiError::Quota("quota".into()));
        assert_eq!(DIRECTIONS_FAILED, directions(&ai, &breaker, from(), &place).text);
        assert!(breaker.is_open());
        assert_eq!(DIRECTIONS_RESTING, directions(&ai, &breaker, from(), &place).text);
    }

    #[test]
    fn chat_replies() {
        let ai = MockAi::default();
        let breaker = QuotaBreaker::new();
        let history = vec![ChatMessage {
            role: ChatRole::User,
            text: "Hola".into(),
        }];

        *ai.chat.borrow_mut() = Ok("¡Hola! Soy Tartessos.".into());
        assert_eq!("¡Hola! Soy Tartessos.", chat(&ai, &breaker, &history, "¿Qué ver?"));

        *ai.chat.borrow_mut() = Ok("".into());
        assert_eq!(CHAT_EMPTY, chat(&ai, &breaker, &history, "?"));

        *ai.chat.borrow_mut() = Err(AiError::Other(anyhow::anyhow!("HTTP 429")));
        assert_eq!(CHAT_FAILED, chat(&ai, &breaker, &history, "?"));
        assert!(breaker.is_open());
        assert_eq!(CHAT_RESTING, chat(&ai, &breaker, &history, "?"));
    }
}
