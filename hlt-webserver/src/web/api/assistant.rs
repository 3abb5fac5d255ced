use super::*;

#[post("/assistant/chat", format = "application/json", data = "<req>")]
pub async fn post_chat(ai: Ai, req: JsonResult<'_, json::ChatRequest>) -> Result<json::ChatReply> {
    let json::ChatRequest { history, message } = req?.into_inner();
    if message.trim().is_empty() {
        return Err(ApiError::bad_request(anyhow::anyhow!("Empty message")));
    }
    let history: Vec<_> = history.into_iter().map(from_json::chat_message).collect();
    let reply =
        blocking(move || Ok(usecases::chat(&*ai.gateway, &ai.breaker, &history, &message))).await?;
    Ok(Json(json::ChatReply { reply }))
}
