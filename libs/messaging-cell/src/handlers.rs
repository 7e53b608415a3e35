use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::SendMessageRequest;
use crate::services::MessageService;

fn numeric_user_id(user: &User) -> Result<i64, AppError> {
    user.id
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("Invalid user id in token".to_string()))
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let sender_id = numeric_user_id(&user)?;

    let service = MessageService::new(&state);

    let message = service
        .send(sender_id, request.recipient_id, &request.body, token)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(json!(message)))
}

#[axum::debug_handler]
pub async fn get_conversation(
    State(state): State<Arc<AppConfig>>,
    Path(peer_id): Path<i64>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let service = MessageService::new(&state);

    let messages = service
        .conversation(peer_id, token)
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "messages": messages,
        "total": messages.len()
    })))
}
