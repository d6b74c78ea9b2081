use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: Option<String>,
}

pub async fn update_password(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    let password = req
        .password
        .ok_or_else(|| ApiError::BadRequest("Missing password".to_string()))?;

    state
        .user_service
        .update_password(&caller.user_id, &password)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
