use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::UserRecord;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register_user(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON).
///
/// Every attribute is optional here so that missing values are reported by
/// the field rules alongside every other failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    id: Option<String>,
    login: Option<String>,
    email: Option<String>,
    name: Option<String>,
    password: Option<String>,
}

impl From<CreateUserRequest> for UserRecord {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            id: request.id,
            login: request.login,
            email: request.email,
            name: request.name,
            password: request.password,
        }
    }
}
