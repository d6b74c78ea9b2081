use axum::extract::State;
use axum::http::header;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::router::AppState;

/// Log in with a login and password.
///
/// On success the token is returned both as an `Authorization: Bearer`
/// response header and in the body.
pub async fn authenticate(
    State(state): State<AppState>,
    Form(body): Form<AuthenticateRequestBody>,
) -> Result<([(HeaderName, String); 1], ApiSuccess<AuthenticateResponseData>), ApiError> {
    let result = state
        .user_service
        .authenticate(&body.login, &body.password)
        .await
        .map_err(|e| {
            tracing::info!(login = %body.login, error = %e, "Login rejected");
            ApiError::from(e)
        })?;

    tracing::info!(user_id = %result.user.id, "User logged in");

    Ok((
        [(header::AUTHORIZATION, format!("Bearer {}", result.access_token))],
        ApiSuccess::new(
            StatusCode::OK,
            AuthenticateResponseData {
                user: (&result.user).into(),
                token: result.access_token,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    login: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub user: UserData,
    pub token: String,
}
