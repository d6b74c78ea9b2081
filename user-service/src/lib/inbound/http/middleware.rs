use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid bearer token on every request.
///
/// Every failure produces the same 401 response; the reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let caller = authenticated_user(&state, &req).map_err(|reason| {
        tracing::warn!(reason, "Request rejected");
        unauthorized()
    })?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

fn authenticated_user(state: &AppState, req: &Request) -> Result<AuthenticatedUser, &'static str> {
    let token = extract_token_from_header(req)?;

    let identity = state
        .authenticator
        .validate_token(token)
        .map_err(|_| "invalid token")?;

    let user_id = identity
        .subject_id
        .as_deref()
        .ok_or("token has no subject")
        .and_then(|id| UserId::from_string(id).map_err(|_| "token subject is not a user id"))?;

    Ok(AuthenticatedUser { user_id })
}

fn extract_token_from_header(req: &Request) -> Result<&str, &'static str> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or("missing Authorization header")?
        .to_str()
        .map_err(|_| "unreadable Authorization header")?;

    // The scheme name is case-insensitive
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => Ok(token),
        _ => Err("Authorization header is not a bearer token"),
    }
}

fn unauthorized() -> Response {
    ApiError::Unauthorized("Unauthorized".to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request(authorization: &str) -> Request {
        Request::builder()
            .header(header::AUTHORIZATION, authorization)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_token_from_header(&request("Bearer abc.def.ghi")),
            Ok("abc.def.ghi")
        );
        assert_eq!(
            extract_token_from_header(&request("bearer abc.def.ghi")),
            Ok("abc.def.ghi")
        );
        assert_eq!(
            extract_token_from_header(&request("BEARER abc.def.ghi")),
            Ok("abc.def.ghi")
        );
    }

    #[test]
    fn test_extract_rejects_other_schemes() {
        assert!(extract_token_from_header(&request("Token abc.def.ghi")).is_err());
        assert!(extract_token_from_header(&request("Bearerabc.def.ghi")).is_err());
        assert!(extract_token_from_header(&request("abc.def.ghi")).is_err());

        let missing = Request::builder().body(Body::empty()).unwrap();
        assert!(extract_token_from_header(&missing).is_err());
    }
}
