//! Middleware de autenticación JWT
//!
//! Acepta el token en `Authorization: Bearer <jwt>` o en la cookie
//! `session`. Sólo verifica la firma y la expiración; no consulta la base
//! de datos.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_cookie, extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Token de la request: primero el header, después la cookie
fn request_token(headers: &HeaderMap) -> Result<&str, AppError> {
    if let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        return extract_token_from_header(auth_header);
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(extract_token_from_cookie)
        .ok_or_else(|| AppError::Unauthorized("Authentication credentials were not provided".to_string()))
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request_token(request.headers())?;
    let claims = verify_token(token, &state.jwt)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

    let authenticated_user = AuthenticatedUser {
        user_id,
        username: claims.username,
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(request_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_token_from_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=abc.def.ghi"));
        assert_eq!(request_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_credentials() {
        let headers = HeaderMap::new();
        assert!(matches!(request_token(&headers), Err(AppError::Unauthorized(_))));
    }
}
