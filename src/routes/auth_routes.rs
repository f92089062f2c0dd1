use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::api_dto::ApiResponse;
use crate::dto::auth_dto::{LoginRequest, RegisterRequest, UserResponse};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::session_cookie;

/// `/me` exige token; `/register` y `/login` son públicas
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route_layer(from_fn_with_state(state, auth_middleware))
        .route("/register", post(register))
        .route("/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    if !state.config.allow_registration {
        return Err(AppError::Forbidden("Registration is disabled".to_string()));
    }

    let controller = AuthController::new(state.pool.clone());
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Devuelve el token en el cuerpo y además como cookie de sesión
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.login(request, &state.jwt).await?;
    let cookie = session_cookie(&response.token, state.jwt.expiration);

    Ok(([(header::SET_COOKIE, cookie)], Json(response)).into_response())
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.me(user.user_id).await?;
    Ok(Json(response))
}
