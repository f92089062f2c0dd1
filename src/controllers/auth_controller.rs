use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_dto::ApiResponse;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::services::auth_service::AuthService;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

pub struct AuthController {
    service: AuthService,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: AuthService::new(pool),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;
        let user = self.service.register(request).await?;
        Ok(ApiResponse::success_with_message(user.into(), "User registered"))
    }

    pub async fn login(&self, request: LoginRequest, jwt: &JwtConfig) -> Result<LoginResponse, AppError> {
        request.validate()?;
        let (_, token) = self.service.login(request, jwt).await?;
        Ok(LoginResponse::bearer(token, jwt.expiration))
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self.service.current_user(user_id).await?;
        Ok(user.into())
    }
}
