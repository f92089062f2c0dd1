//! Servicio de autenticación
//!
//! Registro y login de usuarios contra la tabla `users`. Las contraseñas se
//! guardan con bcrypt y el login emite un JWT.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthService {
    repository: UserRepository,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let username = request.username.trim();

        if self.repository.username_exists(username).await? {
            return Err(conflict_error("User", "username", username));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self.repository.create(username, &password_hash).await?;
        info!("👤 User registered: {}", user.username);

        Ok(user)
    }

    /// Devuelve el usuario y su token si las credenciales son correctas
    pub async fn login(&self, request: LoginRequest, jwt: &JwtConfig) -> Result<(User, String), AppError> {
        let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

        let Some(user) = self.repository.find_by_username(request.username.trim()).await? else {
            warn!("🔐 Login attempt for unknown user {}", request.username);
            return Err(invalid());
        };

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            warn!("🔐 Wrong password for user {}", user.username);
            return Err(invalid());
        }

        let token = generate_token(user.id, &user.username, jwt)?;
        info!("🔓 User logged in: {}", user.username);

        Ok((user, token))
    }

    pub async fn current_user(&self, user_id: uuid::Uuid) -> Result<User, AppError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }
}
