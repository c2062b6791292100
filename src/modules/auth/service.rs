use tracing::instrument;

use learnhub_auth::create_access_token;
use learnhub_config::JwtConfig;
use learnhub_core::{AppError, PasswordHasher, UserRole};
use learnhub_models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserResponse};
use learnhub_store::{StoreError, UserRepository};

pub const EMAIL_ALREADY_REGISTERED: &str = "User with this email already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    hasher: PasswordHasher,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(users: UserRepository, hasher: PasswordHasher, jwt_config: JwtConfig) -> Self {
        Self {
            users,
            hasher,
            jwt_config,
        }
    }

    /// Creates a STUDENT account and signs the user in.
    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn register(&self, dto: RegisterRequest) -> Result<AuthResponse, AppError> {
        // Cheap early exit; the insert below re-checks under the write lock.
        if self.users.find_by_email(&dto.email).is_some() {
            return Err(AppError::conflict(EMAIL_ALREADY_REGISTERED));
        }

        let password = self.hasher.hash(&dto.password).await?;

        let user = self
            .users
            .create(NewUser {
                name: dto.name,
                email: dto.email,
                password,
                role: UserRole::Student,
            })
            .map_err(|err| match err {
                StoreError::Conflict => AppError::conflict(EMAIL_ALREADY_REGISTERED),
            })?;

        tracing::info!(user_id = %user.base.id, "User registered");
        self.issue(user)
    }

    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn login(&self, dto: LoginRequest) -> Result<AuthResponse, AppError> {
        let Some(user) = self.users.find_by_email(&dto.email) else {
            tracing::warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify(&dto.password, &user.password).await? {
            tracing::warn!(user_id = %user.base.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        tracing::info!(user_id = %user.base.id, "User logged in");
        self.issue(user)
    }

    fn issue(&self, user: User) -> Result<AuthResponse, AppError> {
        let token = create_access_token(&user.base.id, &user.email, user.role, &self.jwt_config)?;
        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
        })
    }
}
