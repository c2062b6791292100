use tracing::instrument;

use learnhub_config::SeedConfig;
use learnhub_core::{AppError, PasswordHasher, UserRole};
use learnhub_models::{
    CreateCoachRequest, NewUser, UpdateProfileRequest, User, UserChanges, UserResponse,
};
use learnhub_store::{StoreError, UserRepository};

use crate::modules::auth::service::EMAIL_ALREADY_REGISTERED;

pub const USER_NOT_FOUND: &str = "User not found";
pub const EMAIL_IN_USE: &str = "Email already in use";

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(users: UserRepository, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    pub fn get_user_by_id(&self, id: &str) -> Option<UserResponse> {
        self.users.find_by_id(id).map(UserResponse::from)
    }

    #[instrument(skip(self, dto))]
    pub fn update_profile(
        &self,
        user_id: &str,
        dto: UpdateProfileRequest,
    ) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .update(user_id, UserChanges::from(dto))
            .map_err(|err| match err {
                StoreError::Conflict => AppError::conflict(EMAIL_IN_USE),
            })?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        tracing::info!(user_id = %user.base.id, "Profile updated");
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn create_coach(&self, dto: CreateCoachRequest) -> Result<UserResponse, AppError> {
        if self.users.find_by_email(&dto.email).is_some() {
            return Err(AppError::conflict(EMAIL_ALREADY_REGISTERED));
        }

        let password = self.hasher.hash(&dto.password).await?;
        let coach = self.insert(NewUser {
            name: dto.name,
            email: dto.email,
            password,
            role: UserRole::Coach,
        })?;

        tracing::info!(user_id = %coach.base.id, "Coach created");
        Ok(UserResponse::from(coach))
    }

    /// Creates the bootstrap administrator unless an account with the seed
    /// email already exists. Returns whether a user was created.
    #[instrument(skip(self, seed), fields(email = %seed.email))]
    pub async fn ensure_admin(&self, seed: &SeedConfig) -> Result<bool, AppError> {
        if self.users.find_by_email(&seed.email).is_some() {
            tracing::debug!("Admin account already present");
            return Ok(false);
        }

        let password = self.hasher.hash(&seed.password).await?;
        match self.users.create(NewUser {
            name: seed.name.clone(),
            email: seed.email.clone(),
            password,
            role: UserRole::Admin,
        }) {
            Ok(admin) => {
                tracing::info!(user_id = %admin.base.id, "Admin account created");
                Ok(true)
            }
            Err(StoreError::Conflict) => Ok(false),
        }
    }

    fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        self.users.create(new_user).map_err(|err| match err {
            StoreError::Conflict => AppError::conflict(EMAIL_ALREADY_REGISTERED),
        })
    }
}
