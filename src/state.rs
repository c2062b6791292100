use std::sync::Arc;

use learnhub_config::{AppConfig, AppEnv, CorsConfig, JwtConfig, UploadConfig};
use learnhub_core::PasswordHasher;
use learnhub_core::file_storage::{FileStorage, LocalFileStorage};
use learnhub_store::{CourseRepository, UserRepository};

use crate::modules::auth::service::AuthService;
use crate::modules::courses::service::CourseService;
use crate::modules::users::service::UserService;

/// Everything handlers and middleware need, built once at startup.
///
/// Repositories are cheap handles onto shared collections, so the services
/// and the authentication layer all see the same data.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub course_service: CourseService,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub upload_config: UploadConfig,
    pub app_env: AppEnv,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let storage = LocalFileStorage::new(
            config.uploads.dir.clone(),
            config.uploads.public_prefix.clone(),
            config.uploads.max_image_size,
        );
        Self::with_storage(config, Arc::new(storage))
    }

    /// Same as [`AppState::new`] with a caller-supplied storage backend.
    pub fn with_storage(config: &AppConfig, storage: Arc<dyn FileStorage>) -> Self {
        let users = UserRepository::new();
        let courses = CourseRepository::new();
        let hasher = PasswordHasher::new(config.password.salt_rounds);

        Self {
            auth_service: AuthService::new(users.clone(), hasher, config.jwt.clone()),
            user_service: UserService::new(users.clone(), hasher),
            course_service: CourseService::new(courses, storage),
            users,
            jwt_config: config.jwt.clone(),
            cors_config: config.cors.clone(),
            upload_config: config.uploads.clone(),
            app_env: config.server.env,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let upload_dir = std::env::temp_dir().join(format!("learnhub-test-{}", uuid::Uuid::new_v4()));
    let upload_dir = upload_dir.to_string_lossy().into_owned();

    let lookup = |key: &str| match key {
        "PORT" => Some("0".to_string()),
        "JWT_SECRET" => Some("unit-test-secret".to_string()),
        "JWT_EXPIRES_IN" => Some("1h".to_string()),
        "SALT_ROUNDS" => Some("4".to_string()),
        "UPLOAD_DIR" => Some(upload_dir.clone()),
        _ => None,
    };

    match AppConfig::from_lookup(&lookup) {
        Ok(config) => AppState::new(&config),
        Err(err) => panic!("test config is invalid: {}", err),
    }
}
