use learnhub_config::SeedConfig;
use learnhub_core::AppError;

use crate::state::AppState;

/// Makes sure the bootstrap administrator exists. Safe to call on every start.
pub async fn seed_admin(state: &AppState, seed: &SeedConfig) -> Result<(), AppError> {
    if state.user_service.ensure_admin(seed).await? {
        tracing::info!(email = %seed.email, "Default admin user created");
    }
    Ok(())
}
