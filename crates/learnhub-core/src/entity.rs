//! Identity and lifecycle fields shared by every stored record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntity {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BaseEntity {
    /// Fresh UUID v4 id, `created_at == updated_at`.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`. It always moves forward, even when the clock has
    /// not ticked since the last write.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::nanoseconds(1)
        };
    }
}

impl Default for BaseEntity {
    fn default() -> Self {
        Self::new()
    }
}

/// A record that can live in a repository.
///
/// `Draft` is everything a caller supplies on creation; the repository adds
/// the [`BaseEntity`]. `Patch` is a partial update where `None` means "leave
/// unchanged".
pub trait Entity: Clone + Send + Sync + 'static {
    type Draft: Send;
    type Patch: Send;

    fn from_draft(base: BaseEntity, draft: Self::Draft) -> Self;

    fn apply_patch(&mut self, patch: Self::Patch);

    fn base(&self) -> &BaseEntity;

    fn base_mut(&mut self) -> &mut BaseEntity;

    fn id(&self) -> &str {
        &self.base().id
    }
}
