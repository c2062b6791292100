use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use learnhub_core::{BaseEntity, Entity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub title: String,
    pub description: String,
    /// Public path of the cover image, e.g. `/uploads/1718000000000-3f2a9c1e.png`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub creator_id: String,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub creator_id: String,
}

/// Partial course update. The creator never changes.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl Entity for Course {
    type Draft = NewCourse;
    type Patch = CourseChanges;

    fn from_draft(base: BaseEntity, draft: NewCourse) -> Self {
        Self {
            base,
            title: draft.title,
            description: draft.description,
            image: draft.image,
            creator_id: draft.creator_id,
        }
    }

    fn apply_patch(&mut self, patch: CourseChanges) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
    }

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[validate(length(min = 3, message = "Title must be at least 3 characters long"))]
    #[schema(example = "Rust for Backend Developers")]
    pub title: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters long"))]
    pub description: String,
}

/// Every field is optional; an update carrying neither fields nor an image is
/// rejected by the course form extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 3, message = "Title must be at least 3 characters long"))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "Description must be at least 10 characters long"))]
    pub description: Option<String>,
}

impl UpdateCourseRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CourseFilterParams {
    /// Only courses created by this user
    pub creator_id: Option<String>,
    /// Case-insensitive match on title or description
    pub search: Option<String>,
}
