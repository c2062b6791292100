use std::sync::Arc;

use tracing::instrument;

use learnhub_core::AppError;
use learnhub_core::file_storage::{FileStorage, StorageError, UploadedFile};
use learnhub_core::permissions::{Access, Ownership, UserRole, can_modify};
use learnhub_models::{Course, CourseChanges, CreateCourseRequest, NewCourse, UpdateCourseRequest};
use learnhub_store::CourseRepository;

pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const NOT_YOUR_COURSE_UPDATE: &str = "You can only update your own courses";
pub const NOT_YOUR_COURSE_DELETE: &str = "You can only delete your own courses";

fn storage_error(err: StorageError) -> AppError {
    if err.is_client_error() {
        AppError::bad_request(err.to_string())
    } else {
        AppError::internal(err)
    }
}

#[derive(Clone)]
pub struct CourseService {
    courses: CourseRepository,
    storage: Arc<dyn FileStorage>,
}

impl CourseService {
    pub fn new(courses: CourseRepository, storage: Arc<dyn FileStorage>) -> Self {
        Self { courses, storage }
    }

    #[instrument(skip(self, dto, image), fields(has_image = image.is_some()))]
    pub async fn create_course(
        &self,
        dto: CreateCourseRequest,
        creator_id: &str,
        image: Option<UploadedFile>,
    ) -> Result<Course, AppError> {
        let image = match image {
            Some(file) => Some(self.storage.save(&file).await.map_err(storage_error)?),
            None => None,
        };

        let course = self.courses.create(NewCourse {
            title: dto.title,
            description: dto.description,
            image,
            creator_id: creator_id.to_string(),
        });

        tracing::info!(course_id = %course.base.id, "Course created");
        Ok(course)
    }

    pub fn get_all_courses(&self) -> Vec<Course> {
        self.courses.find_all()
    }

    pub fn get_course_by_id(&self, id: &str) -> Option<Course> {
        self.courses.find_by_id(id)
    }

    pub fn get_courses_by_creator(&self, creator_id: &str) -> Vec<Course> {
        self.courses.find_by_creator_id(creator_id)
    }

    pub fn search_courses(&self, term: &str) -> Vec<Course> {
        self.courses.search(term)
    }

    /// Only the creator or an admin may update. A new image replaces the old
    /// one, which is then removed from storage.
    #[instrument(skip(self, dto, image), fields(has_image = image.is_some()))]
    pub async fn update_course(
        &self,
        id: &str,
        user_id: &str,
        role: UserRole,
        dto: UpdateCourseRequest,
        image: Option<UploadedFile>,
    ) -> Result<Course, AppError> {
        let existing = self
            .courses
            .find_by_id(id)
            .ok_or_else(|| AppError::not_found(COURSE_NOT_FOUND))?;

        if can_modify(role, Ownership::of(&existing.creator_id, user_id)) == Access::Deny {
            tracing::warn!(course_id = %id, "Update rejected for non-owner");
            return Err(AppError::forbidden(NOT_YOUR_COURSE_UPDATE));
        }

        let new_image = match image {
            Some(file) => Some(self.storage.save(&file).await.map_err(storage_error)?),
            None => None,
        };

        let changes = CourseChanges {
            title: dto.title,
            description: dto.description,
            image: new_image.clone(),
        };

        let Some(updated) = self.courses.update(id, changes) else {
            // Deleted while the upload was being written.
            if let Some(path) = &new_image {
                self.discard_image(path).await;
            }
            return Err(AppError::not_found(COURSE_NOT_FOUND));
        };

        if let (Some(_), Some(old)) = (&new_image, existing.image.as_deref()) {
            self.discard_image(old).await;
        }

        tracing::info!(course_id = %updated.base.id, "Course updated");
        Ok(updated)
    }

    /// Only the creator or an admin may delete. The image is removed first, best-effort.
    #[instrument(skip(self))]
    pub async fn delete_course(
        &self,
        id: &str,
        user_id: &str,
        role: UserRole,
    ) -> Result<(), AppError> {
        let existing = self
            .courses
            .find_by_id(id)
            .ok_or_else(|| AppError::not_found(COURSE_NOT_FOUND))?;

        if can_modify(role, Ownership::of(&existing.creator_id, user_id)) == Access::Deny {
            tracing::warn!(course_id = %id, "Delete rejected for non-owner");
            return Err(AppError::forbidden(NOT_YOUR_COURSE_DELETE));
        }

        if let Some(path) = existing.image.as_deref() {
            self.discard_image(path).await;
        }

        if !self.courses.delete_by_id(id) {
            return Err(AppError::not_found(COURSE_NOT_FOUND));
        }

        tracing::info!(course_id = %id, "Course deleted");
        Ok(())
    }

    /// Failing to remove an image never fails the request.
    async fn discard_image(&self, path: &str) {
        if let Err(err) = self.storage.delete(path).await {
            tracing::warn!(error = %err, path = %path, "Failed to delete course image");
        }
    }
}
