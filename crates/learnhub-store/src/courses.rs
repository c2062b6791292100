use learnhub_models::{Course, CourseChanges, NewCourse};

use crate::memory::InMemoryRepository;

#[derive(Clone, Default)]
pub struct CourseRepository {
    inner: InMemoryRepository<Course>,
}

impl CourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_all(&self) -> Vec<Course> {
        self.inner.find_all()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Course> {
        self.inner.find_by_id(id)
    }

    pub fn find_by_creator_id(&self, creator_id: &str) -> Vec<Course> {
        self.inner
            .find_many_by(|course| course.creator_id == creator_id)
    }

    /// First course whose title contains `title`, ignoring case.
    pub fn find_by_title(&self, title: &str) -> Option<Course> {
        let needle = title.to_lowercase();
        self.inner
            .find_one_by(|course| course.title.to_lowercase().contains(&needle))
    }

    /// Courses whose title or description contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<Course> {
        let needle = term.to_lowercase();
        self.inner.find_many_by(|course| {
            course.title.to_lowercase().contains(&needle)
                || course.description.to_lowercase().contains(&needle)
        })
    }

    pub fn create(&self, new_course: NewCourse) -> Course {
        let course = self.inner.create(new_course);
        tracing::debug!(course_id = %course.base.id, creator_id = %course.creator_id, "Course stored");
        course
    }

    pub fn update(&self, id: &str, changes: CourseChanges) -> Option<Course> {
        self.inner.update(id, changes)
    }

    pub fn delete_by_id(&self, id: &str) -> bool {
        self.inner.delete_by_id(id)
    }
}
