//! # LearnHub Models
//!
//! Domain models and DTOs for the LearnHub API.
//!
//! - [`users`]: the `User` entity, `UserResponse` (no password) and profile DTOs
//! - [`auth`]: registration and login DTOs
//! - [`courses`]: the `Course` entity, course DTOs and list filters
//!
//! Entities implement [`learnhub_core::Entity`] so they can be stored in the
//! generic in-memory repository. Request DTOs carry their `validator` rules.

pub mod auth;
pub mod courses;
pub mod users;

/// Message for update requests that carry no field at all.
pub const AT_LEAST_ONE_FIELD: &str = "At least one field must be provided for update";

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use courses::{
    Course, CourseChanges, CourseFilterParams, CreateCourseRequest, NewCourse, UpdateCourseRequest,
};
pub use users::{
    CreateCoachRequest, NewUser, UpdateProfileRequest, User, UserChanges, UserResponse,
};
