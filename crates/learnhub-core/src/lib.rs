//! # LearnHub Core
//!
//! Core types, errors, and utilities for the LearnHub API.
//!
//! - [`errors`]: Application error type and the `{success: false, error}` envelope
//! - [`response`]: The `{success: true, message?, data?}` envelope
//! - [`entity`]: Base fields and the [`Entity`] trait used by the repositories
//! - [`permissions`]: Roles and the course modification policy
//! - [`password`]: bcrypt hashing and verification
//! - [`file_storage`]: Storage for uploaded images
//!
//! # Example
//!
//! ```ignore
//! use learnhub_core::errors::AppError;
//! use learnhub_core::password::PasswordHasher;
//!
//! let error = AppError::not_found("Course not found");
//!
//! let hasher = PasswordHasher::new(10);
//! let hash = hasher.hash("secure_password").await?;
//! ```

pub mod entity;
pub mod errors;
pub mod file_storage;
pub mod password;
pub mod permissions;
pub mod response;

// Re-export commonly used types at crate root
pub use entity::{BaseEntity, Entity};
pub use errors::{AppError, FieldError};
pub use password::{PasswordHasher, hash_password, verify_password};
pub use permissions::UserRole;
pub use response::ApiResponse;
