//! # LearnHub Store
//!
//! In-memory storage for the LearnHub API. Nothing survives a restart.
//!
//! [`InMemoryRepository`] is a generic collection of [`learnhub_core::Entity`]
//! values guarded by a `RwLock`: reads share the lock, writes are exclusive,
//! and callers only ever get clones back. [`UserRepository`] and
//! [`CourseRepository`] wrap it with the queries each domain needs.
//!
//! # Example
//!
//! ```ignore
//! use learnhub_store::UserRepository;
//!
//! let users = UserRepository::new();
//! let user = users.create(new_user)?;          // Err(StoreError::Conflict) on duplicate email
//! assert_eq!(users.find_by_id(&user.base.id), Some(user));
//! ```

pub mod courses;
pub mod memory;
pub mod users;

pub use courses::CourseRepository;
pub use memory::{InMemoryRepository, StoreError};
pub use users::UserRepository;
