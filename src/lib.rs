//! # LearnHub API
//!
//! REST backend for a small learning platform: registration and login with
//! JWTs, user profiles, admin-created coach accounts, and course management
//! with optional cover images. Data lives in memory for the lifetime of the
//! process.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── learnhub-core/           # AppError, envelopes, roles, entities, password hashing, file storage
//! ├── learnhub-config/         # environment-driven configuration
//! ├── learnhub-auth/           # JWT claims, signing and verification
//! ├── learnhub-models/         # User and Course entities, request/response DTOs
//! ├── learnhub-store/          # generic in-memory repository and typed wrappers
//! └── learnhub-observability/  # tracing setup and request logging
//! src/
//! ├── middleware/   # AuthUser extractor, role checks, error formatting
//! ├── modules/      # auth, users, courses, health
//! ├── validator.rs  # validated JSON extractor
//! ├── state.rs      # AppState (services wired by hand)
//! └── router.rs     # route tree and global layers
//! ```
//!
//! Each feature module has the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business rules
//! - `router.rs`: Axum router
//!
//! ## Roles
//!
//! | Role | Can |
//! |------|-----|
//! | STUDENT | read courses, manage own profile |
//! | COACH | everything a student can, plus create courses and edit or delete their own |
//! | ADMIN | everything, including creating coaches and editing any course |
//!
//! Public registration always yields a STUDENT. A default ADMIN is seeded on
//! start from `ADMIN_EMAIL` / `ADMIN_PASSWORD` / `ADMIN_NAME`.
//!
//! ## Quick Start
//!
//! ```bash
//! PORT=3000
//! JWT_SECRET=change-me
//! JWT_EXPIRES_IN=7d
//! SALT_ROUNDS=10
//! ```
//!
//! With the server running, API documentation is at `/swagger-ui`.

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod seed;
pub mod state;
pub mod validator;

pub use learnhub_auth;
pub use learnhub_config;
pub use learnhub_core;
pub use learnhub_models;
pub use learnhub_store;
