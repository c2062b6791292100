//! # LearnHub Auth
//!
//! Authentication types and JWT utilities for the LearnHub API.
//!
//! - [`claims`]: the access token payload (`sub`, `email`, `role`, `iat`, `exp`)
//! - [`jwt`]: token creation and verification

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{TokenError, create_access_token, sign_claims, verify_token};
