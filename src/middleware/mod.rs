//! Request pipeline pieces that run around the handlers.
//!
//! - [`auth`]: the `AuthUser` extractor (bearer token → stored user)
//! - [`role`]: route-level role checks applied with `route_layer`
//! - [`error`]: last-stop normalization of error responses
//!
//! A protected request goes through `require_roles` (which authenticates and
//! caches the `AuthUser` in the request extensions), then the body extractor,
//! then the handler. Errors from any stage leave as an `AppError` response
//! and pass through `error_formatter` on the way out.

pub mod auth;
pub mod error;
pub mod role;
