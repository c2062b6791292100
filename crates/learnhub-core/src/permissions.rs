//! Roles and the authorization policy.
//!
//! Route-level checks ("may this role call this endpoint at all") use plain
//! role slices such as [`COURSE_AUTHORS`]. Record-level checks ("may this user
//! modify this course") go through [`can_modify`], which knows nothing about
//! HTTP and is tested on its own.
//!
//! # Example
//!
//! ```ignore
//! use learnhub_core::permissions::{can_modify, Access, Ownership, UserRole};
//!
//! let ownership = Ownership::of(&course.creator_id, &user_id);
//! if can_modify(role, ownership) == Access::Deny {
//!     return Err(AppError::forbidden("You can only update your own courses"));
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Coach,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Coach => "COACH",
            UserRole::Student => "STUDENT",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(UserRole::Admin),
            "COACH" => Ok(UserRole::Coach),
            "STUDENT" => Ok(UserRole::Student),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Roles allowed to call admin-only endpoints.
pub const ADMINS: &[UserRole] = &[UserRole::Admin];

/// Roles allowed to create, update and delete courses.
pub const COURSE_AUTHORS: &[UserRole] = &[UserRole::Coach, UserRole::Admin];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owner,
    NotOwner,
}

impl Ownership {
    pub fn of(owner_id: &str, actor_id: &str) -> Self {
        if owner_id == actor_id {
            Ownership::Owner
        } else {
            Ownership::NotOwner
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Access::Allow
    }
}

/// Admins may modify anything, everyone else only what they own.
pub fn can_modify(actor: UserRole, ownership: Ownership) -> Access {
    match (actor, ownership) {
        (UserRole::Admin, _) => Access::Allow,
        (_, Ownership::Owner) => Access::Allow,
        (_, Ownership::NotOwner) => Access::Deny,
    }
}

/// Route-level check against an allowed-role set.
pub fn role_allowed(actor: UserRole, allowed: &[UserRole]) -> Access {
    if allowed.contains(&actor) {
        Access::Allow
    } else {
        Access::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_can_modify_anything() {
        assert_eq!(can_modify(UserRole::Admin, Ownership::Owner), Access::Allow);
        assert_eq!(can_modify(UserRole::Admin, Ownership::NotOwner), Access::Allow);
    }

    #[test]
    fn test_coach_only_modifies_own() {
        assert_eq!(can_modify(UserRole::Coach, Ownership::Owner), Access::Allow);
        assert_eq!(can_modify(UserRole::Coach, Ownership::NotOwner), Access::Deny);
    }

    #[test]
    fn test_ownership_of() {
        assert_eq!(Ownership::of("u1", "u1"), Ownership::Owner);
        assert_eq!(Ownership::of("u1", "u2"), Ownership::NotOwner);
    }

    #[test]
    fn test_role_allowed() {
        assert!(role_allowed(UserRole::Coach, COURSE_AUTHORS).is_allowed());
        assert!(role_allowed(UserRole::Admin, COURSE_AUTHORS).is_allowed());
        assert!(!role_allowed(UserRole::Student, COURSE_AUTHORS).is_allowed());
        assert!(!role_allowed(UserRole::Coach, ADMINS).is_allowed());
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&UserRole::Student).unwrap(), "\"STUDENT\"");
        let role: UserRole = serde_json::from_str("\"COACH\"").unwrap();
        assert_eq!(role, UserRole::Coach);
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("admin".parse::<UserRole>().is_err());
    }
}
