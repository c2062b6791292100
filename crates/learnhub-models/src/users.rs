//! User entity, its sanitized projection, and profile DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use learnhub_core::{BaseEntity, Entity, UserRole};

use crate::AT_LEAST_ONE_FIELD;

/// A stored user. Holds the password hash, so it is never sent to clients;
/// see [`UserResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub base: BaseEntity,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: UserRole,
}

/// Fields supplied when creating a user. `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Profile changes. Role and password cannot be changed this way.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Entity for User {
    type Draft = NewUser;
    type Patch = UserChanges;

    fn from_draft(base: BaseEntity, draft: NewUser) -> Self {
        Self {
            base,
            name: draft.name,
            email: draft.email,
            password: draft.password,
            role: draft.role,
        }
    }

    fn apply_patch(&mut self, patch: UserChanges) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.base.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.base.created_at,
            updated_at: user.base.updated_at,
        }
    }
}

/// DTO used by admins to create a coach account.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCoachRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    #[schema(example = "Grace Hopper")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "grace@learnhub.dev")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_profile_changes"))]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

fn validate_profile_changes(dto: &UpdateProfileRequest) -> Result<(), ValidationError> {
    if dto.name.is_none() && dto.email.is_none() {
        return Err(ValidationError::new("at_least_one_field").with_message(AT_LEAST_ONE_FIELD.into()));
    }
    Ok(())
}

impl From<UpdateProfileRequest> for UserChanges {
    fn from(dto: UpdateProfileRequest) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;

    fn sample_user() -> User {
        User::from_draft(
            BaseEntity::new(),
            NewUser {
                name: Name().fake(),
                email: SafeEmail().fake(),
                password: "$2b$04$hash".to_string(),
                role: UserRole::Student,
            },
        )
    }

    #[test]
    fn test_password_is_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["role"], "STUDENT");
    }

    #[test]
    fn test_user_response_projection() {
        let user = sample_user();
        let response = UserResponse::from(user.clone());
        assert_eq!(response.id, user.base.id);
        assert_eq!(response.email, user.email);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_apply_patch_only_touches_provided_fields() {
        let mut user = sample_user();
        let email = user.email.clone();
        user.apply_patch(UserChanges {
            name: Some("Ada Lovelace".to_string()),
            email: None,
        });
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, email);
    }

    #[test]
    fn test_update_profile_requires_a_field() {
        assert!(UpdateProfileRequest::default().validate().is_err());

        let rename = UpdateProfileRequest {
            name: Some("Ada".to_string()),
            email: None,
        };
        assert!(rename.validate().is_ok());

        let bad_email = UpdateProfileRequest {
            name: None,
            email: Some("nope".to_string()),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_create_coach_rules() {
        let valid = CreateCoachRequest {
            name: "Grace".to_string(),
            email: "grace@learnhub.dev".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_password = CreateCoachRequest {
            password: "12345".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }
}
