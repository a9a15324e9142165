use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::FieldViolation;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owning-user summary joined into comment and social-media reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub age: Option<i32>,
}

impl RegisterUserInput {
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.username.is_empty() {
            violations.push(FieldViolation::new("username", "username is required"));
        }

        if self.email.is_empty() {
            violations.push(FieldViolation::new("email", "email is required"));
        } else if !is_valid_email(&self.email) {
            violations.push(FieldViolation::new(
                "email",
                "email must be a valid email address",
            ));
        }

        if self.password.is_empty() {
            violations.push(FieldViolation::new("password", "password is required"));
        } else if self.password.chars().count() < 6 {
            violations.push(FieldViolation::new(
                "password",
                "password must be at least 6 characters",
            ));
        }

        match self.age {
            None => violations.push(FieldViolation::new("age", "age is required")),
            Some(age) if !(8..=63).contains(&age) => {
                violations.push(FieldViolation::new("age", "age must be between 8 and 63"))
            }
            Some(_) => {}
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginInput {
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.email.is_empty() {
            violations.push(FieldViolation::new("email", "email is required"));
        }
        if self.password.is_empty() {
            violations.push(FieldViolation::new("password", "password is required"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub username: Option<String>,
    pub age: Option<i32>,
}

impl UpdateUserInput {
    /// Empty strings mean "keep the stored value", the same as absent fields.
    pub fn normalized(mut self) -> Self {
        self.email = self.email.filter(|v| !v.is_empty());
        self.username = self.username.filter(|v| !v.is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                violations.push(FieldViolation::new(
                    "email",
                    "email must be a valid email address",
                ));
            }
        }

        if let Some(age) = self.age {
            if !(8..=63).contains(&age) {
                violations.push(FieldViolation::new("age", "age must be between 8 and 63"));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub age: i32,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            age: user.age,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggedInUser {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub age: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UpdatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            age: user.age,
            updated_at: user.updated_at,
        }
    }
}

/// Minimal well-formedness check: one `@` with a dotted domain part.
fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    if value.chars().any(|c| c.is_whitespace()) {
        return false;
    }

    match domain.split_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_input() -> RegisterUserInput {
        RegisterUserInput {
            email: "a@x.com".to_string(),
            username: "a".to_string(),
            password: "secretpw".to_string(),
            age: Some(20),
        }
    }

    #[test]
    fn test_register_input_valid() {
        assert!(register_input().validate().is_ok());
    }

    #[test]
    fn test_register_input_missing_fields() {
        let input = RegisterUserInput {
            email: String::new(),
            username: String::new(),
            password: String::new(),
            age: None,
        };

        let violations = input.validate().unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["username", "email", "password", "age"]);
    }

    #[test]
    fn test_register_input_bad_email() {
        let mut input = register_input();
        input.email = "not-an-email".to_string();

        let violations = input.validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "email");
    }

    #[test]
    fn test_register_input_short_password() {
        let mut input = register_input();
        input.password = "nope".to_string();

        let violations = input.validate().unwrap_err();
        assert_eq!(violations[0].message, "password must be at least 6 characters");
    }

    #[test]
    fn test_register_input_age_bounds() {
        let mut input = register_input();

        input.age = Some(7);
        assert!(input.validate().is_err());

        input.age = Some(8);
        assert!(input.validate().is_ok());

        input.age = Some(63);
        assert!(input.validate().is_ok());

        input.age = Some(64);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_login_input_requires_both_fields() {
        let input = LoginInput {
            email: String::new(),
            password: String::new(),
        };

        let violations = input.validate().unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_update_input_normalizes_empty_strings() {
        let input = UpdateUserInput {
            email: Some(String::new()),
            username: Some("fresh".to_string()),
            age: None,
        };

        let normalized = input.normalized();
        assert!(normalized.email.is_none());
        assert_eq!(normalized.username.as_deref(), Some("fresh"));
    }

    #[test]
    fn test_update_input_validates_submitted_values_only() {
        let input = UpdateUserInput::default();
        assert!(input.validate().is_ok());

        let input = UpdateUserInput {
            email: Some("broken".to_string()),
            username: None,
            age: Some(200),
        };
        let violations = input.validate().unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("john.doe@sub.example.org"));
        assert!(!is_valid_email("ax.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a b@x.com"));
    }
}
