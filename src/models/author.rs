//! Author model and request payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full author record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Create/update author request (full replace, every field required)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AuthorPayload {
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "must be 1 to 100 characters"))]
    pub last_name: String,
    pub birth_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(first_name: &str, last_name: &str) -> AuthorPayload {
        AuthorPayload {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        }
    }

    #[test]
    fn accepts_valid_payload() {
        assert!(payload("John", "Doe").validate().is_ok());
    }

    #[test]
    fn rejects_overlong_first_name() {
        let err = payload(&"x".repeat(101), "Doe").validate().unwrap_err();
        assert!(err.field_errors().contains_key("first_name"));
    }

    #[test]
    fn rejects_empty_last_name() {
        let err = payload("John", "").validate().unwrap_err();
        assert!(err.field_errors().contains_key("last_name"));
    }

    #[test]
    fn display_is_first_last() {
        let author = Author {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        };
        assert_eq!(author.to_string(), "John Doe");
    }
}
