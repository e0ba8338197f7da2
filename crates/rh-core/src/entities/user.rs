use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The signed-in user as reported by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub institution: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

impl Registration {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a malformed email or a blank
    /// name or password.
    pub fn validate(&self) -> Result<(), CoreError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CoreError::validation(format!("invalid email '{email}'")));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("name must not be empty"));
        }
        if self.password.is_empty() {
            return Err(CoreError::validation("password must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            email: "ada@example.org".into(),
            name: "Ada".into(),
            password: "secret".into(),
            institution: None,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn email_without_at_is_rejected() {
        let mut reg = registration();
        reg.email = "ada.example.org".into();
        assert!(reg.validate().is_err());
    }

    #[test]
    fn missing_institution_is_omitted() {
        let json = serde_json::to_value(registration()).unwrap();
        assert!(json.get("institution").is_none());
    }
}
