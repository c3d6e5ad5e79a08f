use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::contact_message;
use crate::error::AppError;

use super::shared::require_text;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateContactRequest {
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Do you ship M6 bolts in bulk?")]
    pub message: String,
}

impl CreateContactRequest {
    /// Trim every field and reject blanks and malformed addresses.
    pub fn validate(self) -> Result<Self, AppError> {
        let name = require_text(&self.name, "name")?;
        let email = require_text(&self.email, "email")?;
        let message = require_text(&self.message, "message")?;

        if !is_plausible_email(&email) {
            return Err(AppError::Validation(format!(
                "'{email}' is not a valid email address"
            )));
        }

        Ok(Self {
            name,
            email,
            message,
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContactMessageResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<contact_message::Model> for ContactMessageResponse {
    fn from(m: contact_message::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            message: m.message,
            created_at: m.created_at,
        }
    }
}
