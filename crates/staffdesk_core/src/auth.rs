//! Account registration against the content API.
//!
//! Registration uses the same required-field rule as employee forms before
//! anything is sent.

use crate::model::validation::{require_text, validate_email, Field, ValidationError};
use crate::repo::content_api::RemoteError;
use crate::repo::http_api::{send_checked, HttpContentApi};
use log::{info, warn};
use reqwest::Method;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const REGISTER_PATH: &str = "auth/local/register";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(Field::Username, Some(self.username.as_str()))?;
        let email = require_text(Field::Email, Some(self.email.as_str()))?;
        validate_email(email)?;
        require_text(Field::Password, Some(self.password.as_str()))?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum RegistrationError {
    Validation(ValidationError),
    /// Server refused the account; carries its message.
    Rejected(String),
    Remote(RemoteError),
}

impl RegistrationError {
    /// Message suitable for showing to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Rejected(message) => write!(f, "registration failed: {message}"),
            Self::Remote(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Rejected(_) => None,
            Self::Remote(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RegistrationError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RemoteError> for RegistrationError {
    fn from(value: RemoteError) -> Self {
        match value {
            RemoteError::Status { status, message } if (400..500).contains(&status) => {
                Self::Rejected(message)
            }
            other => Self::Remote(other),
        }
    }
}

/// Validates `form` and registers the account.
pub async fn register(api: &HttpContentApi, form: &RegistrationForm) -> Result<(), RegistrationError> {
    form.validate()?;

    let request = api.request(Method::POST, REGISTER_PATH).json(form);
    match send_checked(request).await {
        Ok(_) => {
            info!("event=account_register module=auth status=ok");
            Ok(())
        }
        Err(err) => {
            warn!("event=account_register module=auth status=error error={err}");
            Err(err.into())
        }
    }
}
