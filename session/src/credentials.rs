//! Login and signup forms, their validation, and the AuthAPI payloads.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use serde::Serialize;

use crate::error::{LOGIN_FAILED_MESSAGE, REGISTER_FAILED_MESSAGE, ValidationError};

/// Which AuthAPI endpoint a submission targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialKind {
    Login,
    Register,
}

impl CredentialKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Generic message shown when the server gives no explanation.
    #[must_use]
    pub fn failure_fallback(self) -> &'static str {
        match self {
            Self::Login => LOGIN_FAILED_MESSAGE,
            Self::Register => REGISTER_FAILED_MESSAGE,
        }
    }
}

/// Raw login form input as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Raw signup form input as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_terms: bool,
}

/// `POST /auth/login` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCredentials {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl LoginForm {
    /// Trim the email and check required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for an empty email or password.
    pub fn validate(&self) -> Result<LoginCredentials, ValidationError> {
        let email = required(&self.email, "Email")?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }
        Ok(LoginCredentials { email, password: self.password.clone() })
    }
}

impl SignupForm {
    /// Trim identity fields, then check passwords and the terms agreement.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`ValidationError`] in form order.
    pub fn validate(&self) -> Result<RegisterCredentials, ValidationError> {
        let username = required(&self.username, "Username")?;
        let email = required(&self.email, "Email")?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if !self.agree_terms {
            return Err(ValidationError::TermsNotAccepted);
        }
        Ok(RegisterCredentials {
            username,
            email,
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

/// A credential submission awaiting validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialRequest {
    Login(LoginForm),
    Register(SignupForm),
}

/// A validated credential submission, ready for the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialPayload {
    Login(LoginCredentials),
    Register(RegisterCredentials),
}

impl CredentialRequest {
    #[must_use]
    pub fn kind(&self) -> CredentialKind {
        match self {
            Self::Login(_) => CredentialKind::Login,
            Self::Register(_) => CredentialKind::Register,
        }
    }

    /// Validate the form into its wire payload.
    ///
    /// # Errors
    ///
    /// Returns the form's [`ValidationError`].
    pub fn into_payload(self) -> Result<CredentialPayload, ValidationError> {
        match self {
            Self::Login(form) => form.validate().map(CredentialPayload::Login),
            Self::Register(form) => form.validate().map(CredentialPayload::Register),
        }
    }
}

fn required(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}
