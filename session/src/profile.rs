//! Profile edits and the cached profile image.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use serde::Serialize;

use crate::error::ValidationError;
use crate::types::User;

/// Largest accepted profile image, in bytes (5 MiB).
pub const MAX_PROFILE_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// `PUT /users/update-profile` body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub bio: String,
    pub phone: String,
    pub location: String,
    /// Cached data URL sent alongside the edit, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl ProfileUpdate {
    /// Seed the editable fields from the cached user record.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            bio: user.bio.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            location: user.location.clone().unwrap_or_default(),
            profile_image: None,
        }
    }

    /// Trim fields and require a username and email.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for a blank username or email.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingField("Username"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingField("Email"));
        }
        Ok(Self {
            username: username.to_owned(),
            email: email.to_owned(),
            bio: self.bio.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            location: self.location.trim().to_owned(),
            profile_image: self.profile_image.clone(),
        })
    }

    /// Apply the edit to a cached user, keeping server-owned fields.
    #[must_use]
    pub fn apply_to(&self, user: User) -> User {
        User {
            username: self.username.clone(),
            email: self.email.clone(),
            bio: non_empty(&self.bio),
            phone: non_empty(&self.phone),
            location: non_empty(&self.location),
            ..user
        }
    }
}

/// A checked profile image, held as a `data:` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileImage {
    data_url: String,
}

impl ProfileImage {
    /// Accept an uploaded image after checking its type and size.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAnImage`] or [`ValidationError::ImageTooLarge`].
    pub fn new(mime: &str, size_bytes: u64, data_url: String) -> Result<Self, ValidationError> {
        check_profile_image(mime, size_bytes)?;
        Ok(Self { data_url })
    }

    #[must_use]
    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

/// Check an upload before it is read into memory.
///
/// # Errors
///
/// Returns [`ValidationError::NotAnImage`] or [`ValidationError::ImageTooLarge`].
pub fn check_profile_image(mime: &str, size_bytes: u64) -> Result<(), ValidationError> {
    if size_bytes > MAX_PROFILE_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge);
    }
    if !mime.starts_with("image/") {
        return Err(ValidationError::NotAnImage);
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}
