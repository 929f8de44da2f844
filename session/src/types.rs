//! Session data model.
//!
//! DESIGN
//! ======
//! `User` mirrors the record the AuthAPI returns and is cached verbatim in the
//! `user` storage slot. Optional profile fields are omitted from JSON when
//! absent so a freshly issued record round-trips byte-for-byte.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Cached copy of the server-side user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier. Numeric ids are accepted and stringified.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    /// Authorization role label (e.g. `"user"`, `"admin"`).
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl User {
    /// Upper-cased first letter of the username, used for avatar badges.
    #[must_use]
    pub fn initial(&self) -> char {
        self.username
            .chars()
            .next()
            .map_or('U', |c| c.to_uppercase().next().unwrap_or(c))
    }
}

/// An authenticated client: bearer token plus the cached user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or integer id, got {other}"))),
    }
}
