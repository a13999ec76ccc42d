//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity.
///
/// The `id` is a surrogate key assigned by the storage layer's sequence
/// at creation time; it is immutable for the record's lifetime and never
/// reused after deletion. Neither `name` nor `email` carries a mandatory,
/// uniqueness, or format constraint at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i64,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
}

/// Incoming user record for create and replace operations.
///
/// Any client-supplied `id` is ignored; identifiers are assigned by the
/// storage layer (create) or taken from the request path (replace).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UserInput {
    /// User display name
    #[schema(example = "John Doe")]
    #[serde(default)]
    pub name: Option<String>,
    /// User email address
    #[schema(example = "user@example.com")]
    #[serde(default)]
    pub email: Option<String>,
}

impl UserInput {
    /// Build an input from owned field values, mainly for tests and seeds.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}
