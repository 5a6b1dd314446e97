/// User domain type
use serde::{Deserialize, Serialize};

/// Logged-in user profile
///
/// Opaque to the playback core; only its presence matters for authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Contact email, if provided at login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Create a user with just a display name (id = name)
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            email: None,
        }
    }
}
