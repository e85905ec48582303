use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Role claim carried by an authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Admin,
    /// Any role string the server does not recognise
    #[serde(other)]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }

    /// Parse a role stored in the employees table. Unknown values map to `Customer`.
    pub fn from_db(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "staff" => Role::Staff,
            "admin" => Role::Admin,
            _ => Role::Customer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: Role,
    pub staff_id: i64,
}

/// Body of `PUT /exhibitions/changeArtwork`. Identifiers stay raw JSON and
/// are coerced with the same rules as the insert routes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeArtworkRequest {
    #[serde(default)]
    pub new_artwork: Option<ArtworkRef>,
    /// Artwork currently linked to the exhibition that should be swapped out
    #[serde(default)]
    pub replaces: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkRef {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}
