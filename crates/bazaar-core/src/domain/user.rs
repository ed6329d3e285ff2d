use serde::{Deserialize, Serialize};

/// Role a user holds on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Member,
    Moderator,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
        }
    }
}

/// User entity - the author of ads.
///
/// The password is an opaque string; users are managed outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub age: u16,
}
