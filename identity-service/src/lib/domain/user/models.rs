use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Guests are store-backed like registered users but carry no password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_guest(&self) -> bool {
        self.role == Role::Guest
    }
}

/// User data for a record not yet persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// A registered user with a password hash.
    pub fn registered(username: Username, password_hash: String) -> Self {
        Self {
            username,
            password_hash: Some(password_hash),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    /// A password-less guest.
    pub fn guest(username: Username) -> Self {
        Self {
            username,
            password_hash: None,
            role: Role::Guest,
            created_at: Utc::now(),
        }
    }
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(pub i64);

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// User-supplied names are normalized (trimmed and lowercased) before they
/// are stored or looked up, so "Bob" and " bob " name the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub const MAX_LENGTH: usize = 64;

    /// Prefix of generated guest usernames.
    pub const GUEST_PREFIX: &'static str = "Invitado-";

    /// Normalize and validate a user-supplied username.
    ///
    /// # Errors
    /// * `Empty` - Nothing left after trimming
    /// * `TooLong` - Longer than 64 characters after trimming
    pub fn new(username: impl AsRef<str>) -> Result<Self, UsernameError> {
        let normalized = username.as_ref().trim().to_lowercase();
        Self::with_valid_length(normalized).map(Self)
    }

    /// Wrap a username read back from the store, without normalizing it.
    ///
    /// Guest names keep their mixed case, so stored values are taken as-is.
    pub fn from_stored(username: String) -> Result<Self, UsernameError> {
        Self::with_valid_length(username).map(Self)
    }

    /// Generate a guest username such as `Invitado-1a2b3c4d`.
    pub fn generate_guest() -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", Self::GUEST_PREFIX, &suffix[..8]))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            Err(UsernameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role assigned at creation; never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Guest => "guest",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "guest" => Ok(Role::Guest),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
