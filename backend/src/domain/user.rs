//! User accounts.
//!
//! Usernames and email addresses are validated newtypes so persistence and
//! HTTP adapters cannot construct a [`User`] that breaks the column limits.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::Error;

/// Shortest accepted username, in characters.
pub const USERNAME_MIN: usize = 3;
/// Longest accepted username, in characters.
pub const USERNAME_MAX: usize = 50;
/// Longest accepted email address, in characters.
pub const EMAIL_MAX: usize = 120;

/// Validation failures for usernames and email addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    EmailTooLong { max: usize },
    InvalidEmail,
}

impl UserValidationError {
    /// Machine-readable reason used in error details.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::UsernameTooShort { .. } => "username_too_short",
            Self::UsernameTooLong { .. } => "username_too_long",
            Self::EmailTooLong { .. } | Self::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        Self::validation(err.reason(), err.to_string())
    }
}

/// Database identity of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trimmed login name of `USERNAME_MIN..=USERNAME_MAX` characters.
///
/// # Examples
/// ```
/// use quest_backend::domain::Username;
///
/// assert_eq!(Username::new("  alice ").unwrap().as_ref(), "alice");
/// assert!(Username::new("al").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and wrap a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address with an `@` between a non-empty local part and domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Database identity.
    #[schema(value_type = i64, example = 42)]
    pub id: UserId,
    /// Unique login name.
    #[schema(value_type = String, example = "alice")]
    pub username: Username,
    /// Optional unique contact address.
    #[schema(value_type = Option<String>, example = "alice@example.com")]
    pub email: Option<EmailAddress>,
    /// Grants access to the admin endpoints.
    pub is_admin: bool,
}

impl User {
    /// Fail with [`ErrorCode::Forbidden`](super::ErrorCode::Forbidden)
    /// unless the user is an administrator.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.is_admin {
            Ok(())
        } else {
            Err(Error::forbidden("administrator access required"))
        }
    }
}

/// A user row joined with its password digest, used only for login.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    /// The account.
    pub user: User,
    /// PHC-format password digest.
    pub password_hash: String,
}

/// Insert payload for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: Option<EmailAddress>,
    pub password_hash: String,
    pub is_admin: bool,
}
