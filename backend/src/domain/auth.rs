//! Authentication inputs and session-resolution failures.

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, Error, UserId, Username};

/// Shortest accepted password, in characters.
pub const PASSWORD_MIN: usize = 4;

/// Raised when a login payload is structurally empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    EmptyUsername,
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<LoginValidationError> for Error {
    fn from(err: LoginValidationError) -> Self {
        Self::invalid_request(err.to_string())
    }
}

/// Username and password submitted to `login`.
///
/// The username is trimmed; the password is kept verbatim and zeroed on drop.
///
/// # Examples
/// ```
/// use quest_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "s3cret").unwrap();
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials, rejecting blank fields.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Ordered registration failures. Each maps to a `details.code` value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("username already exists")]
    UsernameTaken,
    #[error("email is already registered")]
    EmailTaken,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("email address is not valid")]
    InvalidEmail,
}

impl RegistrationError {
    /// Machine-readable reason.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::UsernameTaken => "username_taken",
            Self::EmailTaken => "email_taken",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::UsernameTooShort { .. } => "username_too_short",
            Self::UsernameTooLong { .. } => "username_too_long",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl From<RegistrationError> for Error {
    fn from(err: RegistrationError) -> Self {
        Self::validation(err.reason(), err.to_string())
    }
}

/// Raw sign-up form.
///
/// Only normalisation happens here; uniqueness has to be checked against
/// the store before [`Registration::validate`] runs the shape checks, so
/// the reported failure follows the documented order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: String,
    email: Option<String>,
    password: Zeroizing<String>,
}

/// A registration whose fields passed every shape check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub username: Username,
    pub email: Option<EmailAddress>,
}

impl Registration {
    /// Trim the username and drop a blank email.
    #[must_use]
    pub fn new(username: &str, email: Option<&str>, password: &str) -> Self {
        Self {
            username: username.trim().to_owned(),
            email: email
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Password length, then username length, then email shape.
    pub fn validate(&self) -> Result<ValidRegistration, RegistrationError> {
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        let username = Username::new(&self.username).map_err(|err| match err {
            super::UserValidationError::UsernameTooLong { max } => {
                RegistrationError::UsernameTooLong { max }
            }
            super::UserValidationError::UsernameTooShort { min } => {
                RegistrationError::UsernameTooShort { min }
            }
            super::UserValidationError::EmailTooLong { .. }
            | super::UserValidationError::InvalidEmail => RegistrationError::InvalidEmail,
        })?;
        let email = self
            .email
            .as_deref()
            .map(EmailAddress::new)
            .transpose()
            .map_err(|_| RegistrationError::InvalidEmail)?;
        Ok(ValidRegistration { username, email })
    }
}

/// Why the session could not be resolved to a user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionUserError {
    /// No user id is bound to the session.
    #[error("login required")]
    Unauthenticated,
    /// The bound id no longer resolves to a user.
    #[error("user {0} no longer exists")]
    UserNotFound(UserId),
    /// The lookup itself failed.
    #[error(transparent)]
    Backend(Error),
}

impl From<SessionUserError> for Error {
    fn from(err: SessionUserError) -> Self {
        match err {
            SessionUserError::Unauthenticated => login_required("unauthenticated"),
            SessionUserError::UserNotFound(_) => login_required("user_not_found"),
            SessionUserError::Backend(inner) => inner,
        }
    }
}

fn login_required(reason: &str) -> Error {
    Error::unauthorized("login required").with_details(serde_json::json!({ "code": reason }))
}
