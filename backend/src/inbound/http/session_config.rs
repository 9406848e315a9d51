//! Session cookie configuration read from the environment.
//!
//! | Variable | Release builds | Debug builds |
//! | --- | --- | --- |
//! | `SESSION_KEY_FILE` | key file must exist, >= 64 bytes | falls back to an ephemeral key |
//! | `SESSION_COOKIE_SECURE` | required bool | defaults to `true` with a warning |
//! | `SESSION_SAMESITE` | required `Strict`, `Lax` or `None` | defaults to `Lax` |
//! | `SESSION_ALLOW_EPHEMERAL` | required, must be false | defaults to `false` |

pub mod fingerprint;
mod parsing;

use std::path::PathBuf;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

use parsing::{BoolToggle, or_debug_default, parse_same_site};

pub const SESSION_COOKIE_NAME: &str = "session";
/// Lifetime of a session cookie, in hours.
pub const SESSION_TTL_HOURS: i64 = 2;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

/// Whether missing or invalid toggles are fatal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// `Debug` when compiled with debug assertions.
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Private (encrypted) HTTP-only cookie sessions named `session` that
    /// expire two hours after the last change.
    #[must_use]
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_http_only(true)
            .cookie_secure(self.cookie_secure)
            .cookie_same_site(self.same_site)
            .session_lifecycle(
                PersistentSession::default().session_ttl(CookieDuration::hours(SESSION_TTL_HOURS)),
            )
            .build()
    }
}

/// Invalid or missing session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate every session toggle.
///
/// # Errors
/// [`SessionConfigError`] in release builds when a toggle is missing or
/// invalid, or when the key file is unreadable or too short.
pub fn session_settings_from_env<E: Env + ?Sized>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = BoolToggle::new(COOKIE_SECURE_ENV, true).read(env, mode)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = BoolToggle::new(ALLOW_EPHEMERAL_ENV, false).read(env, mode)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key_from_env(env, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn same_site_from_env<E: Env + ?Sized>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    match env.string(SAMESITE_ENV) {
        Some(value) => parse_same_site(&value, mode, cookie_secure, fallback),
        None => or_debug_default(
            mode,
            fallback,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        ),
    }
}

fn session_key_from_env<E: Env + ?Sized>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let too_short = length < SESSION_KEY_MIN_LEN;
            if too_short && !mode.is_debug() {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            // Key::derive_from needs at least 32 bytes of input.
            let key = if length >= 32 {
                Key::derive_from(&bytes)
            } else {
                warn!(path = %path.display(), length, "session key too short; using temporary key");
                Key::generate()
            };
            bytes.zeroize();
            Ok(key)
        }
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}
