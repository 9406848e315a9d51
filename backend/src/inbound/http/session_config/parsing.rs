//! Toggle parsing shared by the session settings readers.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean environment toggle with its debug-build default.
pub(super) struct BoolToggle {
    name: &'static str,
    debug_default: bool,
}

impl BoolToggle {
    pub(super) const fn new(name: &'static str, debug_default: bool) -> Self {
        Self {
            name,
            debug_default,
        }
    }

    pub(super) fn read<E: Env + ?Sized>(
        &self,
        env: &E,
        mode: BuildMode,
    ) -> Result<bool, SessionConfigError> {
        let name = self.name;
        let fallback = self.debug_default;
        match env.string(name) {
            Some(value) => match parse_bool(&value) {
                Some(flag) => Ok(flag),
                None => or_debug_default(
                    mode,
                    fallback,
                    SessionConfigError::InvalidEnv {
                        name,
                        value: value.clone(),
                        expected: BOOL_EXPECTED,
                    },
                    || warn!(%value, "invalid {name}; defaulting to {fallback}"),
                ),
            },
            None => or_debug_default(mode, fallback, SessionConfigError::MissingEnv { name }, || {
                warn!("{name} not set; defaulting to {fallback}");
            }),
        }
    }
}

/// Debug builds log and fall back; release builds fail with `error`.
pub(super) fn or_debug_default<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    log: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        log();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site(
    value: &str,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => or_debug_default(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may reject it"),
        ),
        _ => or_debug_default(
            mode,
            fallback,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.to_owned(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(value, "invalid SESSION_SAMESITE; using default"),
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
