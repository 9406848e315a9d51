//! Classification of Diesel failures shared by the repositories.
//!
//! Repositories care about four outcomes: the connection dropped, a unique
//! or foreign key constraint fired (and which one), or anything else went
//! wrong with the query. Driver details are logged at debug level and never
//! leave the adapter.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// What a Diesel error means to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    Connection(&'static str),
    Query(&'static str),
    UniqueViolation { constraint: Option<String> },
    ForeignKeyViolation { constraint: Option<String> },
}

impl DbFailure {
    /// Whether this is a violation of the named constraint.
    pub(crate) fn violates(&self, name: &str) -> bool {
        match self {
            Self::UniqueViolation { constraint } | Self::ForeignKeyViolation { constraint } => {
                constraint.as_deref() == Some(name)
            }
            Self::Connection(_) | Self::Query(_) => false,
        }
    }
}

pub(crate) fn classify(error: DieselError) -> DbFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => debug!(
            ?kind,
            message = info.message(),
            constraint = info.constraint_name(),
            "diesel operation failed"
        ),
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DbFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DbFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DbFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DbFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DbFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        _ => DbFailure::Query("database error"),
    }
}


#[cfg(test)]
mod tests {
    use super::test_errors::database_error;
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_keeps_constraint_name() {
        let failure = classify(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("bookings_quest_slot_key"),
        ));
        assert!(failure.violates("bookings_quest_slot_key"));
        assert!(!failure.violates("users_email_key"));
    }

    #[rstest]
    #[case(DieselError::NotFound, DbFailure::Query("record not found"))]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection, None),
        DbFailure::Connection("database connection error")
    )]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation, None),
        DbFailure::ForeignKeyViolation { constraint: None }
    )]
    #[case(
        database_error(DatabaseErrorKind::CheckViolation, Some("quests_price_check")),
        DbFailure::Query("database error")
    )]
    fn classifies_driver_errors(#[case] error: DieselError, #[case] expected: DbFailure) {
        assert_eq!(classify(error), expected);
    }
}
