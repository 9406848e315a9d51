//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, StoredCredentials, User, UserId};

use super::diesel_error::{DbFailure, classify};
use super::models::{InvalidRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_KEY: &str = "users_username_key";
const EMAIL_KEY: &str = "users_email_key";

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(error.into_message())
}

fn map_failure(failure: DbFailure) -> UserRepositoryError {
    match failure {
        DbFailure::Connection(message) => UserRepositoryError::connection(message),
        DbFailure::Query(message) => UserRepositoryError::query(message),
        DbFailure::UniqueViolation { .. } | DbFailure::ForeignKeyViolation { .. } => {
            UserRepositoryError::query("constraint violation")
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_failure(classify(error))
}

fn map_insert_error(error: diesel::result::Error, user: &NewUser) -> UserRepositoryError {
    match classify(error) {
        failure if failure.violates(USERNAME_KEY) => {
            UserRepositoryError::duplicate_username(user.username.as_ref())
        }
        failure if failure.violates(EMAIL_KEY) => UserRepositoryError::duplicate_email(
            user.email.as_ref().map(AsRef::<str>::as_ref).unwrap_or_default(),
        ),
        failure => map_failure(failure),
    }
}

fn map_invalid_row(error: InvalidRow) -> UserRepositoryError {
    warn!(%error, "discarding unreadable user row");
    UserRepositoryError::query(error.to_string())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(UserRow::into_user).transpose().map_err(map_invalid_row)
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(UserRow::into_credentials)
            .transpose()
            .map_err(map_invalid_row)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(users::table.filter(users::username.eq(username))))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(users::table.filter(users::email.eq(email))))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(users::table)
            .values(&NewUserRow {
                username: user.username.as_ref(),
                email: user.email.as_ref().map(AsRef::as_ref),
                password_hash: &user.password_hash,
                is_admin: user.is_admin,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, user))?;
        row.into_user().map_err(map_invalid_row)
    }
}
