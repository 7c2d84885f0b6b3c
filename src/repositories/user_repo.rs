use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::{models::users::User, Error, Result};

use super::PostgresRepo;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn create_user(&self, username: String, email: String, password: String)
        -> Result<User>;
}

#[async_trait]
impl UserRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self, password))]
    async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(username)
        .bind(email)
        .bind(password)
        .fetch_one(&self.pool)
        .await
        .map_err(insert_error)?;

        Ok(user)
    }
}

/// A concurrent registration can slip past the existence check; the UNIQUE constraint on
/// `users.username` then rejects the insert.
fn insert_error(err: sqlx::Error) -> Error {
    let duplicate = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if duplicate {
        return Error::BadRequest("Username already exists".to_string());
    }
    Error::from(err)
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, error::Error as StdError, fmt};

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct ConstraintError {
        unique: bool,
    }

    impl fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "constraint violated")
        }
    }

    impl StdError for ConstraintError {}

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    #[test]
    fn unique_violation_is_a_duplicate_username() {
        let err = sqlx::Error::Database(Box::new(ConstraintError { unique: true }));
        assert!(matches!(
            insert_error(err),
            Error::BadRequest(msg) if msg == "Username already exists"
        ));
    }

    #[test]
    fn other_database_errors_stay_internal() {
        let err = sqlx::Error::Database(Box::new(ConstraintError { unique: false }));
        assert!(matches!(insert_error(err), Error::DatabaseError(_)));
        assert!(matches!(
            insert_error(sqlx::Error::RowNotFound),
            Error::DatabaseError(_)
        ));
    }
}
