//! Request-scoped unit of work for mutating handlers.
//!
//! A [`UnitOfWork`] is opened at the start of a create, update, or delete
//! and consumed by [`UnitOfWork::settle`], which commits or rolls back
//! exactly once. A unit of work that is dropped without being settled (an
//! early `?` return, a panic) rolls back when the inner transaction drops.

use std::ops::{Deref, DerefMut};

use orderdesk_core::error::CoreError;
use orderdesk_db::classify::{constraint_name, is_integrity_violation};
use orderdesk_db::DbPool;
use sqlx::{PgConnection, Postgres, Transaction};

use crate::error::{AppError, AppResult};

pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
    conflict_message: &'static str,
}

impl UnitOfWork {
    /// Begin a transaction. `conflict_message` is what the client sees if a
    /// write inside it breaks a database constraint.
    pub async fn begin(pool: &DbPool, conflict_message: &'static str) -> AppResult<Self> {
        let tx = pool.begin().await?;
        Ok(Self {
            tx,
            conflict_message,
        })
    }

    /// Finish the unit of work based on the outcome of its body.
    ///
    /// - `Ok` commits and passes the value through unchanged.
    /// - A constraint violation, whether raised by a statement or by the
    ///   commit itself, rolls back and becomes a 409 carrying the conflict
    ///   message.
    /// - Any other error rolls back and is returned as is.
    pub async fn settle<T, E>(self, outcome: Result<T, E>) -> AppResult<T>
    where
        E: Into<AppError>,
    {
        let conflict_message = self.conflict_message;

        match outcome {
            Ok(value) => match self.tx.commit().await {
                Ok(()) => Ok(value),
                // A failed commit has already discarded the transaction.
                Err(err) => Err(into_conflict(err.into(), conflict_message)),
            },
            Err(err) => {
                if let Err(rollback_err) = self.tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed");
                }
                Err(into_conflict(err.into(), conflict_message))
            }
        }
    }
}

/// Replace a storage integrity violation with a [`CoreError::Conflict`].
fn into_conflict(err: AppError, conflict_message: &'static str) -> AppError {
    match err {
        AppError::Database(db_err) if is_integrity_violation(&db_err) => {
            tracing::warn!(
                constraint = constraint_name(&db_err).unwrap_or("unknown"),
                error = %db_err,
                "Constraint violation, transaction rolled back",
            );
            AppError::Core(CoreError::Conflict(conflict_message.to_string()))
        }
        other => other,
    }
}

impl Deref for UnitOfWork {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        &self.tx
    }
}

impl DerefMut for UnitOfWork {
    fn deref_mut(&mut self) -> &mut PgConnection {
        &mut self.tx
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn non_integrity_errors_pass_through() {
        let err = into_conflict(AppError::Database(sqlx::Error::RowNotFound), "taken");
        assert_matches!(err, AppError::Database(sqlx::Error::RowNotFound));

        let err = into_conflict(AppError::not_found("User", 3), "taken");
        assert_matches!(err, AppError::Core(CoreError::NotFound { id: 3, .. }));
    }
}
