//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    stores::{SQLiteTransactionStore, TransactionStore},
    transaction::TransactionService,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    /// The service that validates and stores transactions.
    pub transaction_service: TransactionService<S>,
}

impl<S> AppState<S>
where
    S: TransactionStore,
{
    /// Create a new [AppState] that keeps transactions in `transaction_store`.
    pub fn with_store(transaction_store: S) -> Self {
        Self {
            transaction_service: TransactionService::new(transaction_store),
        }
    }
}

impl AppState<SQLiteTransactionStore> {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self::with_store(SQLiteTransactionStore::new(connection)))
    }
}

impl<S> FromRef<AppState<S>> for TransactionService<S>
where
    S: Clone,
{
    fn from_ref(state: &AppState<S>) -> Self {
        state.transaction_service.clone()
    }
}
