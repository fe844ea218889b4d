//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{Transaction, ValidTransaction, map_transaction_row},
};

/// Stores transactions in the `"transaction"` table of a SQLite database.
///
/// The table must exist before the store is used, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Retrieve the transactions for `period`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::StoreOperationFailed] if there is some SQL error.
    fn list_by_period(&self, period: &str) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        let mut statement = connection.prepare(
            "SELECT id, description, value, category, year, month, day, period, date, type
             FROM \"transaction\"
             WHERE period = :period",
        )?;

        let transactions = statement
            .query_map(&[(":period", &period)], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Retrieve the periods that have transactions.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::StoreOperationFailed] if there is some SQL error.
    fn list_periods(&self) -> Result<Vec<String>, Error> {
        let connection = self.lock()?;

        let mut statement =
            connection.prepare("SELECT DISTINCT period FROM \"transaction\" ORDER BY period")?;

        let periods = statement
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(periods)
    }

    /// Insert a transaction and return it with the ID SQLite assigned.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::StoreOperationFailed] if there is some SQL error.
    fn create(&self, transaction: ValidTransaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (description, value, category, year, month, day, period, date, type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 RETURNING id, description, value, category, year, month, day, period, date, type",
            )?
            .query_row(
                (
                    transaction.description,
                    transaction.value,
                    transaction.category,
                    transaction.year,
                    transaction.month,
                    transaction.day,
                    transaction.period,
                    transaction.date,
                    transaction.kind,
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Overwrite the transaction `id`.
    ///
    /// The number of rows affected is logged but otherwise ignored.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::StoreOperationFailed] if there is some SQL error.
    fn update(
        &self,
        id: TransactionId,
        transaction: ValidTransaction,
    ) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE \"transaction\"
            SET \
                description = ?1, \
                value = ?2, \
                category = ?3, \
                year = ?4, \
                month = ?5, \
                day = ?6, \
                period = ?7, \
                date = ?8, \
                type = ?9 \
            WHERE id = ?10;",
            (
                &transaction.description,
                transaction.value,
                &transaction.category,
                transaction.year,
                transaction.month,
                transaction.day,
                &transaction.period,
                &transaction.date,
                transaction.kind,
                id,
            ),
        )?;

        tracing::debug!("Updated transaction {id}, {rows_affected} row(s) affected");

        Ok(transaction.with_id(id))
    }

    /// Delete the transaction `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::StoreOperationFailed] if there is some SQL error.
    fn delete(&self, id: TransactionId) -> Result<bool, Error> {
        let connection = self.lock()?;

        let rows_affected =
            connection.execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        Ok(rows_affected == 1)
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                value REAL NOT NULL,
                category TEXT NOT NULL,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                day INTEGER NOT NULL,
                period TEXT NOT NULL,
                date TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('+', '-'))
                )",
        (),
    )?;

    // Transactions are always queried by period.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_period ON \"transaction\"(period);",
        (),
    )?;

    Ok(())
}
