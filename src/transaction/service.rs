//! Maps validated requests onto a [TransactionStore] and shapes the results
//! returned to clients.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    period::validate_period_format,
    stores::TransactionStore,
    transaction::{
        Transaction, TransactionPayload, TransactionType, validate_identity,
        validate_transaction_payload,
    },
};

/// The transactions for a period along with their totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListTransactions {
    /// The number of transactions in `transactions`.
    pub count: usize,
    /// The sum of the earnings in `transactions`.
    pub earnings: f64,
    /// The sum of the expenses in `transactions`.
    pub expenses: f64,
    /// `earnings` minus `expenses`.
    pub balance: f64,
    /// The transactions, in no particular order.
    pub transactions: Vec<Transaction>,
}

impl ListTransactions {
    fn new(transactions: Vec<Transaction>) -> Self {
        let total = |kind: TransactionType| -> f64 {
            transactions
                .iter()
                .filter(|transaction| transaction.kind == kind)
                .map(|transaction| transaction.value)
                .sum()
        };
        let earnings = total(TransactionType::Earning);
        let expenses = total(TransactionType::Expense);

        Self {
            count: transactions.len(),
            earnings,
            expenses,
            balance: earnings - expenses,
            transactions,
        }
    }
}

/// The periods that have transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Periods {
    /// `YYYY-MM` periods in ascending order.
    pub periods: Vec<String>,
}

/// A transaction that was just created or replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTransaction {
    /// Always "ok".
    pub status: String,
    /// The transaction as stored.
    pub transaction: Transaction,
}

/// Confirmation that a transaction was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTransaction {
    /// Always "ok".
    pub status: String,
    /// A human readable confirmation naming the deleted transaction.
    pub message: String,
}

const STATUS_OK: &str = "ok";

/// The operations exposed to the HTTP layer.
///
/// The store is injected so that the service holds no global state.
#[derive(Debug, Clone)]
pub struct TransactionService<S> {
    store: S,
}

impl<S> TransactionService<S>
where
    S: TransactionStore,
{
    /// Create a service that keeps transactions in `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List the transactions in `period`, optionally keeping only those
    /// whose description contains `filter` (ignoring case).
    ///
    /// # Errors
    /// Returns [Error::MissingField] if `period` is absent or blank,
    /// [Error::InvalidPeriodFormat] if it is not `YYYY-MM`, or the store's
    /// error if the query fails.
    pub fn handle_list(
        &self,
        period: Option<&str>,
        filter: Option<&str>,
    ) -> Result<ListTransactions, Error> {
        let period = period
            .filter(|period| !period.trim().is_empty())
            .ok_or(Error::MissingField("period"))?;
        validate_period_format(period)?;

        let mut transactions = self.store.list_by_period(period)?;

        if let Some(filter) = filter.map(str::trim).filter(|filter| !filter.is_empty()) {
            let filter = filter.to_lowercase();
            transactions.retain(|transaction| {
                transaction.description.to_lowercase().contains(&filter)
            });
        }

        Ok(ListTransactions::new(transactions))
    }

    /// List the periods that have at least one transaction.
    ///
    /// # Errors
    /// Returns the store's error if the query fails.
    pub fn handle_list_periods(&self) -> Result<Periods, Error> {
        let periods = self.store.list_periods()?;

        Ok(Periods { periods })
    }

    /// Validate `payload` and store it as a new transaction.
    ///
    /// # Errors
    /// Returns a validation error from [validate_transaction_payload], or the
    /// store's error if the insert fails.
    pub fn handle_create(&self, payload: TransactionPayload) -> Result<SavedTransaction, Error> {
        let transaction = validate_transaction_payload(payload)?;
        let transaction = self.store.create(transaction)?;

        tracing::info!(
            "Created transaction {} in period {}",
            transaction.id,
            transaction.period
        );

        Ok(SavedTransaction {
            status: STATUS_OK.to_owned(),
            transaction,
        })
    }

    /// Replace the transaction `id` with `payload`.
    ///
    /// The store is not asked whether `id` exists, so the response echoes the
    /// requested state even if nothing was replaced.
    ///
    /// # Errors
    /// Returns an error from [validate_identity], then from
    /// [validate_transaction_payload], or the store's error if the update
    /// fails.
    pub fn handle_update(
        &self,
        id: Option<&str>,
        payload: TransactionPayload,
    ) -> Result<SavedTransaction, Error> {
        let id = validate_identity(id)?;
        let transaction = validate_transaction_payload(payload)?;
        let transaction = self.store.update(id, transaction)?;

        tracing::info!("Updated transaction {id}");

        Ok(SavedTransaction {
            status: STATUS_OK.to_owned(),
            transaction,
        })
    }

    /// Delete the transaction `id`.
    ///
    /// # Errors
    /// Returns an error from [validate_identity],
    /// [Error::TransactionNotDeleted] if no transaction was removed, or the
    /// store's error if the delete fails.
    pub fn handle_delete(&self, id: Option<&str>) -> Result<DeletedTransaction, Error> {
        let id = validate_identity(id)?;

        if !self.store.delete(id)? {
            return Err(Error::TransactionNotDeleted(id));
        }

        tracing::info!("Deleted transaction {id}");

        Ok(DeletedTransaction {
            status: STATUS_OK.to_owned(),
            message: format!("Transaction {id} was deleted"),
        })
    }
}
