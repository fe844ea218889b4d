//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, ValidTransaction},
};

/// Handles the creation, retrieval, replacement and removal of transactions.
///
/// Each method is a single request to the underlying store. Implementers do
/// not lock records across calls, so concurrent updates to the same ID are
/// last-write-wins.
pub trait TransactionStore {
    /// Retrieve every transaction whose period equals `period`.
    ///
    /// No particular order is guaranteed. A period with no transactions
    /// yields an empty vector.
    fn list_by_period(&self, period: &str) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the distinct periods that have at least one transaction, in
    /// ascending order.
    fn list_periods(&self) -> Result<Vec<String>, Error>;

    /// Add a new transaction and return it with its assigned ID.
    fn create(&self, transaction: ValidTransaction) -> Result<Transaction, Error>;

    /// Replace every field of the transaction `id` except the ID itself.
    ///
    /// Implementers must not check that `id` exists: the returned transaction
    /// is `transaction` with `id` attached, whether or not a record matched.
    fn update(&self, id: TransactionId, transaction: ValidTransaction)
    -> Result<Transaction, Error>;

    /// Remove the transaction `id`.
    ///
    /// Returns `true` if exactly one transaction was removed and `false`
    /// otherwise. A missing transaction is not an error.
    fn delete(&self, id: TransactionId) -> Result<bool, Error>;
}
