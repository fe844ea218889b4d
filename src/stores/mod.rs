//! Contains the trait and implementations for objects that store [transactions](crate::Transaction).

mod sqlite;
mod transaction;

pub use sqlite::{SQLiteTransactionStore, create_transaction_table};
pub use transaction::TransactionStore;
