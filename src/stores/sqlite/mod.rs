//! The SQLite backed stores.

mod transaction;

pub use transaction::{SQLiteTransactionStore, create_transaction_table};
