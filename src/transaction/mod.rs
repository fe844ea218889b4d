//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the payload clients send to create one
//! - Validation that turns payloads into canonical transactions
//! - The service that connects validation to a transaction store
//! - Route handlers for the transaction API

mod core;
mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod edit_transaction_endpoint;
mod list_transactions_endpoint;
mod service;
mod validation;

pub use self::core::{
    Transaction, TransactionPayload, TransactionType, ValidTransaction, map_transaction_row,
};
pub use create_transaction_endpoint::create_transaction_endpoint;
pub use delete_transaction_endpoint::delete_transaction_endpoint;
pub use edit_transaction_endpoint::edit_transaction_endpoint;
pub use list_transactions_endpoint::{list_periods_endpoint, list_transactions_endpoint};
pub use service::{
    DeletedTransaction, ListTransactions, Periods, SavedTransaction, TransactionService,
};
pub use validation::{validate_identity, validate_transaction_payload};
