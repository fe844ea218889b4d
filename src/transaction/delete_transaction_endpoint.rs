//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{DeletedTransaction, TransactionService},
};

/// A route handler for deleting a transaction.
///
/// Deleting a transaction that does not exist is a bad request.
pub async fn delete_transaction_endpoint<S>(
    State(service): State<TransactionService<S>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<DeletedTransaction>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    service.handle_delete(Some(&transaction_id)).map(Json)
}
