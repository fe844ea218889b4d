//! Defines the endpoint for replacing a transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{SavedTransaction, TransactionPayload, TransactionService, validate_identity},
};

/// A route handler for replacing every field of a transaction except its ID.
///
/// The transaction ID is checked before the body. The transaction is not
/// checked for existence, the response echoes the requested state.
pub async fn edit_transaction_endpoint<S>(
    State(service): State<TransactionService<S>>,
    Path(transaction_id): Path<String>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Json<SavedTransaction>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    validate_identity(Some(&transaction_id))?;

    let Json(payload) =
        payload.map_err(|rejection| Error::MalformedPayload(rejection.body_text()))?;

    service
        .handle_update(Some(&transaction_id), payload)
        .map(Json)
}
