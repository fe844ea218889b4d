//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{SavedTransaction, TransactionPayload, TransactionService},
};

/// A route handler for creating a new transaction.
///
/// Responds with the stored transaction, including its new ID.
pub async fn create_transaction_endpoint<S>(
    State(service): State<TransactionService<S>>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Json<SavedTransaction>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let Json(payload) =
        payload.map_err(|rejection| Error::MalformedPayload(rejection.body_text()))?;

    service.handle_create(payload).map(Json)
}
