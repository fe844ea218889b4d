//! Defines the endpoints for listing transactions and periods.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{ListTransactions, Periods, TransactionService},
};

/// The query string for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// The `YYYY-MM` period to list.
    pub period: Option<String>,
    /// Only list transactions whose description contains this text.
    pub filter: Option<String>,
}

/// A route handler for listing the transactions in a period.
pub async fn list_transactions_endpoint<S>(
    State(service): State<TransactionService<S>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListTransactions>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|rejection| Error::MalformedPayload(rejection.body_text()))?;

    service
        .handle_list(query.period.as_deref(), query.filter.as_deref())
        .map(Json)
}

/// A route handler for listing the periods that have transactions.
pub async fn list_periods_endpoint<S>(
    State(service): State<TransactionService<S>>,
) -> Result<Json<Periods>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    service.handle_list_periods().map(Json)
}
