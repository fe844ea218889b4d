//! Monthly ledger is a small service for recording earnings and expenses and
//! querying them by month.
//!
//! This library provides a JSON REST API backed by SQLite. Transactions are
//! validated, keyed by the period (`YYYY-MM`) they fall in, and can be listed
//! per period, created, replaced and deleted.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod period;
mod routing;
mod stores;
mod transaction;

pub use app_state::AppState;
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_LIMIT, logging_middleware};
pub use period::{
    DateComponent, derive_date, derive_period, validate_day_for_month, validate_period_format,
};
pub use routing::build_router;
pub use stores::{SQLiteTransactionStore, TransactionStore};
pub use transaction::{
    DeletedTransaction, ListTransactions, Periods, SavedTransaction, Transaction,
    TransactionPayload, TransactionService, TransactionType, ValidTransaction,
    validate_identity, validate_transaction_payload,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the ctrl+c signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A year, month or day is missing or is not a whole number.
    #[error("the {0} must be a whole number")]
    InvalidDateComponent(&'static str),

    /// A period is not of the form `YYYY-MM`.
    #[error("invalid period \"{0}\", the period must be in the format YYYY-MM")]
    InvalidPeriodFormat(String),

    /// The day does not exist in the given month and year, e.g. 30 February.
    #[error("the day {day} is not valid for the month {month} of the year {year}")]
    InvalidDay {
        /// The requested day of the month.
        day: i64,
        /// The requested month, nominally 1-12.
        month: i64,
        /// The requested year.
        year: i64,
    },

    /// A required field was absent or blank.
    #[error("the field \"{0}\" is required")]
    MissingField(&'static str),

    /// The transaction value was below zero.
    #[error("the value must be greater than or equal to 0")]
    NegativeValue,

    /// The transaction type was neither `+` nor `-`.
    #[error("invalid transaction type ({0}), the field \"type\" must be either '+' or '-'")]
    InvalidTransactionType(String),

    /// An update or delete request did not say which transaction it refers to.
    #[error("the transaction id is required")]
    MissingIdentifier,

    /// The transaction id is not one the store could have issued.
    #[error("\"{0}\" is not a valid transaction id")]
    InvalidIdentifier(String),

    /// No transaction was removed by a delete request.
    ///
    /// Usually this means there is no transaction with the ID, e.g. it was
    /// already deleted.
    #[error("could not delete the transaction with the id {0}")]
    TransactionNotDeleted(TransactionId),

    /// The request body could not be read as a transaction.
    #[error("could not read the request body: {0}")]
    MalformedPayload(String),

    /// An unhandled/unexpected SQL error.
    ///
    /// The inner error should only be logged on the server. Clients are sent
    /// a generic message instead.
    #[error("an unexpected SQL error occurred: {0}")]
    StoreOperationFailed(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::StoreOperationFailed(value)
    }
}

impl Error {
    /// The HTTP status code the error should be reported with.
    ///
    /// Anything the client can fix is a 400, everything else is a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::StoreOperationFailed(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            tracing::warn!("Rejected request: {}", self);
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn validation_errors_are_client_errors() {
        let errors = [
            Error::MissingField("description"),
            Error::InvalidPeriodFormat("2023".to_owned()),
            Error::InvalidTransactionType("cash".to_owned()),
            Error::MissingIdentifier,
            Error::TransactionNotDeleted(1),
        ];

        for error in errors {
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST, "{error:?}");
        }
    }

    #[test]
    fn store_errors_are_server_errors() {
        let response = Error::StoreOperationFailed(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_transaction_type_names_value() {
        let message = Error::InvalidTransactionType("cash".to_owned()).to_string();

        assert!(message.contains("(cash)"), "got message {message:?}");
    }
}
