//! Defines the core data models for transactions.

use rusqlite::{
    Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::{database_id::TransactionId, period::DateComponent};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money coming in, written as `+`.
    #[serde(rename = "+")]
    Earning,
    /// Money going out, written as `-`.
    #[serde(rename = "-")]
    Expense,
}

impl TransactionType {
    /// Parse the `+`/`-` symbol used on the wire and in the database.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(TransactionType::Earning),
            "-" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// The `+`/`-` symbol for this type.
    pub fn symbol(self) -> &'static str {
        match self {
            TransactionType::Earning => "+",
            TransactionType::Expense => "-",
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.symbol()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let symbol = value.as_str()?;

        TransactionType::from_symbol(symbol).ok_or_else(|| {
            FromSqlError::Other(format!("invalid transaction type \"{symbol}\"").into())
        })
    }
}

/// An expense or earning, i.e. an event where money was either spent or earned.
///
/// `period` and `date` are always derived from `year`, `month` and `day`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID the store assigned to the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub value: f64,
    /// A free-text category, e.g. "Food".
    pub category: String,
    /// The year the transaction happened.
    pub year: i32,
    /// The month the transaction happened, 1-12.
    pub month: u8,
    /// The day of the month the transaction happened.
    pub day: u8,
    /// The `YYYY-MM` key used to group transactions by month.
    pub period: String,
    /// The `YYYY-MM-DD` date of the transaction.
    pub date: String,
    /// Whether the transaction is an earning or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// A transaction that passed validation but has not been given an ID yet.
///
/// Use [crate::validate_transaction_payload] to create one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransaction {
    /// Trimmed, non-empty description.
    pub description: String,
    /// A value greater than zero.
    pub value: f64,
    /// Trimmed, non-empty category.
    pub category: String,
    /// The year, 0-9999.
    pub year: i32,
    /// The month, 1-12.
    pub month: u8,
    /// A day that exists in `month` of `year`.
    pub day: u8,
    /// The `YYYY-MM` key derived from `year` and `month`.
    pub period: String,
    /// The `YYYY-MM-DD` key derived from `year`, `month` and `day`.
    pub date: String,
    /// Earning or expense.
    pub kind: TransactionType,
}

impl ValidTransaction {
    /// Attach the store-assigned `id` to create a full [Transaction].
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            value: self.value,
            category: self.category,
            year: self.year,
            month: self.month,
            day: self.day,
            period: self.period,
            date: self.date,
            kind: self.kind,
        }
    }
}

/// The unvalidated transaction fields sent by a client.
///
/// Every field is optional so that missing fields can be reported one at a
/// time by the validator instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// Text detailing the transaction.
    pub description: Option<String>,
    /// The amount of money.
    pub value: Option<f64>,
    /// The category the transaction belongs to.
    pub category: Option<String>,
    /// The year, as a number or numeric string.
    pub year: Option<DateComponent>,
    /// The month, as a number or numeric string.
    pub month: Option<DateComponent>,
    /// The day, as a number or numeric string.
    pub day: Option<DateComponent>,
    /// Either `+` or `-`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// A `YYYY-MM-DD` date used to fill in any of `year`, `month` or `day`
    /// that were left out. Also accepted as `yearMonthDay`.
    #[serde(alias = "yearMonthDay", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl TransactionPayload {
    /// Fill missing `year`, `month` and `day` fields from `date`.
    ///
    /// Fields that were sent explicitly are kept. Nothing is filled if `date`
    /// is not a `YYYY-MM-DD` string.
    pub fn with_date_fallback(mut self) -> Self {
        let Some([year, month, day]) = self.date.as_deref().and_then(split_date) else {
            return self;
        };

        self.year.get_or_insert(DateComponent::Number(year));
        self.month.get_or_insert(DateComponent::Number(month));
        self.day.get_or_insert(DateComponent::Number(day));

        self
    }
}

fn split_date(date: &str) -> Option<[i64; 3]> {
    let mut parts = date.trim().splitn(3, '-');
    let mut next_part = |width: usize| {
        parts
            .next()
            .filter(|part| part.len() == width && part.bytes().all(|byte| byte.is_ascii_digit()))
            .and_then(|part| part.parse::<i64>().ok())
    };

    Some([next_part(4)?, next_part(2)?, next_part(2)?])
}

/// Map a database row to a Transaction.
///
/// Expects the columns in the order id, description, value, category, year,
/// month, day, period, date, type.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let value = row.get(2)?;
    let category = row.get(3)?;
    let year = row.get(4)?;
    let month = row.get(5)?;
    let day = row.get(6)?;
    let period = row.get(7)?;
    let date = row.get(8)?;
    let kind = row.get(9)?;

    Ok(Transaction {
        id,
        description,
        value,
        category,
        year,
        month,
        day,
        period,
        date,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        period::DateComponent,
        transaction::{Transaction, TransactionPayload, TransactionType},
    };

    #[test]
    fn transaction_serializes_to_record_shape() {
        let transaction = Transaction {
            id: 7,
            description: "Lunch".to_owned(),
            value: 50.0,
            category: "Food".to_owned(),
            year: 2023,
            month: 5,
            day: 15,
            period: "2023-05".to_owned(),
            date: "2023-05-15".to_owned(),
            kind: TransactionType::Expense,
        };

        let got = serde_json::to_value(&transaction).expect("could not serialize transaction");

        assert_eq!(
            got,
            json!({
                "id": 7,
                "description": "Lunch",
                "value": 50.0,
                "category": "Food",
                "year": 2023,
                "month": 5,
                "day": 15,
                "period": "2023-05",
                "date": "2023-05-15",
                "type": "-",
            })
        );
    }

    #[test]
    fn payload_accepts_numbers_and_strings_for_dates() {
        let payload: TransactionPayload = serde_json::from_value(json!({
            "description": "Salary",
            "value": 1000,
            "category": "Work",
            "year": "2024",
            "month": 2,
            "day": "29",
            "type": "+",
        }))
        .expect("could not deserialize payload");

        assert_eq!(payload.year, Some(DateComponent::Text("2024".to_owned())));
        assert_eq!(payload.month, Some(DateComponent::Number(2)));
        assert_eq!(payload.kind.as_deref(), Some("+"));
        assert_eq!(payload.value, Some(1000.0));
    }

    #[test]
    fn date_fallback_fills_missing_components() {
        let payload = TransactionPayload {
            date: Some("2023-05-15".to_owned()),
            month: Some(DateComponent::Number(6)),
            ..Default::default()
        }
        .with_date_fallback();

        assert_eq!(payload.year, Some(DateComponent::Number(2023)));
        assert_eq!(payload.month, Some(DateComponent::Number(6)));
        assert_eq!(payload.day, Some(DateComponent::Number(15)));
    }

    #[test]
    fn payload_accepts_year_month_day_as_date() {
        let payload: TransactionPayload = serde_json::from_value(json!({
            "description": "Lunch",
            "yearMonthDay": "2023-05-15",
        }))
        .expect("could not deserialize payload");

        let payload = payload.with_date_fallback();

        assert_eq!(payload.date.as_deref(), Some("2023-05-15"));
        assert_eq!(payload.day, Some(DateComponent::Number(15)));
    }

    #[test]
    fn date_fallback_ignores_malformed_dates() {
        let payload = TransactionPayload {
            date: Some("15/05/2023".to_owned()),
            ..Default::default()
        }
        .with_date_fallback();

        assert_eq!(payload.year, None);
        assert_eq!(payload.month, None);
        assert_eq!(payload.day, None);
    }

    #[test]
    fn transaction_type_symbols() {
        assert_eq!(
            TransactionType::from_symbol("+"),
            Some(TransactionType::Earning)
        );
        assert_eq!(
            TransactionType::from_symbol("-"),
            Some(TransactionType::Expense)
        );
        assert_eq!(TransactionType::from_symbol("cash"), None);
        assert_eq!(TransactionType::Expense.symbol(), "-");
    }
}
