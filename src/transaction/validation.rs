//! Turns client payloads into [ValidTransaction]s.
//!
//! Checks run in a fixed order and stop at the first failure, so a client
//! always sees the same error for the same payload.

use crate::{
    Error,
    database_id::TransactionId,
    period::{
        DateComponent, derive_date, derive_period, integer_component, validate_day_for_month,
        validate_period_format,
    },
    transaction::{TransactionPayload, TransactionType, ValidTransaction},
};

/// Validate a transaction payload and derive its period and date keys.
///
/// If the payload has a `date` string, it is used to fill in any missing
/// `year`, `month` or `day` before validation.
///
/// # Errors
/// Returns the first of these that applies:
/// - [Error::MissingField] for a missing or blank description, value,
///   category, year, month, day or type. A value of zero counts as missing.
/// - [Error::NegativeValue] if the value is below zero.
/// - [Error::InvalidDateComponent] or [Error::InvalidPeriodFormat] if the
///   year and month do not form a `YYYY-MM` period.
/// - [Error::InvalidDay] if the day does not exist in that month.
/// - [Error::InvalidTransactionType] if the type is not `+` or `-`.
pub fn validate_transaction_payload(
    payload: TransactionPayload,
) -> Result<ValidTransaction, Error> {
    let payload = payload.with_date_fallback();

    let description = required_text("description", payload.description.as_deref())?;

    let value = match payload.value {
        Some(value) if value > 0.0 => value,
        _ => return Err(Error::MissingField("value")),
    };

    let category = required_text("category", payload.category.as_deref())?;
    let year = required_component("year", payload.year.as_ref())?;
    let month = required_component("month", payload.month.as_ref())?;
    let day = required_component("day", payload.day.as_ref())?;
    let raw_kind = required_text("type", payload.kind.as_deref())?;

    // Unreachable while negative values are reported as missing above.
    if value < 0.0 {
        return Err(Error::NegativeValue);
    }

    let period = derive_period(Some(year), Some(month))?;
    validate_period_format(&period)?;

    let year_number = integer_component("year", Some(year))?;
    let month_number = integer_component("month", Some(month))?;
    let day_number = integer_component("day", Some(day))?;
    validate_day_for_month(day_number, month_number, year_number)?;

    let kind = TransactionType::from_symbol(raw_kind.trim())
        .ok_or_else(|| Error::InvalidTransactionType(raw_kind.to_owned()))?;

    let date = derive_date(Some(year), Some(month), Some(day))?;

    Ok(ValidTransaction {
        description: description.trim().to_owned(),
        value,
        category: category.trim().to_owned(),
        year: i32::try_from(year_number).map_err(|_| Error::InvalidDateComponent("year"))?,
        month: u8::try_from(month_number).map_err(|_| Error::InvalidDateComponent("month"))?,
        day: u8::try_from(day_number).map_err(|_| Error::InvalidDateComponent("day"))?,
        period,
        date,
        kind,
    })
}

/// Check that a request names the transaction it refers to.
///
/// # Errors
/// Returns [Error::MissingIdentifier] if `id` is absent or blank, or
/// [Error::InvalidIdentifier] if it is not a transaction ID.
pub fn validate_identity(id: Option<&str>) -> Result<TransactionId, Error> {
    let id = id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(Error::MissingIdentifier)?;

    id.parse()
        .map_err(|_| Error::InvalidIdentifier(id.to_owned()))
}

fn required_text<'a>(name: &'static str, text: Option<&'a str>) -> Result<&'a str, Error> {
    text.filter(|text| !text.trim().is_empty())
        .ok_or(Error::MissingField(name))
}

fn required_component<'a>(
    name: &'static str,
    component: Option<&'a DateComponent>,
) -> Result<&'a DateComponent, Error> {
    component
        .filter(|component| !component.is_missing())
        .ok_or(Error::MissingField(name))
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        period::DateComponent,
        transaction::{TransactionPayload, TransactionType, ValidTransaction},
    };

    use super::{validate_identity, validate_transaction_payload};

    fn lunch() -> TransactionPayload {
        TransactionPayload {
            description: Some("Lunch".to_owned()),
            value: Some(50.0),
            category: Some("Food".to_owned()),
            year: Some(DateComponent::Number(2023)),
            month: Some(DateComponent::Number(5)),
            day: Some(DateComponent::Number(15)),
            kind: Some("-".to_owned()),
            date: None,
        }
    }

    #[test]
    fn valid_payload_derives_period_and_date() {
        let got = validate_transaction_payload(lunch());

        assert_eq!(
            got,
            Ok(ValidTransaction {
                description: "Lunch".to_owned(),
                value: 50.0,
                category: "Food".to_owned(),
                year: 2023,
                month: 5,
                day: 15,
                period: "2023-05".to_owned(),
                date: "2023-05-15".to_owned(),
                kind: TransactionType::Expense,
            })
        );
    }

    #[test]
    fn text_fields_are_trimmed() {
        let payload = TransactionPayload {
            description: Some("  Lunch ".to_owned()),
            category: Some(" Food".to_owned()),
            kind: Some(" + ".to_owned()),
            ..lunch()
        };

        let got = validate_transaction_payload(payload).expect("payload should be valid");

        assert_eq!(got.description, "Lunch");
        assert_eq!(got.category, "Food");
        assert_eq!(got.kind, TransactionType::Earning);
    }

    #[test]
    fn missing_description_is_reported_first() {
        let payload = TransactionPayload {
            description: None,
            value: Some(-1.0),
            kind: Some("cash".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            validate_transaction_payload(payload),
            Err(Error::MissingField("description"))
        );
    }

    #[test]
    fn blank_description_is_missing() {
        let payload = TransactionPayload {
            description: Some("   ".to_owned()),
            ..lunch()
        };

        assert_eq!(
            validate_transaction_payload(payload),
            Err(Error::MissingField("description"))
        );
    }

    #[test]
    fn zero_and_negative_values_are_missing() {
        for value in [None, Some(0.0), Some(-5.0)] {
            let payload = TransactionPayload { value, ..lunch() };

            assert_eq!(
                validate_transaction_payload(payload),
                Err(Error::MissingField("value")),
                "value {value:?}"
            );
        }
    }

    #[test]
    fn fields_are_checked_in_order() {
        let cases = [
            (
                TransactionPayload {
                    category: None,
                    year: None,
                    ..lunch()
                },
                "category",
            ),
            (
                TransactionPayload {
                    year: Some(DateComponent::Text(" ".to_owned())),
                    month: None,
                    ..lunch()
                },
                "year",
            ),
            (
                TransactionPayload {
                    month: None,
                    day: None,
                    ..lunch()
                },
                "month",
            ),
            (
                TransactionPayload {
                    day: Some(DateComponent::Number(0)),
                    kind: None,
                    ..lunch()
                },
                "day",
            ),
            (
                TransactionPayload {
                    kind: Some(String::new()),
                    ..lunch()
                },
                "type",
            ),
        ];

        for (payload, want_field) in cases {
            assert_eq!(
                validate_transaction_payload(payload),
                Err(Error::MissingField(want_field))
            );
        }
    }

    #[test]
    fn zero_value_is_reported_before_missing_category() {
        let payload = TransactionPayload {
            value: Some(0.0),
            category: None,
            ..lunch()
        };

        assert_eq!(
            validate_transaction_payload(payload),
            Err(Error::MissingField("value"))
        );
    }

    #[test]
    fn period_is_checked_before_day_and_type() {
        let payload = TransactionPayload {
            year: Some(DateComponent::Number(12023)),
            month: Some(DateComponent::Number(4)),
            day: Some(DateComponent::Number(31)),
            kind: Some("cash".to_owned()),
            ..lunch()
        };

        assert_eq!(
            validate_transaction_payload(payload),
            Err(Error::InvalidPeriodFormat("12023-04".to_owned()))
        );
    }

    #[test]
    fn day_is_checked_before_type() {
        let payload = TransactionPayload {
            month: Some(DateComponent::Number(4)),
            day: Some(DateComponent::Number(31)),
            kind: Some("cash".to_owned()),
            ..lunch()
        };

        assert_eq!(
            validate_transaction_payload(payload),
            Err(Error::InvalidDay {
                day: 31,
                month: 4,
                year: 2023
            })
        );
    }

    #[test]
    fn non_numeric_month_is_invalid() {
        let payload = TransactionPayload {
            month: Some(DateComponent::Text("May".to_owned())),
            ..lunch()
        };

        assert_eq!(
            validate_transaction_payload(payload),
            Err(Error::InvalidDateComponent("month"))
        );
    }

    #[test]
    fn five_digit_year_is_invalid_period() {
        let payload = TransactionPayload {
            year: Some(DateComponent::Number(12023)),
            ..lunch()
        };

        assert_eq!(
            validate_transaction_payload(payload),
            Err(Error::InvalidPeriodFormat("12023-05".to_owned()))
        );
    }

    #[test]
    fn day_must_exist_in_month() {
        let payload = TransactionPayload {
            month: Some(DateComponent::Number(2)),
            day: Some(DateComponent::Number(29)),
            ..lunch()
        };

        assert_eq!(
            validate_transaction_payload(payload),
            Err(Error::InvalidDay {
                day: 29,
                month: 2,
                year: 2023
            })
        );
    }

    #[test]
    fn month_thirteen_has_no_valid_day() {
        let payload = TransactionPayload {
            month: Some(DateComponent::Number(13)),
            day: Some(DateComponent::Number(1)),
            ..lunch()
        };

        assert!(matches!(
            validate_transaction_payload(payload),
            Err(Error::InvalidDay { month: 13, .. })
        ));
    }

    #[test]
    fn unknown_type_is_named_in_error() {
        let payload = TransactionPayload {
            kind: Some("cash".to_owned()),
            ..lunch()
        };

        assert_eq!(
            validate_transaction_payload(payload),
            Err(Error::InvalidTransactionType("cash".to_owned()))
        );
    }

    #[test]
    fn date_string_supplies_missing_components() {
        let payload = TransactionPayload {
            year: None,
            month: None,
            day: None,
            date: Some("2024-02-29".to_owned()),
            ..lunch()
        };

        let got = validate_transaction_payload(payload).expect("payload should be valid");

        assert_eq!(got.period, "2024-02");
        assert_eq!(got.date, "2024-02-29");
    }

    #[test]
    fn identity_is_required() {
        assert_eq!(validate_identity(None), Err(Error::MissingIdentifier));
        assert_eq!(validate_identity(Some("  ")), Err(Error::MissingIdentifier));
    }

    #[test]
    fn identity_must_be_a_transaction_id() {
        assert_eq!(validate_identity(Some("42")), Ok(42));
        assert_eq!(
            validate_identity(Some("abc")),
            Err(Error::InvalidIdentifier("abc".to_owned()))
        );
    }
}
