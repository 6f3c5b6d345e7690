//! Draft values and their conversion to wire strings.
//!
//! A draft field holds either text or a date. Immediately before submission every value is
//! turned into the string the API expects: date values in the canonical date-field set become
//! `YYYY-MM-DD`, the date part of their ISO-8601 UTC representation.

use crate::record::{FieldKind, FieldSpec};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// The value a user has entered into one field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    Date(DateTime<Utc>),
}

impl FieldValue {
    /// `true` for [`FieldValue::Empty`] and for empty text.
    ///
    /// Whitespace-only text counts as a value.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Date(_) => false,
        }
    }

    /// Convert to the string sent on the wire, or `None` when there is nothing to send.
    pub fn to_wire(&self, spec: &FieldSpec) -> Option<String> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Text(text) if text.is_empty() => None,
            FieldValue::Text(text) => Some(text.clone()),
            FieldValue::Date(date) => Some(match spec.kind {
                FieldKind::Date => iso_date(date),
                FieldKind::Text => iso_timestamp(date),
            }),
        }
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_owned())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(date: DateTime<Utc>) -> Self {
        FieldValue::Date(date)
    }
}

impl From<NaiveDate> for FieldValue {
    /// Calendar dates are taken as UTC midnight.
    fn from(date: NaiveDate) -> Self {
        FieldValue::Date(date.and_time(NaiveTime::MIN).and_utc())
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2025-01-01T00:00:00.000Z`.
pub fn iso_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Date part of [`iso_timestamp`], e.g. `2025-01-01`.
pub fn iso_date(date: &DateTime<Utc>) -> String {
    let iso = iso_timestamp(date);
    match iso.split_once('T') {
        Some((day, _)) => day.to_owned(),
        None => iso,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::field;
    use chrono::TimeZone;

    fn spec(name: &str) -> &'static FieldSpec {
        field(name).expect("catalog field")
    }

    #[test]
    fn date_field_keeps_first_ten_characters_of_iso() {
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let wire = FieldValue::Date(date).to_wire(spec("dt_notific"));
        assert_eq!(wire.as_deref(), Some("2025-01-01"));
        assert_eq!(wire.as_deref(), Some(&iso_timestamp(&date)[..10]));
    }

    #[test]
    fn date_late_in_the_day_stays_on_its_utc_day() {
        let date = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            FieldValue::Date(date).to_wire(spec("dt_obito")).as_deref(),
            Some("2024-12-31")
        );
    }

    #[test]
    fn typed_text_in_a_date_field_is_sent_verbatim() {
        let value = FieldValue::from("01/02/2025");
        assert_eq!(
            value.to_wire(spec("dt_notific")).as_deref(),
            Some("01/02/2025")
        );
    }

    #[test]
    fn date_outside_the_canonical_set_is_sent_as_full_timestamp() {
        let date = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(
            FieldValue::Date(date).to_wire(spec("dt_viral")).as_deref(),
            Some("2025-03-04T05:06:07.000Z")
        );
    }

    #[test]
    fn empty_values_produce_nothing() {
        assert!(FieldValue::Empty.to_wire(spec("febre")).is_none());
        assert!(FieldValue::from("").to_wire(spec("febre")).is_none());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(" ").is_empty());
    }

    #[test]
    fn naive_dates_are_utc_midnight() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            FieldValue::from(day),
            FieldValue::Date(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
    }
}
