//! Type-directed coercion of RDF terms into column values.
//!
//! Each [`ColumnType`] has exactly one entry in [`RULES`]; the entry's
//! function returns `None` when the term cannot be represented in that type,
//! and the [`Coercer`] turns that into a [`CoercionError`] carrying the raw
//! text of the term.
//!
//! Timestamps without an explicit offset are read in the coercer's default
//! zone, which is passed in rather than taken from the process environment.

use crate::core::{ColumnDescriptor, ColumnType, OutputRecord, RdfTerm, RowBinding, TargetSchema, Value};
use crate::error::CoercionError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use oxigraph::model::vocab::xsd;
use oxigraph::model::NamedNodeRef;

type CoerceFn = fn(&RdfTerm, &Coercer) -> Option<Value>;

/// Coercion table, indexed by `ColumnType` discriminant.
pub const RULES: [(ColumnType, CoerceFn); 4] = [
    (ColumnType::Integer, coerce_integer),
    (ColumnType::Float, coerce_float),
    (ColumnType::Timestamp, coerce_timestamp),
    (ColumnType::String, coerce_string),
];

/// Datatypes whose value space is unbounded integers.
const BIG_INTEGER_TYPES: [NamedNodeRef<'static>; 6] = [
    xsd::INTEGER,
    xsd::NON_POSITIVE_INTEGER,
    xsd::NEGATIVE_INTEGER,
    xsd::NON_NEGATIVE_INTEGER,
    xsd::POSITIVE_INTEGER,
    xsd::UNSIGNED_LONG,
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Byte length of a complete `YYYY-MM-DD` date.
const DATE_LEN: usize = 10;

/// Converts terms of one row into an [`OutputRecord`].
#[derive(Debug, Clone, Copy)]
pub struct Coercer {
    default_zone: FixedOffset,
}

impl Default for Coercer {
    fn default() -> Self {
        Self::utc()
    }
}

impl Coercer {
    /// Coercer reading offset-less timestamps as UTC.
    pub fn utc() -> Self {
        Self { default_zone: utc_offset() }
    }

    pub fn with_default_zone(default_zone: FixedOffset) -> Self {
        Self { default_zone }
    }

    /// Coerces a single term to `column_type`.
    ///
    /// An absent term (unbound variable) becomes [`Value::Null`].
    pub fn coerce(
        &self,
        column: &ColumnDescriptor,
        term: Option<&RdfTerm>,
    ) -> Result<Value, CoercionError> {
        let Some(term) = term else {
            return Ok(Value::Null);
        };
        let (_, rule) = RULES[column.column_type() as usize];
        rule(term, self).ok_or_else(|| CoercionError {
            column_name: column.name().to_string(),
            raw_value: term.text().to_string(),
            target_type: column.column_type(),
        })
    }

    /// Coerces every schema column of `row`, in schema order.
    ///
    /// Stops at the first column that fails; no partial record is returned.
    pub fn coerce_row(
        &self,
        schema: &TargetSchema,
        row: &RowBinding,
    ) -> Result<OutputRecord, CoercionError> {
        let values = schema
            .columns()
            .iter()
            .map(|column| self.coerce(column, row.get(column.name())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OutputRecord::new(values))
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn coerce_integer(term: &RdfTerm, _: &Coercer) -> Option<Value> {
    if let Some(literal) = term.as_literal() {
        if BIG_INTEGER_TYPES.iter().any(|datatype| datatype.as_str() == literal.datatype) {
            return narrow_integer(literal.lexical).map(Value::Integer);
        }
    }
    term.text().parse::<i64>().ok().map(Value::Integer)
}

fn coerce_float(term: &RdfTerm, _: &Coercer) -> Option<Value> {
    if let Some(literal) = term.as_literal() {
        if literal.datatype == xsd::DECIMAL.as_str() {
            return literal.lexical.trim().parse::<f64>().ok().map(Value::Float);
        }
    }
    term.text().trim().parse::<f64>().ok().map(Value::Float)
}

fn coerce_timestamp(term: &RdfTerm, coercer: &Coercer) -> Option<Value> {
    let text = string_form(term);
    parse_timestamp_millis(text, &coercer.default_zone).map(Value::Timestamp)
}

fn coerce_string(term: &RdfTerm, _: &Coercer) -> Option<Value> {
    Some(Value::String(string_form(term).to_string()))
}

fn string_form(term: &RdfTerm) -> &str {
    match term.as_literal() {
        Some(literal) => literal.lexical,
        None => term.text(),
    }
}

/// Reads an `xsd:integer` lexical form of any length and keeps its low 64
/// bits in two's complement.
pub fn narrow_integer(lexical: &str) -> Option<i64> {
    let lexical = lexical.trim();
    let (negative, digits) = match lexical.as_bytes().first()? {
        b'-' => (true, &lexical[1..]),
        b'+' => (false, &lexical[1..]),
        _ => (false, lexical),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(10).wrapping_add(u64::from(b - b'0')));
    #[allow(clippy::cast_possible_wrap)]
    let value = magnitude as i64;
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Parses an ISO-8601 date or date-time into epoch milliseconds.
///
/// Reduced forms (`YYYY`, `YYYY-MM`, `YYYY-MM-DDThh`) start at the beginning
/// of their period, and a comma may stand for the decimal point. An explicit
/// offset (`Z`, `+09`, `+0900`, `+09:00`) wins; otherwise the text is
/// interpreted in `default_zone`.
pub fn parse_timestamp_millis<Tz: TimeZone>(text: &str, default_zone: &Tz) -> Option<i64> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }

    let (local, offset) = split_offset(text);
    let naive = parse_naive(local)?;
    match offset {
        Some(offset) => {
            parse_offset(offset)?.from_local_datetime(&naive).single().map(|dt| dt.timestamp_millis())
        }
        None => default_zone.from_local_datetime(&naive).earliest().map(|dt| dt.timestamp_millis()),
    }
}

/// Splits a trailing zone designator off `text`.
///
/// A sign only counts as an offset after the time separator or after a
/// complete date, so the dashes of the date itself are never taken.
fn split_offset(text: &str) -> (&str, Option<&str>) {
    if let Some(local) = text.strip_suffix('Z') {
        return (local, Some("Z"));
    }
    let from = match text.find('T') {
        Some(separator) => separator,
        None if text.len() > DATE_LEN && text.is_char_boundary(DATE_LEN) => DATE_LEN,
        None => return (text, None),
    };
    match text[from..].rfind(['+', '-']) {
        Some(sign) => {
            let (local, offset) = text.split_at(from + sign);
            (local, Some(offset))
        }
        None => (text, None),
    }
}

/// Reads `Z`, `±hh`, `±hhmm` or `±hh:mm`.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text == "Z" {
        return Some(utc_offset());
    }
    let (sign, digits) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let (hours, minutes) = match digits.len() {
        2 => (digits, "00"),
        4 => digits.split_at(2),
        5 if digits.as_bytes()[2] == b':' => (&digits[..2], &digits[3..]),
        _ => return None,
    };
    let hours = two_digits(hours)?;
    let minutes = two_digits(minutes)?;
    if minutes >= 60 {
        return None;
    }
    let seconds = i32::try_from(hours * 3600 + minutes * 60).ok()?;
    FixedOffset::east_opt(sign * seconds)
}

fn two_digits(text: &str) -> Option<u32> {
    if text.len() == 2 && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Reads the offset-less part of a timestamp.
fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    let text = text.replace(',', ".");
    match text.split_once('T') {
        Some((date, time)) => {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            let time = TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(time, format).ok())
                .or_else(|| two_digits(time).and_then(|hour| NaiveTime::from_hms_opt(hour, 0, 0)))?;
            Some(date.and_time(time))
        }
        None => parse_reduced_date(&text).and_then(|date| date.and_hms_opt(0, 0, 0)),
    }
}

/// Reads `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
fn parse_reduced_date(text: &str) -> Option<NaiveDate> {
    match text.matches('-').count() {
        2 => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
        1 => NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d").ok(),
        0 if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1)
        }
        _ => None,
    }
}
