//! Pre-flight check that a query returns every requested column.

use crate::core::TargetSchema;
use crate::error::MissingColumnError;

/// Checks that every schema column is among `result_variables`.
///
/// Columns are checked in schema order and the first missing one is
/// reported. Result variables not named by the schema are ignored.
pub fn validate<S: AsRef<str>>(
    result_variables: &[S],
    schema: &TargetSchema,
) -> Result<(), MissingColumnError> {
    match schema
        .names()
        .find(|name| !result_variables.iter().any(|variable| variable.as_ref() == *name))
    {
        Some(missing) => Err(MissingColumnError { column_name: missing.to_string() }),
        None => Ok(()),
    }
}
