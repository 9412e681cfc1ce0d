//! Typed property accessors with defaults.
//!
//! These mirror how importer code reads object settings: a missing or
//! mistyped property falls back to a default. A record that fails to
//! decode is an error.

use super::{FromTypedValue, PropertyTable};
use crate::util::Result;

/// Read `name` from `table` (with template fallback) as `T`, or `default`.
pub fn property_get<T: FromTypedValue>(table: &PropertyTable, name: &str, default: T) -> Result<T> {
    table.get_or(name, default)
}

/// Read `name` from `table` as `T`, reporting whether it was found.
///
/// With `use_template` unset only the table's own properties are
/// consulted.
pub fn property_try_get<T: FromTypedValue>(
    table: &PropertyTable,
    name: &str,
    use_template: bool,
) -> Result<Option<T>> {
    let value = if use_template {
        table.get(name)?
    } else {
        table.get_local(name)?
    };
    Ok(value.and_then(|v| T::from_typed(&v)))
}
