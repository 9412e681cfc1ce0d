//! FBX dynamic properties.
//!
//! This module provides:
//! - [`PropertyKind`] / [`TYPE_TAGS`] - Type tag registry
//! - [`TypedValue`] - Decoded, immutable property values
//! - [`decode`] - Per-record decoding with arity checks
//! - [`PropertyTable`] - Lazy, memoizing lookup with template fallback
//! - [`property_get`] - Typed access with defaults

mod kind;
mod value;
mod decode;
mod table;
mod access;

pub use kind::{PropertyKind, TYPE_TAGS, FIRST_VALUE_TOKEN};
pub use value::{TypedValue, FromTypedValue};
pub use decode::{decode, peek_name};
pub use table::PropertyTable;
pub use access::{property_get, property_try_get};
