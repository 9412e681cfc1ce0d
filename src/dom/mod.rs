//! Minimal document model consumed by the property system.
//!
//! Tokenizing and parsing FBX files happens elsewhere; this module only
//! holds the result:
//! - [`Token`] / [`TokenLocation`] - Text or binary tokens and their position
//! - [`Element`] / [`Scope`] - Keyed nodes and their ordered children
//! - [`json`] - Build scopes from a JSON scene description

mod token;
mod element;
pub mod json;

pub use token::{Token, TokenLocation, binary_type};
pub use element::{Element, Scope, TokenList, PROPERTY_KEY};
