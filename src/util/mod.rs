//! Utility types shared across the crate.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`Color4`] and math type re-exports from glam

mod error;
mod math;

pub use error::*;
pub use math::*;
