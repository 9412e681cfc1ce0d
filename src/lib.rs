//! # FBX Properties
//!
//! Lazy, template-chained property tables for FBX documents.
//!
//! Every FBX object carries a `Properties70` block of `P` records, each a
//! named value with a type tag (`"Lcl Translation"`, `"KString"`, ...).
//! Objects of one class share defaults declared once in the document's
//! `Definitions` section. This crate decodes those records into typed
//! values on first access, caches them, and resolves missing names
//! through the class template.
//!
//! ## Modules
//!
//! - [`util`] - Errors and math types
//! - [`dom`] - Tokens, elements and scopes handed over by the parser
//! - [`props`] - Type registry, decoder and [`PropertyTable`]
//! - [`scene`] - Objects and templates loaded from a JSON description
//!
//! ## Example
//!
//! ```ignore
//! use fbx_properties::prelude::*;
//!
//! let template = Arc::new(PropertyTable::new(&model_defaults, None));
//! let table = PropertyTable::new(&cube_properties, Some(template));
//!
//! let translation: Vec3 = table.get_or("Lcl Translation", Vec3::ZERO)?;
//! ```

pub mod util;
pub mod dom;
pub mod props;
pub mod scene;

// Re-export commonly used types
pub use util::{Error, Result};
pub use props::{PropertyTable, TypedValue, PropertyKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Color4, Error, Result, Vec3};
    pub use crate::dom::{Element, Scope, Token, TokenLocation};
    pub use crate::props::{
        decode, property_get, FromTypedValue, PropertyKind, PropertyTable, TypedValue,
    };
    pub use crate::scene::{Scene, SceneObject};
    pub use std::sync::Arc;
}
