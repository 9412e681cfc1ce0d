//! Lazy, template-chained property tables.
//!
//! A [`PropertyTable`] indexes the `P` records of one `Properties70` scope
//! by name when it is built, but decodes a record only when it is first
//! looked up. Decoded values are cached per table. Names missing from a
//! table are resolved through its template, the shared table holding the
//! class defaults (from the document's `Definitions` section), and so on
//! up the chain.

use super::{decode, peek_name, FromTypedValue, TypedValue};
use crate::dom::Element;
use crate::util::Result;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Cached decode result. `None` records a property that decoded to no value.
type CacheEntry = Option<Arc<TypedValue>>;

/// Property table of one FBX object.
///
/// Templates are shared through `Arc` and a table cannot be modified once
/// built, so a table can only reference tables built before it and the
/// template chain is always finite.
pub struct PropertyTable {
    /// Element the table was built from (diagnostics only).
    element: Option<Arc<Element>>,
    /// Fallback table for names not present locally.
    template: Option<Arc<PropertyTable>>,
    /// Raw records by name; first registration wins.
    lazy: BTreeMap<String, Arc<Element>>,
    /// Decoded values, populated on lookup.
    cache: RwLock<HashMap<String, CacheEntry>>,
    /// Number of decodes triggered by lookups.
    decodes: AtomicUsize,
}

impl PropertyTable {
    /// Build a table from the property records in `element`'s scope.
    ///
    /// Malformed children are skipped with a warning; value tokens are not
    /// looked at until lookup.
    pub fn new(element: &Arc<Element>, template: Option<Arc<PropertyTable>>) -> Self {
        let mut lazy = BTreeMap::new();

        match element.scope() {
            Some(scope) => {
                for (key, child) in scope.elements() {
                    if !child.is_property_record() {
                        tracing::warn!(
                            location = %child.location(),
                            key,
                            "expected only P elements in property table"
                        );
                        continue;
                    }

                    let Some(name) = peek_name(child) else {
                        tracing::warn!(location = %child.location(), "could not read property name");
                        continue;
                    };

                    if lazy.contains_key(&name) {
                        tracing::warn!(
                            location = %child.location(),
                            name = %name,
                            "duplicate property name, keeping first value"
                        );
                        continue;
                    }

                    lazy.insert(name, Arc::clone(child));
                }
            }
            None => {
                tracing::warn!(location = %element.location(), "property table element has no scope");
            }
        }

        tracing::trace!(
            count = lazy.len(),
            has_template = template.is_some(),
            "built property table"
        );

        Self {
            element: Some(Arc::clone(element)),
            template,
            lazy,
            cache: RwLock::new(HashMap::new()),
            decodes: AtomicUsize::new(0),
        }
    }

    /// Build a table without local properties, resolving everything through
    /// `template`.
    pub fn empty(template: Option<Arc<PropertyTable>>) -> Self {
        Self {
            element: None,
            template,
            lazy: BTreeMap::new(),
            cache: RwLock::new(HashMap::new()),
            decodes: AtomicUsize::new(0),
        }
    }

    /// Look up a property, decoding it on first access.
    ///
    /// Falls back to the template chain when `name` is not present in this
    /// table. A name that is missing everywhere and a name whose record has
    /// an unrecognized type both yield `Ok(None)`.
    pub fn get(&self, name: &str) -> Result<Option<Arc<TypedValue>>> {
        if self.lazy.contains_key(name) {
            return self.get_local(name);
        }
        match &self.template {
            Some(template) => template.get(name),
            None => Ok(None),
        }
    }

    /// Look up a property in this table only, without template fallback.
    pub fn get_local(&self, name: &str) -> Result<Option<Arc<TypedValue>>> {
        if let Some(cached) = self.cache.read().get(name) {
            return Ok(cached.clone());
        }

        let Some(element) = self.lazy.get(name) else {
            return Ok(None);
        };

        self.decodes.fetch_add(1, Ordering::Relaxed);
        let decoded = decode(element)?.map(Arc::new);
        tracing::trace!(name, found = decoded.is_some(), "decoded property");

        // A concurrent lookup may have decoded the same name; keep the first.
        let mut cache = self.cache.write();
        Ok(cache.entry(name.to_string()).or_insert(decoded).clone())
    }

    /// Look up a property and convert it to `T`.
    ///
    /// `Ok(None)` if the property is missing or holds another type.
    pub fn get_as<T: FromTypedValue>(&self, name: &str) -> Result<Option<T>> {
        Ok(self.get(name)?.and_then(|v| T::from_typed(&v)))
    }

    /// Look up a property as `T`, using `default` when it is missing or
    /// holds another type. Decode errors are returned, not defaulted.
    pub fn get_or<T: FromTypedValue>(&self, name: &str, default: T) -> Result<T> {
        Ok(self.get_as(name)?.unwrap_or(default))
    }

    /// Decode every local property that has not been looked up yet.
    ///
    /// Templates are not consulted and the cache is left untouched. Records
    /// with an unrecognized type are left out.
    pub fn unparsed_properties(&self) -> Result<BTreeMap<String, Arc<TypedValue>>> {
        let cache = self.cache.read();
        let mut result = BTreeMap::new();

        for (name, element) in &self.lazy {
            if cache.contains_key(name) {
                continue;
            }
            if let Some(value) = decode(element)? {
                result.insert(name.clone(), Arc::new(value));
            }
        }

        Ok(result)
    }

    /// Template table, if any.
    pub fn template(&self) -> Option<&Arc<PropertyTable>> {
        self.template.as_ref()
    }

    /// Number of templates reachable from this table.
    pub fn template_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.template.as_deref();
        while let Some(table) = current {
            depth += 1;
            current = table.template.as_deref();
        }
        depth
    }

    /// Element this table was built from.
    pub fn element(&self) -> Option<&Arc<Element>> {
        self.element.as_ref()
    }

    /// True if `name` is declared in this table (not the template).
    pub fn contains_local(&self, name: &str) -> bool {
        self.lazy.contains_key(name)
    }

    /// Names declared in this table, sorted.
    pub fn local_names(&self) -> impl Iterator<Item = &str> {
        self.lazy.keys().map(String::as_str)
    }

    /// Number of properties declared in this table.
    pub fn len(&self) -> usize {
        self.lazy.len()
    }

    /// True if the table declares no properties.
    pub fn is_empty(&self) -> bool {
        self.lazy.is_empty()
    }

    /// True if `name` has been decoded and cached in this table.
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.read().contains_key(name)
    }

    /// Number of decodes performed by lookups on this table.
    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for PropertyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyTable")
            .field("properties", &self.lazy.keys().collect::<Vec<_>>())
            .field("cached", &self.cache.read().len())
            .field("template_depth", &self.template_depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Scope, Token, TokenLocation};
    use crate::util::Vec3;

    fn record(name: &str, tag: &str, values: &[&str], line: u32) -> Element {
        let mut tokens = vec![
            Token::quoted(name, line),
            Token::quoted(tag, line),
            Token::quoted("", line),
            Token::quoted("", line),
        ];
        tokens.extend(values.iter().map(|v| Token::text(*v, line)));
        Element::property(TokenLocation::Line(line), tokens)
    }

    fn props(records: Vec<Element>) -> Arc<Element> {
        let scope: Scope = records.into_iter().collect();
        Arc::new(Element::new("Properties70", TokenLocation::Line(0), []).with_scope(scope))
    }

    #[test]
    fn test_lazy_decode() {
        let table = PropertyTable::new(
            &props(vec![
                record("Visibility", "bool", &["1"], 1),
                record("Size", "double", &["2.5"], 2),
            ]),
            None,
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.decode_count(), 0);
        assert!(!table.is_cached("Size"));

        let size = table.get("Size").unwrap().unwrap();
        assert_eq!(*size, TypedValue::Float32(2.5));
        assert!(table.is_cached("Size"));
        assert!(!table.is_cached("Visibility"));
        assert_eq!(table.decode_count(), 1);
    }

    #[test]
    fn test_idempotent_lookup() {
        let table = PropertyTable::new(&props(vec![record("P", "Vector3D", &["1", "2", "3"], 1)]), None);

        let a = table.get("P").unwrap().unwrap();
        let b = table.get("P").unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(table.decode_count(), 1);
    }

    #[test]
    fn test_construction_never_decodes() {
        // Broken value tokens only fail at lookup.
        let table = PropertyTable::new(
            &props(vec![
                record("Broken", "Vector3D", &["1"], 1),
                record("Fine", "int", &["3"], 2),
            ]),
            None,
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_as::<i32>("Fine").unwrap(), Some(3));
        assert!(table.get("Broken").is_err());
        assert!(!table.is_cached("Broken"));
    }

    #[test]
    fn test_no_scope() {
        let element = Arc::new(Element::new("Properties70", TokenLocation::Line(4), []));
        let table = PropertyTable::new(&element, None);
        assert!(table.is_empty());
        assert_eq!(table.get("Anything").unwrap(), None);
    }

    #[test]
    fn test_get_local_ignores_template() {
        let template = Arc::new(PropertyTable::new(&props(vec![record("A", "int", &["1"], 1)]), None));
        let table = PropertyTable::new(&props(vec![]), Some(template));

        assert_eq!(table.get_local("A").unwrap(), None);
        assert_eq!(table.get_as::<i32>("A").unwrap(), Some(1));
        assert!(!table.contains_local("A"));
    }

    #[test]
    fn test_get_or() {
        let table = PropertyTable::new(
            &props(vec![
                record("Scale", "Lcl Scaling", &["2", "2", "2"], 1),
                record("Bad", "int", &["\"x\""], 2),
            ]),
            None,
        );

        assert_eq!(table.get_or("Scale", Vec3::ONE).unwrap(), Vec3::splat(2.0));
        assert_eq!(table.get_or("Missing", Vec3::ONE).unwrap(), Vec3::ONE);
        // wrong type
        assert_eq!(table.get_or("Scale", 7.0f32).unwrap(), 7.0);
        // a broken record is an error, not the default
        let err = table.get_or("Bad", 9).unwrap_err();
        assert!(err.is_decode_error());
        assert_eq!(err.location(), Some(TokenLocation::Line(2)));
    }

    #[test]
    fn test_template_depth() {
        let c = Arc::new(PropertyTable::empty(None));
        let b = Arc::new(PropertyTable::empty(Some(c)));
        let a = PropertyTable::empty(Some(Arc::clone(&b)));
        assert_eq!(a.template_depth(), 2);
        assert_eq!(b.template_depth(), 1);
        assert!(a.element().is_none());
    }

    #[test]
    fn test_local_names_sorted() {
        let table = PropertyTable::new(
            &props(vec![
                record("b", "int", &["1"], 1),
                record("a", "int", &["2"], 2),
            ]),
            None,
        );
        assert_eq!(table.local_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
