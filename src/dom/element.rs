//! Elements and scopes of a tokenized FBX document.

use super::{Token, TokenLocation};
use smallvec::SmallVec;
use std::sync::Arc;

/// Key of property record elements inside a `Properties70` scope.
pub const PROPERTY_KEY: &str = "P";

/// Token storage for one element.
///
/// Property records never carry more than eight tokens.
pub type TokenList = SmallVec<[Token; 8]>;

/// A document node: a key, its tokens and an optional child scope.
#[derive(Clone, Debug)]
pub struct Element {
    key: String,
    location: TokenLocation,
    tokens: TokenList,
    scope: Option<Scope>,
}

impl Element {
    /// Create an element without a child scope.
    pub fn new(key: impl Into<String>, location: TokenLocation, tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            key: key.into(),
            location,
            tokens: tokens.into_iter().collect(),
            scope: None,
        }
    }

    /// Create a `P` property record element.
    pub fn property(location: TokenLocation, tokens: impl IntoIterator<Item = Token>) -> Self {
        Self::new(PROPERTY_KEY, location, tokens)
    }

    /// Attach a child scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Key token contents (e.g. `"P"`, `"Properties70"`).
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Location of the key token.
    #[inline]
    pub fn location(&self) -> TokenLocation {
        self.location
    }

    /// Tokens following the key.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Child scope, if the element has a `{ ... }` block.
    #[inline]
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// True if this element is a property record.
    #[inline]
    pub fn is_property_record(&self) -> bool {
        self.key == PROPERTY_KEY
    }
}

/// Ordered collection of child elements.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    elements: Vec<(String, Arc<Element>)>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child element, keyed by its own key.
    pub fn push(&mut self, element: impl Into<Arc<Element>>) {
        let element = element.into();
        self.elements.push((element.key().to_string(), element));
    }

    /// Children in stored order.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &Arc<Element>)> {
        self.elements.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// First child with the given key.
    pub fn get(&self, key: &str) -> Option<&Arc<Element>> {
        self.elements.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// All children with the given key, in stored order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Arc<Element>> + 'a {
        self.elements.iter().filter(move |(k, _)| k == key).map(|(_, e)| e)
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Element> for Scope {
    fn from_iter<T: IntoIterator<Item = Element>>(iter: T) -> Self {
        let mut scope = Self::new();
        for element in iter {
            scope.push(element);
        }
        scope
    }
}
