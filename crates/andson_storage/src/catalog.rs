//! Name catalogs: derived name → id indices.
//!
//! A catalog is never the source of truth. It is rebuilt from entity data
//! whenever a document is loaded and otherwise edited in lockstep with the
//! arena it indexes.

use std::collections::HashMap;

use andson_foundation::{EntityKey, Error, NameScope, Result};

/// Maps unique names to ids within one scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameCatalog<K: EntityKey> {
    /// The scope this catalog indexes, used in error reports.
    scope: NameScope,
    /// Map from name to id.
    names: HashMap<String, K>,
}

impl<K: EntityKey> NameCatalog<K> {
    /// Creates a new empty catalog for `scope`.
    #[must_use]
    pub fn new(scope: NameScope) -> Self {
        Self {
            scope,
            names: HashMap::new(),
        }
    }

    /// Builds a catalog from scratch, one entry per name.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if any name occurs twice.
    pub fn rebuild<S: Into<String>>(
        scope: NameScope,
        entries: impl IntoIterator<Item = (S, K)>,
    ) -> Result<Self> {
        let mut catalog = Self::new(scope);
        for (name, id) in entries {
            catalog.insert(name, id)?;
        }
        Ok(catalog)
    }

    /// Returns the scope of this catalog.
    #[must_use]
    pub fn scope(&self) -> NameScope {
        self.scope
    }

    /// Registers a name.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name is already registered.
    pub fn insert(&mut self, name: impl Into<String>, id: K) -> Result<()> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(Error::duplicate_name(self.scope, name));
        }
        self.names.insert(name, id);
        Ok(())
    }

    /// Unregisters a name, returning the id it pointed to.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if the name is not registered. Callers only
    /// remove names they know to be live, so this signals a broken invariant.
    pub fn remove(&mut self, name: &str) -> Result<K> {
        self.names
            .remove(name)
            .ok_or_else(|| Error::name_not_found(self.scope, name))
    }

    /// Looks up the id registered under a name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<K> {
        self.names.get(name).copied()
    }

    /// Checks if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Iterates over registered names in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.keys().map(String::as_str)
    }

    /// Iterates over `(name, id)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, K)> + '_ {
        self.names.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Removes every name.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
