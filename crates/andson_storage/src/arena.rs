//! Keyed entity storage with monotonic, never-reused ids.
//!
//! An `EntityArena` owns the entities of one scope. Ids are handed out from a
//! counter that only moves forward, so an id that named a destroyed entity
//! can never resolve to a different one later.

use std::collections::BTreeMap;

use andson_foundation::{EntityKey, Error, Result};

/// Owns the entities of one scope, keyed by monotonically increasing ids.
///
/// The first id handed out is 1. `last_id` is the most recently assigned
/// id (0 when none has been assigned yet) and never decreases, not even
/// when the arena is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityArena<K: EntityKey, T> {
    /// Live entities. Ordered by id, which is also insertion order.
    entries: BTreeMap<K, T>,
    /// Last id handed out.
    last_id: u64,
}

impl<K: EntityKey, T> Default for EntityArena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntityKey, T> EntityArena<K, T> {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            last_id: 0,
        }
    }

    /// Restores an arena from persisted parts.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if an entry id is 0 or exceeds `last_id`,
    /// since such an id could be handed out again.
    pub fn from_parts(last_id: u64, entries: impl IntoIterator<Item = (K, T)>) -> Result<Self> {
        let mut arena = Self {
            entries: BTreeMap::new(),
            last_id,
        };
        for (id, value) in entries {
            if id.raw() == 0 || id.raw() > last_id {
                return Err(Error::malformed_document(format!(
                    "{} id {} outside allocated range 1..={last_id}",
                    K::LEVEL,
                    id.raw()
                )));
            }
            arena.entries.insert(id, value);
        }
        Ok(arena)
    }

    /// Inserts a value, returning its new id.
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` if the counter is already at `u64::MAX`.
    pub fn insert(&mut self, value: T) -> Result<K> {
        self.insert_with(|_| value)
    }

    /// Inserts the value built from its own id, returning that id.
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` if the counter is already at `u64::MAX`.
    /// `make` is not called in that case.
    pub fn insert_with(&mut self, make: impl FnOnce(K) -> T) -> Result<K> {
        let id = self.next_id().ok_or_else(|| Error::ids_exhausted(K::LEVEL))?;
        self.last_id = id.raw();
        self.entries.insert(id, make(id));
        Ok(id)
    }

    /// Returns the id the next insert will assign, or `None` once the
    /// counter has no room left.
    #[must_use]
    pub fn next_id(&self) -> Option<K> {
        self.last_id.checked_add(1).map(K::from_raw)
    }

    /// Returns the last id handed out, 0 if none.
    #[must_use]
    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    /// Gets an entity.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if no live entity has this id.
    pub fn get(&self, id: K) -> Result<&T> {
        self.entries.get(&id).ok_or_else(|| removed(id))
    }

    /// Gets an entity mutably.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if no live entity has this id.
    pub fn get_mut(&mut self, id: K) -> Result<&mut T> {
        self.entries.get_mut(&id).ok_or_else(|| removed(id))
    }

    /// Removes an entity, returning it. The id is retired for good.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if no live entity has this id.
    pub fn remove(&mut self, id: K) -> Result<T> {
        self.entries.remove(&id).ok_or_else(|| removed(id))
    }

    /// Checks if an entity is live.
    #[must_use]
    pub fn contains(&self, id: K) -> bool {
        self.entries.contains_key(&id)
    }

    /// Iterates over live ids in insertion order.
    ///
    /// Call again to restart; the iterator borrows the arena.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.keys().copied()
    }

    /// Iterates over live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    /// Removes every entity. The id counter is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn removed<K: EntityKey>(id: K) -> Error {
    Error::entity_removed(K::LEVEL, id.raw())
}
