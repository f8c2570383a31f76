//! The database: a shared store root that hands out entity handles.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::rc::Rc;

use andson_foundation::Result;
use andson_storage::{Document, NewAnime, Store};
use log::info;

use crate::config::DocumentConfig;
use crate::handle::AnimeHandle;
use crate::serialize;

/// A store shared by every handle created from it.
///
/// Cloning is cheap and yields the same database. Each operation borrows the
/// store only for its own duration, so changes made through one handle are
/// visible through all others immediately.
#[derive(Clone, Default)]
pub struct Database {
    inner: Rc<RefCell<Store>>,
}

impl Database {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: Store) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    /// Builds a database from a document.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Store::from_document`].
    pub fn from_document(doc: Document) -> Result<Self> {
        Store::from_document(doc).map(Self::from_store)
    }

    /// Opens a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a supported
    /// document.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &DocumentConfig::default())
    }

    /// Opens a database file with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a supported
    /// document. A missing file is not an error when
    /// [`DocumentConfig::create_missing`] is set.
    pub fn open_with<P: AsRef<Path>>(path: P, config: &DocumentConfig) -> Result<Self> {
        let path = path.as_ref();
        if config.create_missing && !path.exists() {
            info!("event=database_created reason=missing_file");
            return Ok(Self::new());
        }
        serialize::load_from_file(path).map(Self::from_store)
    }

    /// Saves the database to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(path, &DocumentConfig::default())
    }

    /// Saves the database to a file with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_with<P: AsRef<Path>>(&self, path: P, config: &DocumentConfig) -> Result<()> {
        self.read(|store| serialize::save_to_file(store, path, config))
    }

    /// Captures the current state as a document.
    #[must_use]
    pub fn to_document(&self) -> Document {
        self.read(Store::to_document)
    }

    /// Returns a copy of the current store.
    #[must_use]
    pub fn snapshot(&self) -> Store {
        self.read(Store::clone)
    }

    /// Creates an anime.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the title is among the aliases, or if the
    /// title or any alias is already used by another anime.
    pub fn create_anime(&self, params: NewAnime) -> Result<AnimeHandle> {
        let id = self.write(|store| store.create_anime(params))?;
        Ok(AnimeHandle::new(self.clone(), id))
    }

    /// Finds an anime by title or alias.
    #[must_use]
    pub fn get_anime(&self, name: &str) -> Option<AnimeHandle> {
        self.read(|store| store.lookup_anime(name))
            .map(|id| AnimeHandle::new(self.clone(), id))
    }

    /// Returns handles to every anime in creation order.
    #[must_use]
    pub fn animes(&self) -> Vec<AnimeHandle> {
        let ids: Vec<_> = self.read(|store| store.anime_ids().collect());
        ids.into_iter()
            .map(|id| AnimeHandle::new(self.clone(), id))
            .collect()
    }

    /// Removes every anime. Existing handles become stale.
    pub fn clear_animes(&self) {
        self.write(Store::clear_animes);
    }

    /// Returns the number of animes.
    #[must_use]
    pub fn anime_count(&self) -> usize {
        self.read(Store::anime_count)
    }

    /// Checks if two values refer to the same database.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&*self.inner.borrow())
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut *self.inner.borrow_mut())
    }

    pub(crate) fn hash_identity<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.inner), state);
    }
}

impl PartialEq for Database {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Database {}

impl Hash for Database {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_identity(state);
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Database");
        out.field("ptr", &Rc::as_ptr(&self.inner));
        if let Ok(store) = self.inner.try_borrow() {
            out.field("animes", &store.anime_count());
        }
        out.finish()
    }
}
