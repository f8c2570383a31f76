//! The store root: every anime plus the store-wide name catalog.
//!
//! All access below the root goes through an id chain. Resolving a chain
//! walks anime → view → review and fails at the first missing link, so a
//! review under a destroyed anime reports the anime as removed.

use andson_foundation::{
    AnimeId, Error, NameScope, Result, ReviewKey, ViewId, ViewKey,
};
use log::debug;

use crate::anime::{Anime, NewAnime};
use crate::arena::EntityArena;
use crate::catalog::NameCatalog;
use crate::list::dedup;
use crate::review::{NewReview, Review};
use crate::view::{NewView, View};

/// Root of the entity hierarchy.
///
/// # Invariants
/// - No anime title equals one of its own aliases.
/// - Every title and alias in the store maps to exactly one anime in `names`,
///   and `names` holds nothing else.
/// - Anime ids are never reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Store {
    animes: EntityArena<AnimeId, Anime>,
    names: NameCatalog<AnimeId>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            animes: EntityArena::new(),
            names: NameCatalog::new(NameScope::Anime),
        }
    }

    /// Builds a store around restored animes, rebuilding the name catalog.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if any title or alias occurs twice.
    pub fn from_animes(animes: EntityArena<AnimeId, Anime>) -> Result<Self> {
        let names = NameCatalog::rebuild(
            NameScope::Anime,
            animes
                .iter()
                .flat_map(|(id, anime)| anime.names().map(move |name| (name, id))),
        )?;
        Ok(Self { animes, names })
    }

    // =========================================================================
    // Anime
    // =========================================================================

    /// Creates an anime, returning its id.
    ///
    /// Repeated aliases collapse silently.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the title is among the aliases, or if the
    /// title or any alias is already a title or alias of another anime.
    /// Returns `IdsExhausted` if the anime counter has no ids left.
    pub fn create_anime(&mut self, params: NewAnime) -> Result<AnimeId> {
        let aliases = dedup(params.aliases);
        if aliases.contains(&params.title) {
            return Err(Error::duplicate_name(NameScope::Anime, params.title));
        }
        for name in std::iter::once(&params.title).chain(&aliases) {
            if self.names.contains(name) {
                return Err(Error::duplicate_name(NameScope::Anime, name.as_str()));
            }
        }

        let names: Vec<String> = std::iter::once(params.title.clone())
            .chain(aliases.iter().cloned())
            .collect();
        let id = self
            .animes
            .insert_with(|id| Anime::new(id, params.title, aliases, params.tags))?;
        for name in names {
            self.names.insert(name, id)?;
        }
        debug!("event=anime_created anime={id}");
        Ok(id)
    }

    /// Looks up an anime by title or alias.
    #[must_use]
    pub fn lookup_anime(&self, name: &str) -> Option<AnimeId> {
        self.names.lookup(name)
    }

    /// Gets an anime.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist.
    pub fn anime(&self, id: AnimeId) -> Result<&Anime> {
        self.animes.get(id)
    }

    /// Gets an anime mutably.
    ///
    /// Names are not reachable through this; use the `*_anime_*` methods.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist.
    pub fn anime_mut(&mut self, id: AnimeId) -> Result<&mut Anime> {
        self.animes.get_mut(id)
    }

    /// Iterates over live anime ids in creation order.
    pub fn anime_ids(&self) -> impl Iterator<Item = AnimeId> + '_ {
        self.animes.ids()
    }

    /// Returns the anime arena.
    #[must_use]
    pub fn animes(&self) -> &EntityArena<AnimeId, Anime> {
        &self.animes
    }

    /// Returns the store-wide name catalog.
    #[must_use]
    pub fn names(&self) -> &NameCatalog<AnimeId> {
        &self.names
    }

    /// Returns the number of live animes.
    #[must_use]
    pub fn anime_count(&self) -> usize {
        self.animes.len()
    }

    /// Renames an anime. Renaming to the current title does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist and
    /// `DuplicateName` if `title` is already a title or alias, including
    /// one of this anime's own aliases.
    pub fn set_anime_title(&mut self, id: AnimeId, title: &str) -> Result<()> {
        let anime = self.animes.get_mut(id)?;
        if anime.title == title {
            return Ok(());
        }
        if self.names.contains(title) {
            return Err(Error::duplicate_name(NameScope::Anime, title));
        }
        self.names.remove(&anime.title)?;
        self.names.insert(title, id)?;
        anime.title = title.to_string();
        debug!("event=anime_renamed anime={id}");
        Ok(())
    }

    /// Replaces all aliases of an anime.
    ///
    /// Repeated aliases collapse silently. Aliases the anime already has
    /// may be declared again.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist and
    /// `DuplicateName` if the title is among the aliases or an alias belongs
    /// to another anime. Nothing is changed on error.
    pub fn set_anime_aliases<I, S>(&mut self, id: AnimeId, aliases: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let anime = self.animes.get_mut(id)?;
        let aliases = dedup(aliases);
        if aliases.contains(&anime.title) {
            return Err(Error::duplicate_name(NameScope::Anime, anime.title.as_str()));
        }
        for alias in &aliases {
            match self.names.lookup(alias) {
                Some(owner) if owner != id => {
                    return Err(Error::duplicate_name(NameScope::Anime, alias.as_str()));
                }
                _ => {}
            }
        }

        for old in &anime.aliases {
            self.names.remove(old)?;
        }
        for alias in &aliases {
            self.names.insert(alias.as_str(), id)?;
        }
        anime.aliases = aliases;
        debug!(
            "event=anime_aliases_set anime={id} count={}",
            anime.aliases.len()
        );
        Ok(())
    }

    /// Adds an alias. Adding an alias the anime already has does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist and
    /// `DuplicateName` if `alias` is this anime's title or a name of another
    /// anime.
    pub fn add_anime_alias(&mut self, id: AnimeId, alias: &str) -> Result<()> {
        let anime = self.animes.get_mut(id)?;
        if anime.has_alias(alias) {
            return Ok(());
        }
        if self.names.contains(alias) {
            return Err(Error::duplicate_name(NameScope::Anime, alias));
        }
        self.names.insert(alias, id)?;
        anime.aliases.push(alias.to_string());
        debug!("event=anime_alias_added anime={id}");
        Ok(())
    }

    /// Removes an alias. Removing an alias the anime lacks does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist.
    pub fn remove_anime_alias(&mut self, id: AnimeId, alias: &str) -> Result<()> {
        let anime = self.animes.get_mut(id)?;
        if !anime.has_alias(alias) {
            return Ok(());
        }
        self.names.remove(alias)?;
        anime.aliases.retain(|a| a != alias);
        debug!("event=anime_alias_removed anime={id}");
        Ok(())
    }

    /// Removes an anime with its title and aliases, returning it.
    ///
    /// Its views and reviews go with it; handles to them become stale.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist.
    pub fn destroy_anime(&mut self, id: AnimeId) -> Result<Anime> {
        let anime = self.animes.get(id)?;
        for name in anime.names() {
            self.names.remove(name)?;
        }
        let anime = self.animes.remove(id)?;
        debug!("event=anime_destroyed anime={id}");
        Ok(anime)
    }

    /// Removes every anime. Anime ids stay retired.
    pub fn clear_animes(&mut self) {
        self.animes.clear();
        self.names.clear();
        debug!("event=animes_cleared");
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Creates a view under an anime.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist, plus any error
    /// of [`Anime::create_view`].
    pub fn create_view(&mut self, anime: AnimeId, params: NewView) -> Result<ViewKey> {
        let view = self.animes.get_mut(anime)?.create_view(params)?;
        Ok(ViewKey::new(anime, view))
    }

    /// Resolves a view chain.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first level that does not exist.
    pub fn view(&self, key: ViewKey) -> Result<&View> {
        self.animes.get(key.anime)?.view(key.view)
    }

    /// Resolves a view chain mutably.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first level that does not exist.
    pub fn view_mut(&mut self, key: ViewKey) -> Result<&mut View> {
        self.animes.get_mut(key.anime)?.view_mut(key.view)
    }

    /// Looks up a view of an anime by title.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist.
    pub fn lookup_view(&self, anime: AnimeId, title: &str) -> Result<Option<ViewKey>> {
        let found = self.animes.get(anime)?.lookup_view(title);
        Ok(found.map(|view| ViewKey::new(anime, view)))
    }

    /// Renames a view within its anime.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first missing level and
    /// `DuplicateName` if a sibling view already uses `title`.
    pub fn rename_view(&mut self, key: ViewKey, title: &str) -> Result<()> {
        self.animes.get_mut(key.anime)?.rename_view(key.view, title)
    }

    /// Removes a view.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first missing level.
    pub fn destroy_view(&mut self, key: ViewKey) -> Result<View> {
        self.animes.get_mut(key.anime)?.destroy_view(key.view)
    }

    /// Lists the view chains of an anime in creation order.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime does not exist.
    pub fn view_keys(&self, anime: AnimeId) -> Result<Vec<ViewKey>> {
        let ids: Vec<ViewId> = self.animes.get(anime)?.views().ids().collect();
        Ok(ids.into_iter().map(|view| ViewKey::new(anime, view)).collect())
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Adds a review under a view.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first missing level, plus any error of
    /// [`View::add_review`].
    pub fn add_review(&mut self, view: ViewKey, params: NewReview) -> Result<ReviewKey> {
        let review = self.view_mut(view)?.add_review(params)?;
        Ok(view.review(review))
    }

    /// Resolves a review chain.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first level that does not exist.
    pub fn review(&self, key: ReviewKey) -> Result<&Review> {
        self.view(key.view_key())?.review(key.review)
    }

    /// Resolves a review chain mutably.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first level that does not exist.
    pub fn review_mut(&mut self, key: ReviewKey) -> Result<&mut Review> {
        self.view_mut(key.view_key())?.review_mut(key.review)
    }

    /// Looks up a review of a view by title.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first missing level.
    pub fn lookup_review(&self, view: ViewKey, title: &str) -> Result<Option<ReviewKey>> {
        let found = self.view(view)?.lookup_review(title);
        Ok(found.map(|review| view.review(review)))
    }

    /// Renames a review within its view.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first missing level and
    /// `DuplicateName` if a sibling review already uses `title`.
    pub fn rename_review(&mut self, key: ReviewKey, title: &str) -> Result<()> {
        self.view_mut(key.view_key())?.rename_review(key.review, title)
    }

    /// Removes a review.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first missing level.
    pub fn destroy_review(&mut self, key: ReviewKey) -> Result<Review> {
        self.view_mut(key.view_key())?.destroy_review(key.review)
    }

    /// Lists the review chains of a view in creation order.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first missing level.
    pub fn review_keys(&self, view: ViewKey) -> Result<Vec<ReviewKey>> {
        let found = self.view(view)?;
        Ok(found.reviews().ids().map(|review| view.review(review)).collect())
    }

    // =========================================================================
    // Consistency
    // =========================================================================

    /// Checks that every catalog equals the index derived from live entities.
    ///
    /// Used by tests and after loading; a `false` here is a bug.
    #[must_use]
    pub fn catalogs_consistent(&self) -> bool {
        let derived = Self::from_animes(self.animes.clone());
        let Ok(derived) = derived else {
            return false;
        };
        if derived.names != self.names {
            return false;
        }
        self.animes.iter().all(|(_, anime)| {
            let views_ok = NameCatalog::rebuild(
                NameScope::View(anime.id),
                anime.views.iter().map(|(id, view)| (view.title.as_str(), id)),
            )
            .is_ok_and(|catalog| catalog == anime.view_titles);
            views_ok
                && anime.views.iter().all(|(_, view)| {
                    NameCatalog::rebuild(
                        NameScope::Review(view.key),
                        view.reviews.iter().map(|(id, review)| (review.title.as_str(), id)),
                    )
                    .is_ok_and(|catalog| catalog == view.review_titles)
                })
        })
    }
}
