//! Re-validating references to animes, views, and reviews.
//!
//! A handle is a database plus an id chain. It never holds a borrow of the
//! store between calls; every operation resolves the chain again from the
//! root, so a handle whose entity (or any ancestor) has been destroyed fails
//! with `EntityRemoved` naming the first level that no longer exists.
//!
//! Two handles are equal when they point into the same database with the
//! same id chain, whether or not the entity is still alive.

use std::hash::{Hash, Hasher};

use andson_foundation::{AnimeId, Result, ReviewKey, ViewKey};
use andson_storage::{Anime, NewReview, NewView, Review, View};

use crate::database::Database;

// =============================================================================
// AnimeHandle
// =============================================================================

/// Handle to an anime.
#[derive(Clone, Debug)]
pub struct AnimeHandle {
    db: Database,
    id: AnimeId,
}

impl AnimeHandle {
    pub(crate) fn new(db: Database, id: AnimeId) -> Self {
        Self { db, id }
    }

    /// Returns the anime id.
    #[must_use]
    pub fn id(&self) -> AnimeId {
        self.id
    }

    /// Returns the database this handle points into.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checks if the anime still exists.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.get(|_| ()).is_ok()
    }

    fn get<R>(&self, f: impl FnOnce(&Anime) -> R) -> Result<R> {
        self.db.read(|store| store.anime(self.id).map(f))
    }

    fn update(&self, f: impl FnOnce(&mut Anime)) -> Result<()> {
        self.db.write(|store| store.anime_mut(self.id).map(f))
    }

    /// Returns the title.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn title(&self) -> Result<String> {
        self.get(|anime| anime.title().to_string())
    }

    /// Renames the anime. Renaming to the current title does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed and
    /// `DuplicateName` if `title` is already a title or alias, this anime's
    /// own aliases included.
    pub fn set_title(&self, title: &str) -> Result<()> {
        self.db.write(|store| store.set_anime_title(self.id, title))
    }

    /// Returns the aliases.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn aliases(&self) -> Result<Vec<String>> {
        self.get(|anime| anime.aliases().to_vec())
    }

    /// Replaces the aliases.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed and
    /// `DuplicateName` if an alias is the title or belongs to another anime.
    pub fn set_aliases<I, S>(&self, aliases: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // Collected first: the iterator may read through other handles.
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        self.db.write(|store| store.set_anime_aliases(self.id, aliases))
    }

    /// Adds an alias. Adding an existing alias does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed and
    /// `DuplicateName` if the alias is the title or belongs to another anime.
    pub fn add_alias(&self, alias: &str) -> Result<()> {
        self.db.write(|store| store.add_anime_alias(self.id, alias))
    }

    /// Removes an alias. Removing an alias the anime lacks does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn remove_alias(&self, alias: &str) -> Result<()> {
        self.db.write(|store| store.remove_anime_alias(self.id, alias))
    }

    /// Returns the tags.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn tags(&self) -> Result<Vec<String>> {
        self.get(|anime| anime.tags().to_vec())
    }

    /// Replaces the tags.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn set_tags<I, S>(&self, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.update(|anime| anime.set_tags(tags))
    }

    /// Adds a tag unless present.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn add_tag(&self, tag: &str) -> Result<()> {
        self.update(|anime| anime.add_tag(tag))
    }

    /// Removes a tag if present.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn remove_tag(&self, tag: &str) -> Result<()> {
        self.update(|anime| anime.remove_tag(tag))
    }

    /// Creates a view of this anime.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed,
    /// `InvalidFormat` for a malformed month or date, and `DuplicateName` if
    /// another view of this anime has the same title.
    pub fn create_view(&self, params: NewView) -> Result<ViewHandle> {
        let key = self.db.write(|store| store.create_view(self.id, params))?;
        Ok(ViewHandle::new(self.db.clone(), key))
    }

    /// Finds a view of this anime by title.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn get_view(&self, title: &str) -> Result<Option<ViewHandle>> {
        let key = self.db.read(|store| store.lookup_view(self.id, title))?;
        Ok(key.map(|key| ViewHandle::new(self.db.clone(), key)))
    }

    /// Returns handles to every view in creation order.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn views(&self) -> Result<Vec<ViewHandle>> {
        let keys = self.db.read(|store| store.view_keys(self.id))?;
        Ok(keys
            .into_iter()
            .map(|key| ViewHandle::new(self.db.clone(), key))
            .collect())
    }

    /// Removes every view of this anime.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has been destroyed.
    pub fn clear_views(&self) -> Result<()> {
        self.update(Anime::clear_views)
    }

    /// Removes the anime with its views and reviews.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the anime has already been destroyed.
    pub fn destroy(&self) -> Result<()> {
        self.db.write(|store| store.destroy_anime(self.id)).map(drop)
    }
}

impl PartialEq for AnimeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.db.ptr_eq(&other.db)
    }
}

impl Eq for AnimeHandle {}

impl Hash for AnimeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.db.hash_identity(state);
        self.id.hash(state);
    }
}

// =============================================================================
// ViewHandle
// =============================================================================

/// Handle to a view.
#[derive(Clone, Debug)]
pub struct ViewHandle {
    db: Database,
    key: ViewKey,
}

impl ViewHandle {
    pub(crate) fn new(db: Database, key: ViewKey) -> Self {
        Self { db, key }
    }

    /// Returns the id chain.
    #[must_use]
    pub fn key(&self) -> ViewKey {
        self.key
    }

    /// Returns a handle to the owning anime.
    #[must_use]
    pub fn anime(&self) -> AnimeHandle {
        AnimeHandle::new(self.db.clone(), self.key.anime)
    }

    /// Checks if the view and its anime still exist.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.get(|_| ()).is_ok()
    }

    fn get<R>(&self, f: impl FnOnce(&View) -> R) -> Result<R> {
        self.db.read(|store| store.view(self.key).map(f))
    }

    fn update<R>(&self, f: impl FnOnce(&mut View) -> Result<R>) -> Result<R> {
        self.db.write(|store| f(store.view_mut(self.key)?))
    }

    /// Returns the title.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn title(&self) -> Result<String> {
        self.get(|view| view.title().to_string())
    }

    /// Renames the view. Renaming to the current title does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level and
    /// `DuplicateName` if a sibling view already uses `title`.
    pub fn set_title(&self, title: &str) -> Result<()> {
        self.db.write(|store| store.rename_view(self.key, title))
    }

    /// Returns the first-viewing flag.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn is_new(&self) -> Result<Option<bool>> {
        self.get(View::is_new)
    }

    /// Sets the first-viewing flag.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn set_is_new(&self, is_new: Option<bool>) -> Result<()> {
        self.update(|view| {
            view.set_is_new(is_new);
            Ok(())
        })
    }

    /// Returns the view count.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn times_view(&self) -> Result<Option<i64>> {
        self.get(View::times_view)
    }

    /// Sets the view count.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn set_times_view(&self, times: Option<i64>) -> Result<()> {
        self.update(|view| {
            view.set_times_view(times);
            Ok(())
        })
    }

    /// Returns the source.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn source(&self) -> Result<Option<String>> {
        self.get(|view| view.source().map(str::to_string))
    }

    /// Sets the source.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn set_source(&self, source: Option<String>) -> Result<()> {
        self.update(|view| {
            view.set_source(source);
            Ok(())
        })
    }

    /// Returns the episode range.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn episode_range(&self) -> Result<Option<Vec<String>>> {
        self.get(|view| view.episode_range().map(<[String]>::to_vec))
    }

    /// Replaces the episode range.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn set_episode_range(&self, episodes: Option<Vec<String>>) -> Result<()> {
        self.update(|view| {
            view.set_episode_range(episodes);
            Ok(())
        })
    }

    /// Appends an episode unless listed.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn add_episode(&self, episode: &str) -> Result<()> {
        self.update(|view| {
            view.add_episode(episode);
            Ok(())
        })
    }

    /// Removes an episode if listed.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn remove_episode(&self, episode: &str) -> Result<()> {
        self.update(|view| {
            view.remove_episode(episode);
            Ok(())
        })
    }

    /// Returns the duration months.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn duration(&self) -> Result<Option<Vec<String>>> {
        self.get(|view| view.duration().map(<[String]>::to_vec))
    }

    /// Replaces the duration months.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level and
    /// `InvalidFormat` if any entry is not a `YYYY-MM` month.
    pub fn set_duration(&self, months: Option<Vec<String>>) -> Result<()> {
        self.update(|view| view.set_duration(months))
    }

    /// Appends a month unless listed.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level and
    /// `InvalidFormat` if `month` is not a `YYYY-MM` month.
    pub fn add_duration_month(&self, month: &str) -> Result<()> {
        self.update(|view| view.add_duration_month(month))
    }

    /// Removes a month if listed.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn remove_duration_month(&self, month: &str) -> Result<()> {
        self.update(|view| {
            view.remove_duration_month(month);
            Ok(())
        })
    }

    /// Returns the last episode date.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn last_episode_date(&self) -> Result<Option<String>> {
        self.get(|view| view.last_episode_date().map(str::to_string))
    }

    /// Sets the last episode date.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level and
    /// `InvalidFormat` if `date` is not a `YYYY-MM-DD` date.
    pub fn set_last_episode_date(&self, date: Option<String>) -> Result<()> {
        self.update(|view| view.set_last_episode_date(date))
    }

    /// Adds a review to this view.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level, `OutOfRange`
    /// for a ranking outside `[0, 10]`, and `DuplicateName` if another review
    /// of this view has the same title.
    pub fn add_review(&self, params: NewReview) -> Result<ReviewHandle> {
        let key = self.db.write(|store| store.add_review(self.key, params))?;
        Ok(ReviewHandle::new(self.db.clone(), key))
    }

    /// Finds a review of this view by title.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn get_review(&self, title: &str) -> Result<Option<ReviewHandle>> {
        let key = self.db.read(|store| store.lookup_review(self.key, title))?;
        Ok(key.map(|key| ReviewHandle::new(self.db.clone(), key)))
    }

    /// Returns handles to every review in creation order.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn reviews(&self) -> Result<Vec<ReviewHandle>> {
        let keys = self.db.read(|store| store.review_keys(self.key))?;
        Ok(keys
            .into_iter()
            .map(|key| ReviewHandle::new(self.db.clone(), key))
            .collect())
    }

    /// Removes every review of this view.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn clear_reviews(&self) -> Result<()> {
        self.update(|view| {
            view.clear_reviews();
            Ok(())
        })
    }

    /// Removes the view with its reviews.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn destroy(&self) -> Result<()> {
        self.db.write(|store| store.destroy_view(self.key)).map(drop)
    }
}

impl PartialEq for ViewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.db.ptr_eq(&other.db)
    }
}

impl Eq for ViewHandle {}

impl Hash for ViewHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.db.hash_identity(state);
        self.key.hash(state);
    }
}

// =============================================================================
// ReviewHandle
// =============================================================================

/// Handle to a review.
#[derive(Clone, Debug)]
pub struct ReviewHandle {
    db: Database,
    key: ReviewKey,
}

impl ReviewHandle {
    pub(crate) fn new(db: Database, key: ReviewKey) -> Self {
        Self { db, key }
    }

    /// Returns the id chain.
    #[must_use]
    pub fn key(&self) -> ReviewKey {
        self.key
    }

    /// Returns a handle to the owning view.
    #[must_use]
    pub fn view(&self) -> ViewHandle {
        ViewHandle::new(self.db.clone(), self.key.view_key())
    }

    /// Checks if the review and all its ancestors still exist.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.get(|_| ()).is_ok()
    }

    fn get<R>(&self, f: impl FnOnce(&Review) -> R) -> Result<R> {
        self.db.read(|store| store.review(self.key).map(f))
    }

    fn update<R>(&self, f: impl FnOnce(&mut Review) -> Result<R>) -> Result<R> {
        self.db.write(|store| f(store.review_mut(self.key)?))
    }

    /// Returns the title.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn title(&self) -> Result<String> {
        self.get(|review| review.title().to_string())
    }

    /// Renames the review. Renaming to the current title does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level and
    /// `DuplicateName` if a sibling review already uses `title`.
    pub fn set_title(&self, title: &str) -> Result<()> {
        self.db.write(|store| store.rename_review(self.key, title))
    }

    /// Returns the reviewed item.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn item(&self) -> Result<Option<String>> {
        self.get(|review| review.item().map(str::to_string))
    }

    /// Sets the reviewed item.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn set_item(&self, item: Option<String>) -> Result<()> {
        self.update(|review| {
            review.set_item(item);
            Ok(())
        })
    }

    /// Returns the episode range.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn episode_range(&self) -> Result<Option<Vec<String>>> {
        self.get(|review| review.episode_range().map(<[String]>::to_vec))
    }

    /// Replaces the episode range.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn set_episode_range(&self, episodes: Option<Vec<String>>) -> Result<()> {
        self.update(|review| {
            review.set_episode_range(episodes);
            Ok(())
        })
    }

    /// Appends an episode unless listed.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn add_episode(&self, episode: &str) -> Result<()> {
        self.update(|review| {
            review.add_episode(episode);
            Ok(())
        })
    }

    /// Removes an episode if listed.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn remove_episode(&self, episode: &str) -> Result<()> {
        self.update(|review| {
            review.remove_episode(episode);
            Ok(())
        })
    }

    /// Returns the ranking.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn ranking(&self) -> Result<Option<i64>> {
        self.get(Review::ranking)
    }

    /// Sets the ranking.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level and
    /// `OutOfRange` for a ranking outside `[0, 10]`.
    pub fn set_ranking(&self, ranking: Option<i64>) -> Result<()> {
        self.update(|review| review.set_ranking(ranking))
    }

    /// Returns the comment.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn comment(&self) -> Result<Option<String>> {
        self.get(|review| review.comment().map(str::to_string))
    }

    /// Sets the comment.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn set_comment(&self, comment: Option<String>) -> Result<()> {
        self.update(|review| {
            review.set_comment(comment);
            Ok(())
        })
    }

    /// Removes the review.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` for the first destroyed level.
    pub fn destroy(&self) -> Result<()> {
        self.db.write(|store| store.destroy_review(self.key)).map(drop)
    }
}

impl PartialEq for ReviewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.db.ptr_eq(&other.db)
    }
}

impl Eq for ReviewHandle {}

impl Hash for ReviewHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.db.hash_identity(state);
        self.key.hash(state);
    }
}
