//! View records: one viewing of an anime, owning its reviews.

use andson_foundation::validate::{check_date, check_month};
use andson_foundation::{Error, NameScope, Result, ReviewId, ReviewKey, ViewKey};
use log::debug;

use crate::arena::EntityArena;
use crate::catalog::NameCatalog;
use crate::list::{push_unique, remove_item};
use crate::review::{NewReview, Review};

/// Creation parameters for a view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewView {
    /// Title, unique among the views of one anime.
    pub title: String,
    /// Whether this was a first-time viewing.
    pub is_new: Option<bool>,
    /// How many times it has been watched.
    pub times_view: Option<i64>,
    /// Where it was watched.
    pub source: Option<String>,
    /// Episodes covered.
    pub episode_range: Option<Vec<String>>,
    /// Months (`YYYY-MM`) during which the viewing happened.
    pub duration: Option<Vec<String>>,
    /// Date (`YYYY-MM-DD`) of the last watched episode.
    pub last_episode_date: Option<String>,
}

impl NewView {
    /// Starts a view with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the first-viewing flag.
    #[must_use]
    pub fn with_is_new(mut self, is_new: bool) -> Self {
        self.is_new = Some(is_new);
        self
    }

    /// Builder method to set the view count.
    #[must_use]
    pub fn with_times_view(mut self, times: i64) -> Self {
        self.times_view = Some(times);
        self
    }

    /// Builder method to set the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Builder method to set the episode range.
    #[must_use]
    pub fn with_episode_range<I, S>(mut self, episodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.episode_range = Some(episodes.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method to set the duration months.
    #[must_use]
    pub fn with_duration<I, S>(mut self, months: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.duration = Some(months.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method to set the last episode date.
    #[must_use]
    pub fn with_last_episode_date(mut self, date: impl Into<String>) -> Self {
        self.last_episode_date = Some(date.into());
        self
    }

    /// Checks field formats; title uniqueness is up to the owning anime.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if a duration entry is not a month string or
    /// the last episode date is not a date string.
    pub fn validate(&self) -> Result<()> {
        check_duration(self.duration.as_deref())?;
        if let Some(date) = &self.last_episode_date {
            check_date("last_episode_date", date)?;
        }
        Ok(())
    }
}

fn check_duration(months: Option<&[String]>) -> Result<()> {
    for month in months.unwrap_or_default() {
        check_month("duration", month)?;
    }
    Ok(())
}

/// A viewing record owned by an anime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    pub(crate) key: ViewKey,
    pub(crate) title: String,
    pub(crate) is_new: Option<bool>,
    pub(crate) times_view: Option<i64>,
    pub(crate) source: Option<String>,
    pub(crate) episode_range: Option<Vec<String>>,
    pub(crate) duration: Option<Vec<String>>,
    pub(crate) last_episode_date: Option<String>,
    pub(crate) reviews: EntityArena<ReviewId, Review>,
    pub(crate) review_titles: NameCatalog<ReviewId>,
}

impl View {
    /// Builds an empty view from validated parameters.
    pub(crate) fn from_new(key: ViewKey, params: NewView) -> Self {
        Self {
            key,
            title: params.title,
            is_new: params.is_new,
            times_view: params.times_view,
            source: params.source,
            episode_range: params.episode_range,
            duration: params.duration,
            last_episode_date: params.last_episode_date,
            reviews: EntityArena::new(),
            review_titles: NameCatalog::new(NameScope::Review(key)),
        }
    }

    /// Restores a view with existing reviews, rebuilding its title catalog.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for malformed months or dates and
    /// `DuplicateName` if two reviews share a title.
    pub(crate) fn restore(
        key: ViewKey,
        params: NewView,
        reviews: EntityArena<ReviewId, Review>,
    ) -> Result<Self> {
        params.validate()?;
        let review_titles = NameCatalog::rebuild(
            NameScope::Review(key),
            reviews.iter().map(|(id, review)| (review.title.as_str(), id)),
        )?;
        Ok(Self {
            reviews,
            review_titles,
            ..Self::from_new(key, params)
        })
    }

    /// Returns the id chain of this view.
    #[must_use]
    pub fn key(&self) -> ViewKey {
        self.key
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the first-viewing flag.
    #[must_use]
    pub fn is_new(&self) -> Option<bool> {
        self.is_new
    }

    /// Returns the view count.
    #[must_use]
    pub fn times_view(&self) -> Option<i64> {
        self.times_view
    }

    /// Returns the source.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the episode range.
    #[must_use]
    pub fn episode_range(&self) -> Option<&[String]> {
        self.episode_range.as_deref()
    }

    /// Returns the duration months.
    #[must_use]
    pub fn duration(&self) -> Option<&[String]> {
        self.duration.as_deref()
    }

    /// Returns the last episode date.
    #[must_use]
    pub fn last_episode_date(&self) -> Option<&str> {
        self.last_episode_date.as_deref()
    }

    /// Sets the first-viewing flag.
    pub fn set_is_new(&mut self, is_new: Option<bool>) {
        self.is_new = is_new;
    }

    /// Sets the view count.
    pub fn set_times_view(&mut self, times: Option<i64>) {
        self.times_view = times;
    }

    /// Sets the source.
    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }

    /// Replaces the episode range.
    pub fn set_episode_range(&mut self, episodes: Option<Vec<String>>) {
        self.episode_range = episodes;
    }

    /// Appends an episode unless already listed.
    pub fn add_episode(&mut self, episode: &str) {
        push_unique(&mut self.episode_range, episode);
    }

    /// Removes an episode; absent episodes are ignored.
    pub fn remove_episode(&mut self, episode: &str) {
        remove_item(&mut self.episode_range, episode);
    }

    /// Replaces the duration months.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if any entry is not a month string; nothing
    /// is changed in that case.
    pub fn set_duration(&mut self, months: Option<Vec<String>>) -> Result<()> {
        check_duration(months.as_deref())?;
        self.duration = months;
        Ok(())
    }

    /// Appends a month unless already listed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if `month` is not a month string.
    pub fn add_duration_month(&mut self, month: &str) -> Result<()> {
        check_month("duration", month)?;
        push_unique(&mut self.duration, month);
        Ok(())
    }

    /// Removes a month; absent months are ignored.
    pub fn remove_duration_month(&mut self, month: &str) {
        remove_item(&mut self.duration, month);
    }

    /// Sets the last episode date.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if `date` is not a date string.
    pub fn set_last_episode_date(&mut self, date: Option<String>) -> Result<()> {
        if let Some(value) = &date {
            check_date("last_episode_date", value)?;
        }
        self.last_episode_date = date;
        Ok(())
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Adds a review, returning its id.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for a bad ranking and `DuplicateName` if the
    /// title is already used by another review of this view.
    /// Returns `IdsExhausted` if the review counter has no ids left.
    pub fn add_review(&mut self, params: NewReview) -> Result<ReviewId> {
        params.validate()?;
        if self.review_titles.contains(&params.title) {
            return Err(Error::duplicate_name(
                self.review_titles.scope(),
                params.title,
            ));
        }
        let title = params.title.clone();
        let id = self.reviews.insert(Review::from_new(params))?;
        self.review_titles.insert(title, id)?;
        debug!("event=review_created review={}", self.key.review(id));
        Ok(id)
    }

    /// Gets a review.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the review does not exist.
    pub fn review(&self, id: ReviewId) -> Result<&Review> {
        self.reviews.get(id)
    }

    /// Gets a review mutably.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the review does not exist.
    pub fn review_mut(&mut self, id: ReviewId) -> Result<&mut Review> {
        self.reviews.get_mut(id)
    }

    /// Looks up a review by title.
    #[must_use]
    pub fn lookup_review(&self, title: &str) -> Option<ReviewId> {
        self.review_titles.lookup(title)
    }

    /// Returns the review arena.
    #[must_use]
    pub fn reviews(&self) -> &EntityArena<ReviewId, Review> {
        &self.reviews
    }

    /// Returns the review title catalog.
    #[must_use]
    pub fn review_titles(&self) -> &NameCatalog<ReviewId> {
        &self.review_titles
    }

    /// Renames a review. Renaming to the current title does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the review does not exist and
    /// `DuplicateName` if another review already uses `title`.
    pub fn rename_review(&mut self, id: ReviewId, title: &str) -> Result<()> {
        let review = self.reviews.get_mut(id)?;
        if review.title == title {
            return Ok(());
        }
        if self.review_titles.contains(title) {
            return Err(Error::duplicate_name(
                self.review_titles.scope(),
                title,
            ));
        }
        self.review_titles.remove(&review.title)?;
        self.review_titles.insert(title, id)?;
        review.title = title.to_string();
        debug!("event=review_renamed review={}", self.key.review(id));
        Ok(())
    }

    /// Removes a review and its catalog entry, returning it.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the review does not exist.
    pub fn destroy_review(&mut self, id: ReviewId) -> Result<Review> {
        let title = &self.reviews.get(id)?.title;
        self.review_titles.remove(title)?;
        let review = self.reviews.remove(id)?;
        debug!("event=review_destroyed review={}", self.key.review(id));
        Ok(review)
    }

    /// Removes every review. Review ids stay retired.
    pub fn clear_reviews(&mut self) {
        self.reviews.clear();
        self.review_titles.clear();
        debug!("event=reviews_cleared view={}", self.key);
    }

    /// Returns the id chain of one of this view's reviews.
    #[must_use]
    pub fn review_key(&self, id: ReviewId) -> ReviewKey {
        self.key.review(id)
    }
}
