//! Review records, the leaves of the hierarchy.

use andson_foundation::validate::check_ranking;
use andson_foundation::Result;

use crate::list::{push_unique, remove_item};

/// Creation parameters for a review.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewReview {
    /// Title, unique among the reviews of one view.
    pub title: String,
    /// Which aspect of the anime is reviewed.
    pub item: Option<String>,
    /// Episodes the review covers.
    pub episode_range: Option<Vec<String>>,
    /// Score in `[0, 10]`.
    pub ranking: Option<i64>,
    /// Free text, usually markdown.
    pub comment: Option<String>,
}

impl NewReview {
    /// Starts a review with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the reviewed item.
    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
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

    /// Builder method to set the ranking. Checked when the review is added.
    #[must_use]
    pub fn with_ranking(mut self, ranking: i64) -> Self {
        self.ranking = Some(ranking);
        self
    }

    /// Builder method to set the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Checks field formats; title uniqueness is up to the owning view.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the ranking lies outside `[0, 10]`.
    pub fn validate(&self) -> Result<()> {
        if let Some(ranking) = self.ranking {
            check_ranking("ranking", ranking)?;
        }
        Ok(())
    }
}

/// A review attached to a view.
///
/// The title is only changed through the owning view so that its title
/// catalog stays in sync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Review {
    pub(crate) title: String,
    pub(crate) item: Option<String>,
    pub(crate) episode_range: Option<Vec<String>>,
    pub(crate) ranking: Option<i64>,
    pub(crate) comment: Option<String>,
}

impl Review {
    /// Builds a review from validated parameters.
    pub(crate) fn from_new(params: NewReview) -> Self {
        Self {
            title: params.title,
            item: params.item,
            episode_range: params.episode_range,
            ranking: params.ranking,
            comment: params.comment,
        }
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the reviewed item.
    #[must_use]
    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    /// Returns the episode range.
    #[must_use]
    pub fn episode_range(&self) -> Option<&[String]> {
        self.episode_range.as_deref()
    }

    /// Returns the ranking.
    #[must_use]
    pub fn ranking(&self) -> Option<i64> {
        self.ranking
    }

    /// Returns the comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Sets the reviewed item.
    pub fn set_item(&mut self, item: Option<String>) {
        self.item = item;
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

    /// Sets the ranking.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the ranking lies outside `[0, 10]`.
    pub fn set_ranking(&mut self, ranking: Option<i64>) -> Result<()> {
        if let Some(value) = ranking {
            check_ranking("ranking", value)?;
        }
        self.ranking = ranking;
        Ok(())
    }

    /// Sets the comment.
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}
