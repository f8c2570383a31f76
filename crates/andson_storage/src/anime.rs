//! Anime records: the top level of the hierarchy, owning their views.
//!
//! Titles and aliases live in the store-wide catalog, so they are changed
//! through [`Store`](crate::Store). Tags and the view scope are managed here.

use andson_foundation::{AnimeId, Error, NameScope, Result, ViewId, ViewKey};
use log::debug;

use crate::arena::EntityArena;
use crate::catalog::NameCatalog;
use crate::list::dedup;
use crate::view::{NewView, View};

/// Creation parameters for an anime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewAnime {
    /// Title, unique across all titles and aliases in the store.
    pub title: String,
    /// Alternative names; repeats collapse silently.
    pub aliases: Vec<String>,
    /// Free-form labels; repeats collapse silently.
    pub tags: Vec<String>,
}

impl NewAnime {
    /// Starts an anime with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the aliases.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A tracked anime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anime {
    pub(crate) id: AnimeId,
    pub(crate) title: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) views: EntityArena<ViewId, View>,
    pub(crate) view_titles: NameCatalog<ViewId>,
}

impl Anime {
    /// Builds an anime without views. Names must already be checked.
    pub(crate) fn new(id: AnimeId, title: String, aliases: Vec<String>, tags: Vec<String>) -> Self {
        Self {
            id,
            title,
            aliases,
            tags: dedup(tags),
            views: EntityArena::new(),
            view_titles: NameCatalog::new(NameScope::View(id)),
        }
    }

    /// Restores an anime with existing views, rebuilding its view catalog.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if two views share a title.
    pub(crate) fn restore(
        id: AnimeId,
        title: String,
        aliases: Vec<String>,
        tags: Vec<String>,
        views: EntityArena<ViewId, View>,
    ) -> Result<Self> {
        let view_titles = NameCatalog::rebuild(
            NameScope::View(id),
            views.iter().map(|(view_id, view)| (view.title.as_str(), view_id)),
        )?;
        Ok(Self {
            views,
            view_titles,
            ..Self::new(id, title, aliases, tags)
        })
    }

    /// Returns the id.
    #[must_use]
    pub fn id(&self) -> AnimeId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the aliases.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Checks if `name` is one of this anime's aliases.
    #[must_use]
    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|alias| alias == name)
    }

    /// Iterates over the title followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.title.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Replaces the tags. Repeats collapse, first occurrence order is kept.
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = dedup(tags);
    }

    /// Appends a tag unless already present.
    pub fn add_tag(&mut self, tag: &str) {
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }

    /// Removes a tag; absent tags are ignored.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Creates a view, returning its id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for malformed months or dates and
    /// `DuplicateName` if another view of this anime has the same title.
    /// Returns `IdsExhausted` if the view counter has no ids left.
    pub fn create_view(&mut self, params: NewView) -> Result<ViewId> {
        params.validate()?;
        if self.view_titles.contains(&params.title) {
            return Err(Error::duplicate_name(self.view_titles.scope(), params.title));
        }
        let title = params.title.clone();
        let anime = self.id;
        let id = self
            .views
            .insert_with(|view| View::from_new(ViewKey::new(anime, view), params))?;
        self.view_titles.insert(title, id)?;
        debug!("event=view_created view={}", ViewKey::new(anime, id));
        Ok(id)
    }

    /// Gets a view.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the view does not exist.
    pub fn view(&self, id: ViewId) -> Result<&View> {
        self.views.get(id)
    }

    /// Gets a view mutably.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the view does not exist.
    pub fn view_mut(&mut self, id: ViewId) -> Result<&mut View> {
        self.views.get_mut(id)
    }

    /// Looks up a view by title.
    #[must_use]
    pub fn lookup_view(&self, title: &str) -> Option<ViewId> {
        self.view_titles.lookup(title)
    }

    /// Returns the view arena.
    #[must_use]
    pub fn views(&self) -> &EntityArena<ViewId, View> {
        &self.views
    }

    /// Returns the view title catalog.
    #[must_use]
    pub fn view_titles(&self) -> &NameCatalog<ViewId> {
        &self.view_titles
    }

    /// Renames a view. Renaming to the current title does nothing.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the view does not exist and
    /// `DuplicateName` if another view already uses `title`.
    pub fn rename_view(&mut self, id: ViewId, title: &str) -> Result<()> {
        let view = self.views.get_mut(id)?;
        if view.title == title {
            return Ok(());
        }
        if self.view_titles.contains(title) {
            return Err(Error::duplicate_name(self.view_titles.scope(), title));
        }
        self.view_titles.remove(&view.title)?;
        self.view_titles.insert(title, id)?;
        view.title = title.to_string();
        debug!("event=view_renamed view={}", view.key);
        Ok(())
    }

    /// Removes a view and its catalog entry, returning it.
    ///
    /// The view's reviews go with it; handles to them become stale.
    ///
    /// # Errors
    ///
    /// Returns `EntityRemoved` if the view does not exist.
    pub fn destroy_view(&mut self, id: ViewId) -> Result<View> {
        let title = &self.views.get(id)?.title;
        self.view_titles.remove(title)?;
        let view = self.views.remove(id)?;
        debug!("event=view_destroyed view={}", view.key);
        Ok(view)
    }

    /// Removes every view. View ids stay retired.
    pub fn clear_views(&mut self) {
        self.views.clear();
        self.view_titles.clear();
        debug!("event=views_cleared anime={}", self.id);
    }
}
