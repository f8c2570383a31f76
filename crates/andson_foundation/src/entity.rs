//! Entity identifiers and id chains.
//!
//! Every scope (the store, one anime, one view) hands out its own integer ids.
//! An entity below the root is addressed by the chain of ids leading to it,
//! which is re-resolved on every access to detect removed ancestors.

use std::fmt;

/// Hierarchy level of an entity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EntityLevel {
    /// A tracked anime, owned by the store.
    Anime,
    /// A viewing record, owned by an anime.
    View,
    /// A review, owned by a view.
    Review,
}

impl fmt::Display for EntityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anime => write!(f, "anime"),
            Self::View => write!(f, "view"),
            Self::Review => write!(f, "review"),
        }
    }
}

/// A typed integer id allocated by one scope's arena.
pub trait EntityKey: Copy + Eq + Ord + std::hash::Hash + fmt::Debug {
    /// The hierarchy level this key addresses.
    const LEVEL: EntityLevel;

    /// Wraps a raw id.
    fn from_raw(raw: u64) -> Self;

    /// Returns the raw id.
    fn raw(self) -> u64;
}

macro_rules! entity_key {
    ($(#[$meta:meta])* $name:ident, $level:expr, $tag:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Creates an id from its raw value.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw value of this id.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl EntityKey for $name {
            const LEVEL: EntityLevel = $level;

            fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_key!(
    /// Identifier of an anime within the store.
    AnimeId,
    EntityLevel::Anime,
    "AnimeId"
);

entity_key!(
    /// Identifier of a view within its owning anime.
    ViewId,
    EntityLevel::View,
    "ViewId"
);

entity_key!(
    /// Identifier of a review within its owning view.
    ReviewId,
    EntityLevel::Review,
    "ReviewId"
);

/// Id chain addressing a view: owning anime, then the view itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewKey {
    /// The owning anime.
    pub anime: AnimeId,
    /// The view within that anime.
    pub view: ViewId,
}

impl ViewKey {
    /// Creates a view key.
    #[must_use]
    pub const fn new(anime: AnimeId, view: ViewId) -> Self {
        Self { anime, view }
    }

    /// Extends this chain down to a review of the view.
    #[must_use]
    pub const fn review(self, review: ReviewId) -> ReviewKey {
        ReviewKey {
            anime: self.anime,
            view: self.view,
            review,
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.anime, self.view)
    }
}

/// Id chain addressing a review: anime, view, then the review itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ReviewKey {
    /// The anime owning the view.
    pub anime: AnimeId,
    /// The view owning the review.
    pub view: ViewId,
    /// The review within that view.
    pub review: ReviewId,
}

impl ReviewKey {
    /// Returns the chain of the owning view.
    #[must_use]
    pub const fn view_key(self) -> ViewKey {
        ViewKey {
            anime: self.anime,
            view: self.view,
        }
    }
}

impl fmt::Display for ReviewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.anime, self.view, self.review)
    }
}

/// The scope a name catalog indexes.
///
/// Anime titles and aliases share one global scope; view titles are scoped
/// to their anime and review titles to their view.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NameScope {
    /// Titles and aliases of every anime in the store.
    Anime,
    /// View titles of one anime.
    View(AnimeId),
    /// Review titles of one view.
    Review(ViewKey),
}

impl fmt::Display for NameScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anime => write!(f, "anime names"),
            Self::View(anime) => write!(f, "view titles of anime {anime}"),
            Self::Review(view) => write!(f, "review titles of view {view}"),
        }
    }
}
