//! The persisted document model.
//!
//! These types mirror the on-disk JSON layout field for field. They carry no
//! catalogs: [`Store::from_document`] rebuilds every catalog from the
//! entity data and rejects documents whose names collide.

use std::collections::BTreeMap;

use andson_foundation::{
    AnimeId, EntityLevel, Error, Result, ReviewId, ViewId, ViewKey,
};
use serde::{Deserialize, Serialize};

use crate::anime::Anime;
use crate::arena::EntityArena;
use crate::review::{NewReview, Review};
use crate::store::Store;
use crate::view::{NewView, View};

/// Edition tag written to and required from every document.
pub const EDITION: &str = "AnDson Personal";

/// Document version written by this crate. Loading accepts major 1 with
/// minor and patch not exceeding this.
pub const SUPPORTED_VERSION: [u32; 3] = [1, 0, 0];

/// Edition and version of a document, readable without parsing the body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHeader {
    /// Product edition tag.
    #[serde(rename = "_edition")]
    pub edition: String,
    /// Format version as `[major, minor, patch]`.
    #[serde(rename = "_version")]
    pub version: [u32; 3],
}

impl Default for DocumentHeader {
    fn default() -> Self {
        Self {
            edition: EDITION.to_string(),
            version: SUPPORTED_VERSION,
        }
    }
}

impl DocumentHeader {
    /// Checks that this crate can read the document.
    ///
    /// # Errors
    ///
    /// Returns `IncompatibleVersion` for a foreign edition, another major
    /// version, or a newer minor or patch version.
    pub fn check(&self) -> Result<()> {
        let [major, minor, patch] = self.version;
        let [supported_major, supported_minor, supported_patch] = SUPPORTED_VERSION;
        if self.edition != EDITION
            || major != supported_major
            || minor > supported_minor
            || patch > supported_patch
        {
            return Err(Error::incompatible_version(
                self.edition.as_str(),
                self.version,
            ));
        }
        Ok(())
    }
}

/// A whole store as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Product edition tag.
    #[serde(rename = "_edition")]
    pub edition: String,
    /// Format version.
    #[serde(rename = "_version")]
    pub version: [u32; 3],
    /// Every anime.
    pub animes: AnimeTable,
}

impl Default for Document {
    fn default() -> Self {
        let header = DocumentHeader::default();
        Self {
            edition: header.edition,
            version: header.version,
            animes: AnimeTable::default(),
        }
    }
}

impl Document {
    /// Returns the edition and version of this document.
    #[must_use]
    pub fn header(&self) -> DocumentHeader {
        DocumentHeader {
            edition: self.edition.clone(),
            version: self.version,
        }
    }
}

/// Anime objects keyed by id, plus the anime id counter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeTable {
    /// Last anime id handed out.
    #[serde(rename = "_last_anime_id")]
    pub last_id: u64,
    /// Live animes.
    #[serde(rename = "_anime_objects")]
    pub objects: BTreeMap<u64, AnimeObject>,
}

/// A persisted anime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeObject {
    /// Type tag, always `"Anime"`.
    #[serde(rename = "_class")]
    pub class: String,
    /// Primary title.
    pub title: String,
    /// Alternative names.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Viewing records of this anime.
    pub views: ViewTable,
}

/// View objects keyed by id, plus the view id counter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTable {
    /// Last view id handed out within the owning anime.
    #[serde(rename = "_last_view_id")]
    pub last_id: u64,
    /// Live views.
    #[serde(rename = "_view_objects")]
    pub objects: BTreeMap<u64, ViewObject>,
}

/// A persisted view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewObject {
    /// Type tag, always `"View"`.
    #[serde(rename = "_class")]
    pub class: String,
    /// Title, unique within the owning anime.
    pub title: String,
    /// Whether this was a first viewing.
    #[serde(default)]
    pub is_new: Option<bool>,
    /// How many times it was watched.
    #[serde(default)]
    pub times_view: Option<i64>,
    /// Where it was watched.
    #[serde(default)]
    pub source: Option<String>,
    /// Episode labels covered.
    #[serde(default)]
    pub episode_range: Option<Vec<String>>,
    /// Months spent watching, as `YYYY-MM`.
    #[serde(default)]
    pub duration: Option<Vec<String>>,
    /// Date of the last episode watched, as `YYYY-MM-DD`.
    #[serde(default)]
    pub last_episode_date: Option<String>,
    /// Reviews written for this viewing.
    pub reviews: ReviewTable,
}

/// Review objects keyed by id, plus the review id counter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewTable {
    /// Last review id handed out within the owning view.
    #[serde(rename = "_last_review_id")]
    pub last_id: u64,
    /// Live reviews.
    #[serde(rename = "_review_objects")]
    pub objects: BTreeMap<u64, ReviewObject>,
}

/// A persisted review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewObject {
    /// Type tag, always `"Review"`.
    #[serde(rename = "_class")]
    pub class: String,
    /// Title, unique within the owning view.
    pub title: String,
    /// What is being reviewed.
    #[serde(default)]
    pub item: Option<String>,
    /// Episode labels the review covers.
    #[serde(default)]
    pub episode_range: Option<Vec<String>>,
    /// Score from 0 to 10.
    #[serde(default)]
    pub ranking: Option<i64>,
    /// Markdown comment.
    #[serde(default)]
    pub comment: Option<String>,
}

fn check_class(level: EntityLevel, id: u64, expected: &str, actual: &str) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(Error::invalid_argument_type(
            format!("_class of {level} {id}"),
            expected,
            actual,
        ))
    }
}

// =============================================================================
// Store <-> Document
// =============================================================================

impl Store {
    /// Captures the store as a document.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let objects = self
            .animes()
            .iter()
            .map(|(id, anime)| (id.get(), anime_object(anime)))
            .collect();
        Document {
            animes: AnimeTable {
                last_id: self.animes().last_id(),
                objects,
            },
            ..Document::default()
        }
    }

    /// Builds a store from a document, rebuilding every catalog.
    ///
    /// # Errors
    ///
    /// - `IncompatibleVersion` if the header is not supported.
    /// - `InvalidArgumentType` if a `_class` tag names the wrong entity.
    /// - `InvalidFormat` or `OutOfRange` for malformed field values.
    /// - `MalformedDocument` if an id lies outside its counter.
    /// - `DuplicateName` if names collide in any scope.
    pub fn from_document(doc: Document) -> Result<Self> {
        doc.header().check()?;
        let animes = doc
            .animes
            .objects
            .into_iter()
            .map(|(raw, object)| Ok((AnimeId::new(raw), restore_anime(AnimeId::new(raw), object)?)))
            .collect::<Result<Vec<_>>>()?;
        let arena = EntityArena::from_parts(doc.animes.last_id, animes)?;
        Self::from_animes(arena)
    }
}

fn anime_object(anime: &Anime) -> AnimeObject {
    AnimeObject {
        class: "Anime".to_string(),
        title: anime.title.clone(),
        aliases: anime.aliases.clone(),
        tags: anime.tags.clone(),
        views: ViewTable {
            last_id: anime.views.last_id(),
            objects: anime
                .views
                .iter()
                .map(|(id, view)| (id.get(), view_object(view)))
                .collect(),
        },
    }
}

fn view_object(view: &View) -> ViewObject {
    ViewObject {
        class: "View".to_string(),
        title: view.title.clone(),
        is_new: view.is_new,
        times_view: view.times_view,
        source: view.source.clone(),
        episode_range: view.episode_range.clone(),
        duration: view.duration.clone(),
        last_episode_date: view.last_episode_date.clone(),
        reviews: ReviewTable {
            last_id: view.reviews.last_id(),
            objects: view
                .reviews
                .iter()
                .map(|(id, review)| (id.get(), review_object(review)))
                .collect(),
        },
    }
}

fn review_object(review: &Review) -> ReviewObject {
    ReviewObject {
        class: "Review".to_string(),
        title: review.title.clone(),
        item: review.item.clone(),
        episode_range: review.episode_range.clone(),
        ranking: review.ranking,
        comment: review.comment.clone(),
    }
}

fn restore_anime(id: AnimeId, object: AnimeObject) -> Result<Anime> {
    check_class(EntityLevel::Anime, id.get(), "Anime", &object.class)?;
    let views = object
        .views
        .objects
        .into_iter()
        .map(|(raw, view)| {
            let key = ViewKey::new(id, ViewId::new(raw));
            Ok((key.view, restore_view(key, view)?))
        })
        .collect::<Result<Vec<_>>>()?;
    let views = EntityArena::from_parts(object.views.last_id, views)?;
    Anime::restore(id, object.title, object.aliases, object.tags, views)
}

fn restore_view(key: ViewKey, object: ViewObject) -> Result<View> {
    check_class(EntityLevel::View, key.view.get(), "View", &object.class)?;
    let reviews = object
        .reviews
        .objects
        .into_iter()
        .map(|(raw, review)| {
            let id = ReviewId::new(raw);
            Ok((id, restore_review(id, review)?))
        })
        .collect::<Result<Vec<_>>>()?;
    let reviews = EntityArena::from_parts(object.reviews.last_id, reviews)?;
    let params = NewView {
        title: object.title,
        is_new: object.is_new,
        times_view: object.times_view,
        source: object.source,
        episode_range: object.episode_range,
        duration: object.duration,
        last_episode_date: object.last_episode_date,
    };
    View::restore(key, params, reviews)
}

fn restore_review(id: ReviewId, object: ReviewObject) -> Result<Review> {
    check_class(EntityLevel::Review, id.get(), "Review", &object.class)?;
    let params = NewReview {
        title: object.title,
        item: object.item,
        episode_range: object.episode_range,
        ranking: object.ranking,
        comment: object.comment,
    };
    params.validate()?;
    Ok(Review::from_new(params))
}
