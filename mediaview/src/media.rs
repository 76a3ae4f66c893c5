use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Category of a media item, taken from the root element of its metadata
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MediaType {
    Movie,
    TvShow,
}

impl MediaType {
    pub const ALL: [MediaType; 2] = [MediaType::Movie, MediaType::TvShow];

    /// Name of the top-level virtual directory holding this type.
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Movie => "Movies",
            MediaType::TvShow => "TV Shows",
        }
    }

    /// Maps a metadata root element (`movie`, `tvshow`) to its type.
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "movie" => Some(MediaType::Movie),
            "tvshow" => Some(MediaType::TvShow),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Attribute kinds that get their own `by<Kind>` view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TagKind {
    Genre,
}

impl TagKind {
    pub const ALL: [TagKind; 1] = [TagKind::Genre];

    pub fn name(self) -> &'static str {
        match self {
            TagKind::Genre => "Genre",
        }
    }

    /// Directory name of the view grouping titles by this tag.
    pub fn view(self) -> String {
        format!("by{}", self.name())
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Directory name of the per-type view listing every title.
pub const TITLE_VIEW: &str = "byTitle";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("name {0:?} is a relative path component")]
    DotComponent(String),

    #[error("name {0:?} contains a path separator")]
    Separator(String),

    #[error("name {0:?} contains a NUL byte")]
    Nul(String),
}

/// Checks that `name` can be used as a single virtual path segment.
///
/// Titles and tag values become directory names verbatim, so anything that
/// would split or escape a segment is refused.
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name == "." || name == ".." {
        return Err(NameError::DotComponent(name.to_string()));
    }
    if name.contains('/') {
        return Err(NameError::Separator(name.to_string()));
    }
    if name.contains('\0') {
        return Err(NameError::Nul(name.to_string()));
    }
    Ok(())
}

/// One parsed metadata document: what the title is, what kind of media it
/// is, and the real directory holding its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    base: PathBuf,
    media_type: MediaType,
    title: String,
    tags: BTreeMap<TagKind, BTreeSet<String>>,
}

impl MediaRecord {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(
        base: P,
        media_type: MediaType,
        title: S,
    ) -> Result<Self, NameError> {
        let title = title.into();
        validate_name(&title)?;

        let mut tags = BTreeMap::new();
        tags.insert(TagKind::Genre, BTreeSet::new());

        Ok(Self {
            base: base.into(),
            media_type,
            title,
            tags,
        })
    }

    pub fn with_tag<S: Into<String>>(mut self, kind: TagKind, value: S) -> Result<Self, NameError> {
        let value = value.into();
        validate_name(&value)?;
        self.tags.entry(kind).or_default().insert(value);
        Ok(self)
    }

    pub fn with_tags<I, S>(self, kind: TagKind, values: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values
            .into_iter()
            .try_fold(self, |record, value| record.with_tag(kind, value))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &BTreeMap<TagKind, BTreeSet<String>> {
        &self.tags
    }

    pub fn tag_values(&self, kind: TagKind) -> impl Iterator<Item = &str> {
        self.tags
            .get(&kind)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }
}
