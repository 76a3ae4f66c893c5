//! Parser for Kodi-style `.nfo` metadata documents.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;
use tracing::warn;

use crate::media::{MediaRecord, MediaType, NameError, TagKind, validate_name};

pub const METADATA_EXTENSION: &str = "nfo";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no <movie> or <tvshow> element found")]
    MissingRoot,

    #[error("{0} document has no title")]
    MissingTitle(MediaType),

    #[error("invalid title: {0}")]
    InvalidTitle(#[from] NameError),

    #[error("document has no parent directory")]
    NoParent,
}

pub type Result<T> = std::result::Result<T, MetadataError>;

/// Fields pulled out of one document before they are validated into a
/// [`MediaRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfoDocument {
    pub media_type: MediaType,
    pub title: Option<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Genre,
}

impl NfoDocument {
    /// Parses the first `<movie>` or `<tvshow>` element found in `xml`.
    ///
    /// Within it, the first `<title>` and every `<genre>` are collected, at
    /// any depth. Anything after the closing root tag is ignored, which
    /// tolerates the trailing scraper URLs some tools append.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut media_type = None;
        let mut root_depth = 0;
        let mut depth = 0;
        let mut capture: Option<(Field, usize)> = None;
        let mut text = String::new();
        let mut title = None;
        let mut genres = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(element) => {
                    depth += 1;
                    let name = element.local_name();
                    let name = String::from_utf8_lossy(name.as_ref());
                    if media_type.is_none() {
                        if let Some(found) = MediaType::from_element(&name) {
                            media_type = Some(found);
                            root_depth = depth;
                        }
                    } else if capture.is_none() {
                        let field = match &*name {
                            "title" if title.is_none() => Some(Field::Title),
                            "genre" => Some(Field::Genre),
                            _ => None,
                        };
                        if let Some(field) = field {
                            capture = Some((field, depth));
                            text.clear();
                        }
                    }
                }
                Event::Empty(element) => {
                    // `<movie/>` is a root without a title
                    if media_type.is_none() {
                        let name = element.local_name();
                        if let Some(found) = MediaType::from_element(&String::from_utf8_lossy(name.as_ref())) {
                            media_type = Some(found);
                            break;
                        }
                    }
                }
                Event::Text(content) if capture.is_some() => {
                    text.push_str(&content.unescape()?);
                }
                Event::CData(content) if capture.is_some() => {
                    text.push_str(&String::from_utf8_lossy(&content.into_inner()));
                }
                Event::End(_) => {
                    if let Some((field, field_depth)) = capture {
                        if field_depth == depth {
                            let value = text.trim().to_string();
                            match field {
                                Field::Title => title = Some(value),
                                Field::Genre if !value.is_empty() => genres.push(value),
                                Field::Genre => {}
                            }
                            capture = None;
                        }
                    }
                    if media_type.is_some() && depth == root_depth {
                        break;
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let media_type = media_type.ok_or(MetadataError::MissingRoot)?;
        Ok(Self {
            media_type,
            title,
            genres,
        })
    }

    /// Validates the document into a record rooted at `base`.
    ///
    /// A missing or unusable title rejects the whole document; an unusable
    /// genre is dropped on its own.
    pub fn into_record(self, base: &Path) -> Result<MediaRecord> {
        let title = self
            .title
            .filter(|title| !title.is_empty())
            .ok_or(MetadataError::MissingTitle(self.media_type))?;
        let mut record = MediaRecord::new(base, self.media_type, title)?;

        for genre in self.genres {
            if let Err(e) = validate_name(&genre) {
                warn!(base = %base.display(), genre = %genre, error = %e, "dropping genre");
                continue;
            }
            record = record.with_tag(TagKind::Genre, genre)?;
        }

        Ok(record)
    }
}

pub fn is_metadata_document<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(METADATA_EXTENSION))
}

/// Reads and parses one metadata document. The record's base is the
/// directory containing the document.
pub fn read_record<P: AsRef<Path>>(path: P) -> Result<MediaRecord> {
    let path = path.as_ref();
    let base = path.parent().ok_or(MetadataError::NoParent)?;
    let xml = fs::read_to_string(path)?;
    NfoDocument::parse(&xml)?.into_record(base)
}
