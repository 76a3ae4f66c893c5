//! Core library for presenting a media collection as a read-only virtual
//! filesystem. Metadata documents found below a library root are parsed into
//! records, the records are arranged into a namespace of views (by title, by
//! genre) per media type, and the namespace is served over FUSE with every
//! title leaf delegating to its real directory.

/// Media types, tag kinds, and the validated record each title becomes.
pub mod media;
/// Normalized paths inside the virtual namespace.
pub mod vpath;
/// Construction of the virtual namespace and classification of its paths.
pub mod namespace;
/// Parsing of `.nfo` metadata documents.
pub mod nfo;
/// Recursive discovery of metadata documents with progress observers.
pub mod scan;
/// A scanned library root together with its namespace.
pub mod library;
/// Summary statistics about a built namespace.
pub mod stats;
/// The read-only FUSE adapter and mount entry point.
pub mod fuse;

pub use library::{LibraryError, MediaLibrary};
pub use media::{MediaRecord, MediaType, TagKind};
pub use namespace::{Classification, Namespace};
pub use vpath::VirtualPath;
