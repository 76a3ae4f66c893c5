//! Recursive discovery of metadata documents below a library root.

mod observer;

use std::cmp::Ordering;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::media::MediaRecord;
use crate::nfo::{self, MetadataError};

#[cfg(feature = "progress")]
pub use observer::IndicatifObserver;
pub use observer::{NoopObserver, ScanObserver, SkipCollector};

/// Walks a library and yields one [`MediaRecord`] per readable metadata
/// document.
///
/// Documents that fail to read or parse are skipped: the failure is logged,
/// counted and handed to the observer, and the walk carries on.
///
/// Directories are visited contents-first. Within a directory, every
/// subdirectory is walked before any of its files, and ties go by file name.
/// A document therefore always comes after every document nested below it,
/// so the shallower one wins a title clash.
pub struct MetadataScanner {
    walker: walkdir::IntoIter,
    observer: Arc<dyn ScanObserver>,
    parsed: usize,
    skipped: usize,
    finished: bool,
}

impl MetadataScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let walker = WalkDir::new(root.as_ref())
            .follow_links(false)
            .contents_first(true)
            .sort_by(subdirectories_first)
            .into_iter();
        Self {
            walker,
            observer: Arc::new(NoopObserver),
            parsed: 0,
            skipped: 0,
            finished: false,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn parsed(&self) -> usize {
        self.parsed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn skip(&mut self, path: &Path, error: MetadataError) {
        warn!(path = %path.display(), error = %error, "skipping metadata document");
        self.skipped += 1;
        self.observer.document_skipped(path, &error);
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            info!(parsed = self.parsed, skipped = self.skipped, "library scan finished");
            self.observer.finished(self.parsed, self.skipped);
        }
    }
}

fn subdirectories_first(a: &walkdir::DirEntry, b: &walkdir::DirEntry) -> Ordering {
    b.file_type()
        .is_dir()
        .cmp(&a.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

impl Iterator for MetadataScanner {
    type Item = MediaRecord;

    fn next(&mut self) -> Option<MediaRecord> {
        loop {
            let entry = match self.walker.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    self.skip(&path, MetadataError::Io(io::Error::from(e)));
                    continue;
                }
                None => {
                    self.finish();
                    return None;
                }
            };

            if !entry.file_type().is_file() || !nfo::is_metadata_document(entry.path()) {
                continue;
            }

            match nfo::read_record(entry.path()) {
                Ok(record) => {
                    debug!(
                        path = %entry.path().display(),
                        title = record.title(),
                        media_type = %record.media_type(),
                        "parsed metadata document"
                    );
                    self.parsed += 1;
                    self.observer.document_parsed(entry.path(), &record);
                    return Some(record);
                }
                Err(e) => self.skip(entry.path(), e),
            }
        }
    }
}
