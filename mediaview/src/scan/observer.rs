use std::path::Path;
use std::sync::Mutex;

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::media::MediaRecord;
use crate::nfo::MetadataError;

/// Receives scan events: one call per metadata document, then one when the
/// walk is exhausted.
pub trait ScanObserver: Send + Sync {
    fn document_parsed(&self, path: &Path, record: &MediaRecord);
    fn document_skipped(&self, path: &Path, error: &MetadataError);
    fn finished(&self, parsed: usize, skipped: usize);
}

// No-op implementation
pub struct NoopObserver;

impl ScanObserver for NoopObserver {
    fn document_parsed(&self, _path: &Path, _record: &MediaRecord) {}
    fn document_skipped(&self, _path: &Path, _error: &MetadataError) {}
    fn finished(&self, _parsed: usize, _skipped: usize) {}
}

/// Keeps every skipped document with its error message.
#[derive(Default)]
pub struct SkipCollector {
    skipped: Mutex<Vec<(String, String)>>,
}

impl SkipCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(path, reason)` pairs in scan order.
    pub fn skipped(&self) -> Vec<(String, String)> {
        self.skipped
            .lock()
            .map(|skipped| skipped.clone())
            .unwrap_or_default()
    }
}

impl ScanObserver for SkipCollector {
    fn document_parsed(&self, _path: &Path, _record: &MediaRecord) {}

    fn document_skipped(&self, path: &Path, error: &MetadataError) {
        if let Ok(mut skipped) = self.skipped.lock() {
            skipped.push((path.display().to_string(), error.to_string()));
        }
    }

    fn finished(&self, _parsed: usize, _skipped: usize) {}
}

// Indicatif implementation (only when feature enabled)
#[cfg(feature = "progress")]
pub struct IndicatifObserver {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifObserver {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
        {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        bar.set_message("Scanning library...");
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { bar }
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ScanObserver for IndicatifObserver {
    fn document_parsed(&self, _path: &Path, record: &MediaRecord) {
        self.bar.inc(1);
        self.bar.set_message(format!("Scanning library... {}", record.title()));
    }

    fn document_skipped(&self, path: &Path, error: &MetadataError) {
        self.bar.println(format!("skipped {}: {}", path.display(), error));
    }

    fn finished(&self, _parsed: usize, _skipped: usize) {
        self.bar.finish_and_clear();
    }
}
