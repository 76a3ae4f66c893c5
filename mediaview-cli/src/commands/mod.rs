use std::path::Path;
use std::sync::Arc;

use mediaview::MediaLibrary;
use mediaview::scan::IndicatifObserver;

use crate::error::Result;
use crate::utils;

pub mod ls;
pub mod mount;
pub mod resolve;
pub mod stats;
pub mod tree;

/// Scans `root` behind a spinner.
pub fn load_library(root: &Path) -> Result<MediaLibrary> {
    let observer = Arc::new(IndicatifObserver::new());
    Ok(MediaLibrary::load_with_observer(root, observer)?)
}

pub fn report_skipped(library: &MediaLibrary) {
    let report = library.report();
    utils::print_info(&format!(
        "Loaded {} title(s) from {}",
        report.parsed,
        library.root().display()
    ));
    if report.skipped > 0 {
        utils::print_warning(&format!(
            "Skipped {} unreadable metadata document(s), run with --verbose for details",
            report.skipped
        ));
    }
}
