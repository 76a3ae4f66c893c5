use std::path::Path;
use std::sync::Arc;

use mediaview::fuse::{self, MountOptions};

use crate::error::Result;
use crate::utils;

pub fn execute(root: &Path, mountpoint: &Path, allow_other: bool, auto_unmount: bool) -> Result<()> {
    let library = Arc::new(super::load_library(root)?);
    super::report_skipped(&library);

    utils::print_info(&format!(
        "Mounting on {} (unmount with `fusermount -u {}`)",
        mountpoint.display(),
        mountpoint.display()
    ));
    let options = MountOptions {
        allow_other,
        auto_unmount,
    };
    fuse::mount(library, mountpoint, &options)?;
    utils::print_success("Unmounted");

    Ok(())
}
