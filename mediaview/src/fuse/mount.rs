use std::path::Path;
use std::sync::Arc;

use fuser::MountOption;
use thiserror::Error;
use tracing::info;

use super::MediaviewFs;
use crate::library::MediaLibrary;

#[derive(Error, Debug)]
pub enum MountError {
    #[error("invalid mountpoint: {0}")]
    InvalidMountpoint(String),

    #[error("mount I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountOptions {
    pub allow_other: bool,
    pub auto_unmount: bool,
}

pub fn build_mount_options(options: &MountOptions) -> Vec<MountOption> {
    let mut opts = vec![
        MountOption::FSName("mediaview".to_owned()),
        MountOption::Subtype("mediaview".to_owned()),
        MountOption::RO,
        MountOption::NoAtime,
        MountOption::CUSTOM("nodiratime".to_owned()),
    ];
    if options.allow_other {
        opts.push(MountOption::AllowOther);
    }
    if options.auto_unmount {
        opts.push(MountOption::AutoUnmount);
    }
    opts
}

/// Mounts `library` at `mountpoint`, blocking until it is unmounted.
pub fn mount<P: AsRef<Path>>(
    library: Arc<MediaLibrary>,
    mountpoint: P,
    options: &MountOptions,
) -> Result<(), MountError> {
    let mountpoint = mountpoint.as_ref();
    if mountpoint.as_os_str().is_empty() {
        return Err(MountError::InvalidMountpoint(
            "mountpoint cannot be empty".to_owned(),
        ));
    }
    if !mountpoint.is_dir() {
        return Err(MountError::InvalidMountpoint(format!(
            "{} is not a directory",
            mountpoint.display()
        )));
    }

    info!(
        root = %library.root().display(),
        mountpoint = %mountpoint.display(),
        "mounting media library"
    );
    fuser::mount2(MediaviewFs::new(library), mountpoint, &build_mount_options(options))?;
    info!(mountpoint = %mountpoint.display(), "unmounted");
    Ok(())
}
