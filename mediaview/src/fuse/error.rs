use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("no such file or directory")]
    NotFound,

    #[error("read-only filesystem")]
    ReadOnly,

    #[error("permission denied")]
    AccessDenied,

    #[error("no such attribute")]
    NoAttribute,

    #[error("is a directory")]
    IsDirectory,

    #[error("not a directory")]
    NotADirectory,

    #[error("bad file handle {0}")]
    BadHandle(u64),

    #[error("unknown inode {0}")]
    UnknownInode(u64),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FsError {
    pub fn to_errno(&self) -> libc::c_int {
        match self {
            FsError::NotFound | FsError::UnknownInode(_) => libc::ENOENT,
            FsError::ReadOnly => libc::EROFS,
            FsError::AccessDenied => libc::EACCES,
            #[cfg(target_os = "macos")]
            FsError::NoAttribute => libc::ENOATTR,
            #[cfg(not(target_os = "macos"))]
            FsError::NoAttribute => libc::ENODATA,
            FsError::IsDirectory => libc::EISDIR,
            FsError::NotADirectory => libc::ENOTDIR,
            FsError::BadHandle(_) => libc::EBADF,
            FsError::Io(e) => e.raw_os_error().unwrap_or(libc::EIO),
        }
    }
}

pub type FsResult<T> = std::result::Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(FsError::NotFound.to_errno(), libc::ENOENT);
        assert_eq!(FsError::UnknownInode(9).to_errno(), libc::ENOENT);
        assert_eq!(FsError::ReadOnly.to_errno(), libc::EROFS);
        assert_eq!(FsError::AccessDenied.to_errno(), libc::EACCES);
        assert_eq!(FsError::IsDirectory.to_errno(), libc::EISDIR);
        assert_eq!(FsError::BadHandle(3).to_errno(), libc::EBADF);
        assert_eq!(
            FsError::from(io::Error::from_raw_os_error(libc::ELOOP)).to_errno(),
            libc::ELOOP
        );
        assert_eq!(FsError::from(io::Error::other("boom")).to_errno(), libc::EIO);
    }
}
