use std::fs::{self, FileType as StdFileType};
use std::os::unix::fs::{FileTypeExt, MetadataExt};

use fuser::{FileAttr, FileType};

use crate::library::{RootAttributes, unix_time};

/// Write permission for owner, group and others.
pub const WRITE_BITS: u32 = 0o222;

const BLOCK_SIZE: u32 = 512;

pub fn file_type(file_type: StdFileType) -> FileType {
    if file_type.is_dir() {
        FileType::Directory
    } else if file_type.is_symlink() {
        FileType::Symlink
    } else if file_type.is_block_device() {
        FileType::BlockDevice
    } else if file_type.is_char_device() {
        FileType::CharDevice
    } else if file_type.is_fifo() {
        FileType::NamedPipe
    } else if file_type.is_socket() {
        FileType::Socket
    } else {
        FileType::RegularFile
    }
}

/// Attributes of a real entry with every write bit cleared.
pub fn real_attr(ino: u64, metadata: &fs::Metadata) -> FileAttr {
    FileAttr {
        ino,
        size: metadata.size(),
        blocks: metadata.blocks(),
        atime: unix_time(metadata.atime(), metadata.atime_nsec()),
        mtime: unix_time(metadata.mtime(), metadata.mtime_nsec()),
        ctime: unix_time(metadata.ctime(), metadata.ctime_nsec()),
        crtime: metadata.created().unwrap_or(unix_time(metadata.ctime(), metadata.ctime_nsec())),
        kind: file_type(metadata.file_type()),
        perm: (metadata.mode() & 0o7777 & !WRITE_BITS) as u16,
        nlink: metadata.nlink() as u32,
        uid: metadata.uid(),
        gid: metadata.gid(),
        rdev: metadata.rdev() as u32,
        blksize: metadata.blksize() as u32,
        flags: 0,
    }
}

/// Attributes of a synthetic directory.
pub fn virtual_dir_attr(ino: u64, root: &RootAttributes) -> FileAttr {
    FileAttr {
        ino,
        size: root.size,
        blocks: 0,
        atime: root.accessed,
        mtime: root.modified,
        ctime: root.changed,
        crtime: root.changed,
        kind: FileType::Directory,
        perm: (root.mode & 0o7777) as u16,
        nlink: root.nlink as u32,
        uid: root.uid,
        gid: root.gid,
        rdev: 0,
        blksize: BLOCK_SIZE,
        flags: 0,
    }
}

#[cfg(test)]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_real_attr_masks_write_bits() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("movie.mkv");
        fs::write(&file, b"0123456789").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o664)).unwrap();

        let attr = real_attr(7, &fs::symlink_metadata(&file).unwrap());
        assert_eq!(attr.ino, 7);
        assert_eq!(attr.size, 10);
        assert_eq!(attr.kind, FileType::RegularFile);
        assert_eq!(attr.perm, 0o444);
    }

    #[test]
    fn test_real_attr_keeps_symlink_kind() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("target", &link).unwrap();
        let attr = real_attr(3, &fs::symlink_metadata(&link).unwrap());
        assert_eq!(attr.kind, FileType::Symlink);
        assert_eq!(attr.perm & 0o222, 0);
    }

    #[test]
    fn test_virtual_dir_attr() {
        let dir = TempDir::new().unwrap();
        let root = RootAttributes::from_metadata(&fs::metadata(dir.path()).unwrap());
        let attr = virtual_dir_attr(5, &root);
        assert_eq!(attr.ino, 5);
        assert_eq!(attr.kind, FileType::Directory);
        assert_eq!(attr.perm, 0o555);
        assert_eq!(attr.uid, root.uid);
        assert_eq!(attr.mtime, root.modified);
    }
}
