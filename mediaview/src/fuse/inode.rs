use std::collections::HashMap;

use fuser::FUSE_ROOT_ID;

use crate::vpath::VirtualPath;

/// Bidirectional inode <-> virtual path mapping.
///
/// The root is always [`FUSE_ROOT_ID`]. Numbers are handed out on first
/// sight of a path and never reused, so a path keeps its inode for the life
/// of the mount.
///
/// `forget` is not handled, so the table only grows. It holds at most one
/// entry per virtual path the kernel has looked up or listed.
#[derive(Debug)]
pub struct InodeTable {
    by_path: HashMap<VirtualPath, u64>,
    by_inode: HashMap<u64, VirtualPath>,
    next_inode: u64,
}

impl InodeTable {
    pub fn new() -> Self {
        let mut table = Self {
            by_path: HashMap::new(),
            by_inode: HashMap::new(),
            next_inode: FUSE_ROOT_ID + 1,
        };
        table.by_path.insert(VirtualPath::root(), FUSE_ROOT_ID);
        table.by_inode.insert(FUSE_ROOT_ID, VirtualPath::root());
        table
    }

    pub fn get_or_assign(&mut self, path: &VirtualPath) -> u64 {
        if let Some(&ino) = self.by_path.get(path) {
            return ino;
        }
        let ino = self.next_inode;
        self.next_inode += 1;
        self.by_path.insert(path.clone(), ino);
        self.by_inode.insert(ino, path.clone());
        ino
    }

    pub fn inode(&self, path: &VirtualPath) -> Option<u64> {
        self.by_path.get(path).copied()
    }

    pub fn path(&self, ino: u64) -> Option<&VirtualPath> {
        self.by_inode.get(&ino)
    }

    pub fn len(&self) -> usize {
        self.by_inode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_inode.is_empty()
    }
}

impl Default for InodeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_reserved() {
        let table = InodeTable::new();
        assert_eq!(table.inode(&VirtualPath::root()), Some(FUSE_ROOT_ID));
        assert_eq!(table.path(FUSE_ROOT_ID), Some(&VirtualPath::root()));
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_assignment_is_stable() {
        let mut table = InodeTable::new();
        let movies = VirtualPath::new("/Movies");
        let shows = VirtualPath::new("/TV Shows");

        let a = table.get_or_assign(&movies);
        let b = table.get_or_assign(&shows);
        assert_eq!(a, FUSE_ROOT_ID + 1);
        assert_eq!(b, FUSE_ROOT_ID + 2);
        assert_eq!(table.get_or_assign(&movies), a);
        assert_eq!(table.path(b), Some(&shows));
        assert_eq!(table.path(42), None);
        assert_eq!(table.len(), 3);
    }
}
