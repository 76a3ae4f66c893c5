use std::path::Path;
use std::sync::Arc;

use mediaview::fuse::{FileType, MediaviewFs, Node};
use mediaview::{Classification, MediaLibrary, VirtualPath};
use tabled::{Table, Tabled};

use crate::error::Result;
use crate::utils;

#[derive(Tabled)]
struct EntryInfo {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Real path")]
    target: String,
}

fn kind_label(kind: FileType) -> &'static str {
    match kind {
        FileType::Directory => "dir",
        FileType::RegularFile => "file",
        FileType::Symlink => "link",
        _ => "special",
    }
}

pub fn execute(root: &Path, path: &str) -> Result<()> {
    let library = Arc::new(super::load_library(root)?);
    show(library, &VirtualPath::new(path))
}

pub fn show(library: Arc<MediaLibrary>, path: &VirtualPath) -> Result<()> {
    utils::print_header(&format!("Contents of {path}"));

    let fs = MediaviewFs::new(library.clone());
    let mut entries = Vec::new();
    for entry in fs.entries_of(path)? {
        if entry.name == "." || entry.name == ".." {
            continue;
        }
        let child = path.join(&entry.name);
        let size = match fs.stat(&child) {
            Ok(Node::Real(metadata)) if metadata.is_file() => utils::format_size(metadata.len()),
            _ => "-".to_string(),
        };
        let target = match library.classify(&child) {
            Classification::Leaf(leaf) if leaf.suffix.is_empty() => leaf.base.display().to_string(),
            _ => String::new(),
        };
        entries.push(EntryInfo {
            name: entry.name,
            kind: kind_label(entry.kind),
            size,
            target,
        });
    }

    if entries.is_empty() {
        utils::print_info("Nothing here.");
    } else {
        let len = entries.len();
        println!("{}", Table::new(entries));
        println!();
        utils::print_info(&format!("{len} entries"));
    }

    Ok(())
}
