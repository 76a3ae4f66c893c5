use std::path::Path;

use mediaview::{Classification, MediaLibrary, VirtualPath};

use crate::error::Result;
use crate::utils;

pub fn execute(root: &Path, path: &str) -> Result<()> {
    let library = super::load_library(root)?;
    show(&library, &VirtualPath::new(path));
    Ok(())
}

pub fn show(library: &MediaLibrary, path: &VirtualPath) {
    match library.classify(path) {
        Classification::Internal => {
            let entries = library.list_children(path).map_or(0, |children| children.len());
            utils::print_info(&format!(
                "{path} is a virtual directory with {entries} entries"
            ));
        }
        Classification::Leaf(leaf) => {
            utils::print_success(&format!("{path} -> {}", leaf.real_path().display()));
            if !leaf.suffix.is_empty() {
                println!("  title directory: {}", leaf.base.display());
                println!("  below title:     {}", leaf.suffix);
            }
        }
        Classification::NotFound => {
            utils::print_error(&format!("{path} does not exist"));
        }
    }
}
