use std::path::Path;

use mediaview::{MediaLibrary, VirtualPath};

use crate::error::{MediaviewCliError, Result};
use crate::utils;

pub fn execute(root: &Path, path: &str, depth: usize) -> Result<()> {
    let library = super::load_library(root)?;
    show(&library, &VirtualPath::new(path), depth)
}

pub fn show(library: &MediaLibrary, path: &VirtualPath, depth: usize) -> Result<()> {
    let Some(tree) = library.namespace().render_tree(path, depth) else {
        return Err(MediaviewCliError::Input(format!(
            "{path} is not a virtual directory"
        )));
    };

    utils::print_header(&format!("Virtual Tree for {path}"));
    print!("{tree}");
    Ok(())
}
