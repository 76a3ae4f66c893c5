use std::path::Path;
use std::sync::Arc;

use console::style;
use inquire::{Select, Text};
use mediaview::{MediaLibrary, VirtualPath};

use crate::commands;
use crate::error::Result;
use crate::utils;

const MENU_OPTIONS: &[&str] = &[
    "📂 Browse library",
    "🌳 Show virtual tree",
    "🔎 Resolve a path",
    "📊 Show statistics",
    "❌ Exit",
];

const GO_UP: &str = "⬆️  ..";
const BACK_TO_MENU: &str = "↩️  Back to menu";

pub fn run(root: &Path) -> Result<()> {
    utils::print_welcome(root);

    let library = Arc::new(commands::load_library(root)?);
    commands::report_skipped(&library);

    loop {
        println!();
        let choice = Select::new("What would you like to do?", MENU_OPTIONS.to_vec()).prompt()?;

        match choice {
            "📂 Browse library" => {
                if let Err(e) = handle_browse(&library) {
                    utils::print_error(&format!("Failed to browse library: {}", e));
                }
            }
            "🌳 Show virtual tree" => {
                if let Err(e) = handle_tree(&library) {
                    utils::print_error(&format!("Failed to show tree: {}", e));
                }
            }
            "🔎 Resolve a path" => {
                if let Err(e) = handle_resolve(&library) {
                    utils::print_error(&format!("Failed to resolve path: {}", e));
                }
            }
            "📊 Show statistics" => commands::stats::show(&library),
            "❌ Exit" => {
                utils::print_success("Goodbye! 👋");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Walks the virtual hierarchy one directory at a time. Picking a title
/// lists the real directory behind it.
fn handle_browse(library: &Arc<MediaLibrary>) -> Result<()> {
    println!("\n{}", style("📂 Browse Library").bold().green());

    let mut current = VirtualPath::root();
    loop {
        let Some(children) = library.list_children(&current) else {
            commands::ls::show(library.clone(), &current)?;
            current = current.parent().unwrap_or_else(VirtualPath::root);
            continue;
        };

        let mut options = Vec::with_capacity(children.len() + 2);
        if !current.is_root() {
            options.push(GO_UP.to_string());
        }
        options.extend(children.iter().cloned());
        options.push(BACK_TO_MENU.to_string());

        let choice = Select::new(current.as_str(), options).prompt()?;
        match choice.as_str() {
            BACK_TO_MENU => return Ok(()),
            GO_UP => current = current.parent().unwrap_or_else(VirtualPath::root),
            name => current = current.join(name),
        }
    }
}

fn handle_tree(library: &MediaLibrary) -> Result<()> {
    println!("\n{}", style("🌳 Virtual Tree").bold().green());

    let path = Text::new("Start at:")
        .with_default("/")
        .with_help_message("A virtual directory, e.g. /Movies/byGenre")
        .prompt()?;

    let depth = Text::new("Maximum depth:")
        .with_default("3")
        .with_help_message("How deep to show the tree")
        .prompt()?;

    let depth: usize = depth.parse().unwrap_or(3);

    commands::tree::show(library, &VirtualPath::new(&path), depth)
}

fn handle_resolve(library: &MediaLibrary) -> Result<()> {
    println!("\n{}", style("🔎 Resolve a Path").bold().cyan());

    let path = Text::new("Virtual path:")
        .with_help_message("e.g. /Movies/byTitle/Inception/Inception.mkv")
        .prompt()?;

    commands::resolve::show(library, &VirtualPath::new(&path));
    Ok(())
}
