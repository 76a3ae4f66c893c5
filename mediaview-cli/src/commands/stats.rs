use std::path::Path;

use mediaview::MediaLibrary;
use mediaview::stats::{self, NamespaceStats};
use tabled::{Table, Tabled};

use crate::error::Result;
use crate::utils;

#[derive(Tabled)]
struct Metric {
    #[tabled(rename = "Metric")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: usize,
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    label: String,
    #[tabled(rename = "Titles")]
    titles: usize,
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Type")]
    label: String,
    #[tabled(rename = "View")]
    view: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Titles")]
    titles: usize,
}

pub fn execute(root: &Path, json: bool) -> Result<()> {
    let library = super::load_library(root)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats::collect(&library))?);
        return Ok(());
    }
    show(&library);
    Ok(())
}

pub fn show(library: &MediaLibrary) {
    utils::print_header(&format!("Statistics for {}", library.root().display()));
    let stats = stats::collect(library);

    println!("{}", Table::new(summary(&stats)));

    if stats.titles_by_type.is_empty() {
        println!();
        utils::print_info("No titles found.");
        return;
    }

    let types: Vec<TypeRow> = stats
        .titles_by_type
        .iter()
        .map(|(label, titles)| TypeRow {
            label: label.clone(),
            titles: *titles,
        })
        .collect();
    println!();
    println!("{}", Table::new(types));

    if !stats.tag_values.is_empty() {
        let tags: Vec<TagRow> = stats
            .tag_values
            .into_iter()
            .map(|row| TagRow {
                label: row.label,
                view: row.view,
                value: row.value,
                titles: row.titles,
            })
            .collect();
        println!();
        println!("{}", Table::new(tags));
    }
}

fn summary(stats: &NamespaceStats) -> Vec<Metric> {
    vec![
        Metric { name: "Titles", value: stats.records },
        Metric { name: "Skipped documents", value: stats.skipped },
        Metric { name: "Title collisions", value: stats.collisions },
        Metric { name: "Virtual leaves", value: stats.leaves },
        Metric { name: "Virtual directories", value: stats.internal_nodes },
    ]
}
