use std::path::Path;

use console::{Emoji, measure_text_width, style};

pub static CLAPPER: Emoji<'_, '_> = Emoji("🎬 ", "");

const RULE_WIDTH: usize = 60;

/// Draws `lines` centered inside a double-line box sized to the widest one.
fn boxed(lines: &[&str]) -> Vec<String> {
    let inner = lines.iter().map(|line| measure_text_width(line)).max().unwrap_or(0) + 8;
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("╔{}╗", "═".repeat(inner)));
    for line in lines {
        let pad = inner - measure_text_width(line);
        let left = pad / 2;
        out.push(format!("║{}{line}{}║", " ".repeat(left), " ".repeat(pad - left)));
    }
    out.push(format!("╚{}╝", "═".repeat(inner)));
    out
}

pub fn print_welcome(root: &Path) {
    let title = format!("{CLAPPER}MEDIAVIEW");
    for line in boxed(&[&title, "Movies and TV Shows by title and genre"]) {
        println!("{}", style(line).cyan());
    }
    println!("{} {}", style("Library:").dim(), style(root.display()).bold());
}

pub fn print_success(message: &str) {
    println!("{} {}", style("✅").green(), style(message).green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", style("❌").red(), style(message).red());
}

pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ️").blue(), style(message).blue());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("⚠️").yellow(), style(message).yellow());
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    match unit {
        0 => format!("{bytes} B"),
        _ => format!("{size:.2} {}", UNITS[unit]),
    }
}

/// Section title between two rules, the rule at least as wide as the title.
pub fn print_header(title: &str) {
    let rule = "─".repeat(RULE_WIDTH.max(measure_text_width(title)));
    println!();
    println!("{}", style(&rule).dim());
    println!("{}", style(title).bold().cyan());
    println!("{}", style(&rule).dim());
}
