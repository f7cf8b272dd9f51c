//! CLI output formatting.
//!
//! Output is information-centric, not file-centric: the primary display for
//! every post is its title and date, with the source file shown as secondary
//! context via an indented `Source:` line. The inventory reads as a content
//! listing while still letting users trace entries back to files.
//!
//! ```text
//! tech (3 posts)
//!     001 Beta — 2024/01/03
//!         Source: content/tech/beta.md
//!     002 Gamma — 2024/01/02
//!         Source: content/tech/gamma.md
//!
//! Generated 4 post pages
//! Generated tech: 2 pages
//! Generated life: 1 page
//! Generated home feed: 2 pages
//! ```
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::generate::GenerateSummary;
use crate::index::SiteIndex;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format the loaded content inventory: visible categories with their
/// posts, newest first.
pub fn format_inventory(index: &SiteIndex) -> Vec<String> {
    let mut lines = Vec::new();

    for category in &index.categories {
        let group = index.group(category).unwrap();
        lines.push(format!("{} ({})", category, plural(group.len(), "post")));
        for (pos, entry) in group.entries().iter().enumerate() {
            let post = index.post(*entry);
            lines.push(format!(
                "    {} {} — {}",
                format_index(pos + 1),
                post.title,
                post.date
            ));
            lines.push(format!("        Source: {}", post.source_path.display()));
        }
    }

    lines
}

/// Format the generate summary: page counts per output area.
pub fn format_generate_summary(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Generated {}",
        plural(summary.post_pages, "post page")
    )];
    for (category, pages) in &summary.category_pages {
        lines.push(format!("Generated {}: {}", category, plural(*pages, "page")));
    }
    lines.push(format!(
        "Generated home feed: {}",
        plural(summary.home_pages, "page")
    ));
    lines
}

pub fn print_inventory(index: &SiteIndex) {
    for line in format_inventory(index) {
        println!("{line}");
    }
}

pub fn print_generate_summary(summary: &GenerateSummary) {
    for line in format_generate_summary(summary) {
        println!("{line}");
    }
}
