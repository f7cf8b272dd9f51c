//! Content loading: category discovery and post parsing.
//!
//! First stage of the pipeline. Walks each category subtree of the content
//! directory, runs every markdown file through the converter, validates the
//! required metadata, and produces one [`Post`] record per document.
//!
//! ## Content Structure
//!
//! ```text
//! content/                         # Content root
//! ├── tech/                        # Category (first-level directory)
//! │   ├── first-post.md
//! │   ├── rust-tips/               # Assets dir named after the post
//! │   │   ├── rust-tips.md         # ...which may contain the post itself
//! │   │   ├── diagram.png
//! │   │   └── extra.css
//! │   └── benchmarks.md
//! │       (benchmarks/ as a sibling dir would also be its assets)
//! └── life/                        # Another category
//!     └── hiking.md
//! ```
//!
//! ## Identity and Validation
//!
//! A post's `slug` is its file stem, lower-cased. Slugs are the site's only
//! uniqueness invariant: they must be unique across the *whole* content
//! tree, not just within a category, because every post owns the output
//! directory `<output>/<slug>/`. A duplicate slug, a missing `title`, or a
//! missing `date` aborts the run — downstream stages assume all three hold
//! for every post.
//!
//! ## Parallelism
//!
//! Files parse independently, so parsing runs in parallel via
//! [rayon](https://docs.rs/rayon). Results are collected back in discovery
//! order and the slug-uniqueness check runs as a sequential pass, so which
//! duplicate gets reported is deterministic.

use crate::markdown;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("content directory has no categories: {0}")]
    NoCategories(PathBuf),
    #[error("duplicate post name '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("no title metadata specified in {0}")]
    MissingTitle(PathBuf),
    #[error("no date metadata specified in {0}")]
    MissingDate(PathBuf),
}

/// One loaded post: fixed-shape record built from a markdown file.
///
/// Optional metadata is resolved to documented defaults here, at the
/// converter boundary; the generic key/value mapping never leaves this
/// module.
#[derive(Debug, Clone)]
pub struct Post {
    /// Lower-cased file stem; unique across the whole content tree.
    pub slug: String,
    /// Name of the category directory the post was found under.
    pub category: String,
    /// Source file, for error messages and inventory output.
    pub source_path: PathBuf,
    /// Required `title` metadata.
    pub title: String,
    /// Required `date` metadata, kept raw for display; parsed by the
    /// index builder.
    pub date: String,
    /// `author` metadata, or the configured default author.
    pub author: String,
    /// `description` metadata, or empty.
    pub description: String,
    /// `main_image` metadata, or empty.
    pub main_image: String,
    /// `local_styles` metadata: stylesheets copied with the post's assets.
    pub local_styles: Vec<String>,
    /// `global_styles` metadata: stylesheets under the theme's static dir.
    pub global_styles: Vec<String>,
    /// Rendered HTML body.
    pub body: String,
    /// Directory of attachments owned by this post, if any. Read-only.
    pub assets_path: Option<PathBuf>,
}

/// Discover categories: the first-level subdirectories of the content root.
///
/// Hidden directories are skipped. Returned sorted by name so discovery
/// order is deterministic. At least one category must exist.
pub fn discover_categories(content_dir: &Path) -> Result<Vec<String>, LoadError> {
    let mut categories: Vec<String> = fs::read_dir(content_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| !name.starts_with('.'))
        .collect();
    categories.sort();

    if categories.is_empty() {
        return Err(LoadError::NoCategories(content_dir.to_path_buf()));
    }
    Ok(categories)
}

/// Load every post under the given categories.
///
/// Posts are returned in discovery order: categories in the given order,
/// files sorted by path within each category. Fails on the first duplicate
/// slug or missing required metadata.
pub fn load(
    content_dir: &Path,
    categories: &[String],
    default_author: &str,
) -> Result<Vec<Post>, LoadError> {
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for category in categories {
        let category_dir = content_dir.join(category);
        for path in post_file_paths(&category_dir)? {
            files.push((category.clone(), path));
        }
    }

    // Parse in parallel; collect preserves input order on success
    let posts: Vec<Post> = files
        .par_iter()
        .map(|(category, path)| load_post(category, path, default_author))
        .collect::<Result<_, _>>()?;

    // Sequential uniqueness pass: deterministic duplicate reporting
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for post in &posts {
        if let Some(first) = seen.insert(&post.slug, &post.source_path) {
            return Err(LoadError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.to_path_buf(),
                second: post.source_path.clone(),
            });
        }
    }

    Ok(posts)
}

/// All markdown files under a category directory, sorted by path.
fn post_file_paths(category_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(category_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walk error"))
        })?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("md"))
                .unwrap_or(false)
        {
            paths.push(path.to_path_buf());
        }
    }
    Ok(paths)
}

/// Parse one markdown file into a [`Post`].
fn load_post(category: &str, path: &Path, default_author: &str) -> Result<Post, LoadError> {
    let slug = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let assets_path = resolve_assets_path(path, &slug);

    let source = fs::read_to_string(path)?;
    let (meta, body) = markdown::convert(&source);

    let first = |key: &str| meta.get(key).and_then(|v| v.first()).cloned();
    let all = |key: &str| meta.get(key).cloned().unwrap_or_default();

    let title = first("title").ok_or_else(|| LoadError::MissingTitle(path.to_path_buf()))?;
    let date = first("date").ok_or_else(|| LoadError::MissingDate(path.to_path_buf()))?;

    Ok(Post {
        slug,
        category: category.to_string(),
        source_path: path.to_path_buf(),
        title,
        date,
        author: first("author").unwrap_or_else(|| default_author.to_string()),
        description: first("description").unwrap_or_default(),
        main_image: first("main_image").unwrap_or_default(),
        local_styles: all("local_styles"),
        global_styles: all("global_styles"),
        body,
        assets_path,
    })
}

/// Resolve the assets directory associated with a post, if any.
///
/// Checked in order:
/// 1. The file's own parent directory, when its name equals the slug
///    (case-insensitively) — the "post in its own folder" layout.
/// 2. A sibling directory named exactly `slug`.
fn resolve_assets_path(post_path: &Path, slug: &str) -> Option<PathBuf> {
    let parent = post_path.parent()?;
    let parent_name = parent.file_name()?.to_string_lossy().to_lowercase();
    if parent_name == slug {
        return Some(parent.to_path_buf());
    }
    let sibling = parent.join(slug);
    if sibling.is_dir() {
        return Some(sibling);
    }
    None
}
