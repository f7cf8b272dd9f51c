//! Shared test utilities for the simple-blog test suite.
//!
//! Provides content-tree builders for temp directories, an in-memory
//! [`Post`] factory, and lookup helpers that panic with a clear inventory
//! message on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_post(tmp.path(), "tech", "hello.md",
//!     "Title: Hello\nDate: 2024/01/01\n\nBody.");
//!
//! let posts = load::load(tmp.path(), &["tech".into()], "Joe").unwrap();
//! let post = find_post(&posts, "hello");
//! assert_eq!(post.title, "Hello");
//! ```

use crate::config::SiteConfig;
use crate::load::Post;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a post file at `<content_root>/<category>/<rel_path>`, creating
/// intermediate directories.
pub fn write_post(content_root: &Path, category: &str, rel_path: &str, source: &str) {
    let path = content_root.join(category).join(rel_path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, source).unwrap();
}

/// An in-memory post for index/paginate/render tests that don't need the
/// filesystem. Title equals the slug; everything optional is defaulted.
pub fn make_post(slug: &str, category: &str, date: &str) -> Post {
    Post {
        slug: slug.to_string(),
        category: category.to_string(),
        source_path: PathBuf::from(format!("content/{category}/{slug}.md")),
        title: slug.to_string(),
        date: date.to_string(),
        author: "Joe Bloggs".to_string(),
        description: String::new(),
        main_image: String::new(),
        local_styles: Vec::new(),
        global_styles: Vec::new(),
        body: format!("<p>Body of {slug}.</p>"),
        assets_path: None,
    }
}

/// A [`SiteConfig`] with every path rooted inside a temp directory.
pub fn site_config_for(tmp: &TempDir) -> SiteConfig {
    SiteConfig {
        content_dir: tmp.path().join("content").to_string_lossy().to_string(),
        themes_dir: tmp.path().join("themes").to_string_lossy().to_string(),
        output_dir: tmp.path().join("output").to_string_lossy().to_string(),
        ..SiteConfig::default()
    }
}

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(posts: &'a [Post], slug: &str) -> &'a Post {
    posts.iter().find(|p| p.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        panic!("post '{slug}' not found. Available: {slugs:?}")
    })
}
