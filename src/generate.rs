//! Site generation: the full pipeline driver.
//!
//! Runs the stages in order — load, index, render — and owns all output
//! I/O. The pipeline is an explicit two-phase build: posts are loaded once,
//! the index is built once, and every later step takes the finished
//! [`SiteIndex`] as input. There is no lazy re-sorting and no state carried
//! between runs; the output tree is cleared up front and rebuilt in full.
//!
//! ## Output Structure
//!
//! ```text
//! output/
//! ├── index.html                 # Home feed, page 0
//! ├── page1.html                 # Home feed, further pages
//! ├── static/                    # Mirrored theme assets
//! │   └── ...
//! ├── tech/                      # Category listing (lower-cased name)
//! │   ├── index.html
//! │   └── page1.html
//! ├── first-post/                # One directory per post
//! │   └── index.html
//! └── rust-tips/
//!     ├── index.html
//!     ├── diagram.png            # Mirrored post assets (*.md excluded)
//!     └── extra.css
//! ```
//!
//! ## Parallelism
//!
//! Post pages are rendered and written in parallel via
//! [rayon](https://docs.rs/rayon): slugs are unique, so every page touches
//! a distinct path, and rendering reads only the immutable index.

use crate::config::SiteConfig;
use crate::index::{self, IndexError, SiteIndex};
use crate::load::{self, LoadError};
use crate::paginate::{self, Page, PaginateError};
use crate::render::{self, PostSummary, SiteContext};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Paginate(#[from] PaginateError),
}

/// What a run produced, for CLI output.
#[derive(Debug)]
pub struct GenerateSummary {
    pub post_pages: usize,
    /// (category, listing page count) in navigation order.
    pub category_pages: Vec<(String, usize)>,
    pub home_pages: usize,
}

/// Run the full pipeline: load content, build the index, clear the output
/// directory, mirror assets, and write every page.
pub fn generate(config: &SiteConfig) -> Result<GenerateSummary, GenerateError> {
    let index = build_index(config)?;

    let output_dir = Path::new(&config.output_dir);
    // Clearing must finish before any write begins
    clean_output(output_dir)?;

    copy_static_assets(config, output_dir)?;
    copy_post_assets(&index, output_dir)?;

    let copyright = config.copyright_line();
    let site = SiteContext {
        site_name: &config.site_name,
        site_description: &config.site_description,
        copyright: &copyright,
        categories: &index.categories,
    };

    let post_pages = generate_post_pages(&index, &site, output_dir)?;
    let category_pages = generate_category_pages(config, &index, &site, output_dir)?;
    let home_pages = generate_home_pages(config, &index, &site, output_dir)?;

    Ok(GenerateSummary {
        post_pages,
        category_pages,
        home_pages,
    })
}

/// Load and index content without writing anything (the `check` command).
pub fn build_index(config: &SiteConfig) -> Result<SiteIndex, GenerateError> {
    let content_dir = Path::new(&config.content_dir);
    let categories = load::discover_categories(content_dir)?;
    let posts = load::load(content_dir, &categories, &config.default_author)?;
    let index = index::build(posts, &categories, &config.date_format)?;
    Ok(index)
}

/// Clear the output directory's contents, creating it if absent.
///
/// The directory itself is kept so a shell sitting in it doesn't break.
fn clean_output(output_dir: &Path) -> Result<(), GenerateError> {
    if output_dir.is_dir() {
        for entry in fs::read_dir(output_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
    } else {
        fs::create_dir_all(output_dir)?;
    }
    Ok(())
}

/// Mirror the theme's static assets into `output/static`.
///
/// A theme without a static directory is fine — the base stylesheet is
/// embedded in every page.
fn copy_static_assets(config: &SiteConfig, output_dir: &Path) -> Result<(), GenerateError> {
    let static_dir = config.static_dir();
    if static_dir.is_dir() {
        copy_dir_recursive(&static_dir, &output_dir.join("static"), None)?;
    }
    Ok(())
}

/// Mirror each post's assets directory into `output/<slug>/`.
///
/// Markdown sources are excluded — the post itself becomes `index.html`.
/// Posts without assets still get their output directory here, so the
/// page-writing phase never creates directories.
fn copy_post_assets(index: &SiteIndex, output_dir: &Path) -> Result<(), GenerateError> {
    for post in &index.posts {
        let post_dir = output_dir.join(&post.slug);
        match &post.assets_path {
            Some(assets) => copy_dir_recursive(assets, &post_dir, Some("md"))?,
            None => fs::create_dir_all(&post_dir)?,
        }
    }
    Ok(())
}

/// Recursively copy a directory, optionally skipping files by extension.
fn copy_dir_recursive(src: &Path, dst: &Path, skip_ext: Option<&str>) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path, skip_ext)?;
        } else {
            let skip = skip_ext.is_some_and(|ext| {
                src_path
                    .extension()
                    .map(|e| e.eq_ignore_ascii_case(ext))
                    .unwrap_or(false)
            });
            if !skip {
                fs::copy(&src_path, &dst_path)?;
            }
        }
    }
    Ok(())
}

/// Write `output/<slug>/index.html` for every post, in parallel.
fn generate_post_pages(
    index: &SiteIndex,
    site: &SiteContext,
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    index
        .posts
        .par_iter()
        .map(|post| {
            let html = render::render_post_page(site, post);
            let path = output_dir.join(&post.slug).join("index.html");
            fs::write(path, html.into_string())
        })
        .collect::<Result<(), _>>()?;
    Ok(index.posts.len())
}

/// Write every page of every visible category listing.
fn generate_category_pages(
    config: &SiteConfig,
    index: &SiteIndex,
    site: &SiteContext,
    output_dir: &Path,
) -> Result<Vec<(String, usize)>, GenerateError> {
    let mut counts = Vec::new();

    for category in &index.categories {
        // Visible categories always have a group
        let group = index.group(category).unwrap();
        let category_dir = output_dir.join(category.to_lowercase());
        fs::create_dir_all(&category_dir)?;

        let pages = paginate::paginate(group.len(), config.category_page_size);
        for page in &pages {
            let entries = paginate::recent(group, config.category_page_size, page.offset)?;
            let summaries: Vec<PostSummary> = entries
                .iter()
                .map(|e| PostSummary::from_post(index.post(*e)))
                .collect();

            let html = render::render_category_page(
                site,
                category,
                &summaries,
                page.previous.as_deref(),
                page.next.as_deref(),
            );
            fs::write(category_dir.join(&page.file_name), html.into_string())?;
        }
        counts.push((category.clone(), pages.len()));
    }

    Ok(counts)
}

/// Write every page of the home feed from the global group.
fn generate_home_pages(
    config: &SiteConfig,
    index: &SiteIndex,
    site: &SiteContext,
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    let pages: Vec<Page> = paginate::paginate(index.all.len(), config.home_page_size);
    for page in &pages {
        let entries = &index.all.entries()[page.offset..page.offset + page.len];
        let summaries: Vec<PostSummary> = entries
            .iter()
            .map(|e| PostSummary::from_post(index.post(*e)))
            .collect();

        let html = render::render_home_page(
            site,
            &summaries,
            page.previous.as_deref(),
            page.next.as_deref(),
        );
        fs::write(output_dir.join(&page.file_name), html.into_string())?;
    }
    Ok(pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{site_config_for, write_post};
    use tempfile::TempDir;

    /// Build a small sample site: tech (3 posts), life (1 post).
    fn sample_site(tmp: &TempDir) -> SiteConfig {
        let content = tmp.path().join("content");
        write_post(
            &content,
            "tech",
            "alpha.md",
            "Title: Alpha\nDate: 2024/01/01\n\nAlpha body.",
        );
        write_post(
            &content,
            "tech",
            "beta.md",
            "Title: Beta\nDate: 2024/01/03\n\nBeta body.",
        );
        write_post(
            &content,
            "tech",
            "gamma.md",
            "Title: Gamma\nDate: 2024/01/02\n\nGamma body.",
        );
        write_post(
            &content,
            "life",
            "delta.md",
            "Title: Delta\nDate: 2024/01/05\n\nDelta body.",
        );
        let mut config = site_config_for(tmp);
        config.category_page_size = 2;
        config.home_page_size = 2;
        config
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
    }

    #[test]
    fn generates_full_output_tree() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);

        let summary = generate(&config).unwrap();
        assert_eq!(summary.post_pages, 4);
        assert_eq!(
            summary.category_pages,
            vec![("life".to_string(), 1), ("tech".to_string(), 2)]
        );
        assert_eq!(summary.home_pages, 2);

        let out = tmp.path().join("output");
        assert!(out.join("index.html").is_file());
        assert!(out.join("page1.html").is_file());
        assert!(out.join("tech/index.html").is_file());
        assert!(out.join("tech/page1.html").is_file());
        assert!(out.join("life/index.html").is_file());
        assert!(out.join("alpha/index.html").is_file());
        assert!(out.join("delta/index.html").is_file());
    }

    #[test]
    fn category_pages_hold_newest_first_windows() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);
        generate(&config).unwrap();

        let out = tmp.path().join("output");
        // tech page 0: Beta (01/03), Gamma (01/02); page 1: Alpha (01/01)
        let page0 = read(&out.join("tech/index.html"));
        assert!(page0.contains("Beta"));
        assert!(page0.contains("Gamma"));
        assert!(!page0.contains("Alpha"));

        let page1 = read(&out.join("tech/page1.html"));
        assert!(page1.contains("Alpha"));
        assert!(!page1.contains("Beta"));
    }

    #[test]
    fn home_feed_spans_categories() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);
        generate(&config).unwrap();

        // Home page 0: Delta (01/05, life) then Beta (01/03, tech)
        let home = read(&tmp.path().join("output/index.html"));
        assert!(home.contains("Delta"));
        assert!(home.contains("Beta"));
        assert!(!home.contains("Gamma"));
        assert!(home.contains(r#"href="page1.html""#));
    }

    #[test]
    fn post_page_contains_rendered_body() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);
        generate(&config).unwrap();

        let page = read(&tmp.path().join("output/alpha/index.html"));
        assert!(page.contains("Alpha body."));
        assert!(page.contains("<title>Alpha</title>"));
    }

    #[test]
    fn empty_category_invisible_in_output_and_nav() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);
        fs::create_dir_all(tmp.path().join("content/drafts")).unwrap();

        generate(&config).unwrap();

        let out = tmp.path().join("output");
        assert!(!out.join("drafts").exists());
        let home = read(&out.join("index.html"));
        assert!(!home.contains("drafts"));
    }

    #[test]
    fn output_cleared_between_runs() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);

        let out = tmp.path().join("output");
        fs::create_dir_all(out.join("stale-dir")).unwrap();
        fs::write(out.join("stale.html"), "old").unwrap();

        generate(&config).unwrap();
        assert!(!out.join("stale.html").exists());
        assert!(!out.join("stale-dir").exists());
        assert!(out.join("index.html").is_file());
    }

    #[test]
    fn post_assets_mirrored_without_markdown() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);
        let assets = tmp.path().join("content/tech/epsilon");
        fs::create_dir_all(&assets).unwrap();
        fs::write(
            assets.join("epsilon.md"),
            "Title: Epsilon\nDate: 2024/01/04\n\nx",
        )
        .unwrap();
        fs::write(assets.join("photo.png"), "fake image").unwrap();
        fs::write(assets.join("extra.css"), "body {}").unwrap();

        generate(&config).unwrap();

        let post_dir = tmp.path().join("output/epsilon");
        assert!(post_dir.join("photo.png").is_file());
        assert!(post_dir.join("extra.css").is_file());
        assert!(!post_dir.join("epsilon.md").exists());
        assert!(post_dir.join("index.html").is_file());
    }

    #[test]
    fn theme_static_assets_mirrored() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);
        let static_dir = tmp.path().join("themes/basic/static");
        fs::create_dir_all(static_dir.join("fonts")).unwrap();
        fs::write(static_dir.join("typography.css"), "body {}").unwrap();
        fs::write(static_dir.join("fonts/serif.woff2"), "fake font").unwrap();

        generate(&config).unwrap();

        let out = tmp.path().join("output/static");
        assert!(out.join("typography.css").is_file());
        assert!(out.join("fonts/serif.woff2").is_file());
    }

    #[test]
    fn duplicate_slug_aborts_before_writing() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);
        write_post(
            &tmp.path().join("content"),
            "life",
            "Alpha.md",
            "Title: Clash\nDate: 2024/01/06\n\nx",
        );

        let result = generate(&config);
        assert!(matches!(result, Err(GenerateError::Load(_))));
        // Nothing was written: clearing happens after a successful index build
        assert!(!tmp.path().join("output/index.html").exists());
    }

    #[test]
    fn unparsable_date_aborts() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);
        write_post(
            &tmp.path().join("content"),
            "life",
            "bad-date.md",
            "Title: Bad\nDate: tomorrow\n\nx",
        );

        let result = generate(&config);
        assert!(matches!(result, Err(GenerateError::Index(_))));
    }

    #[test]
    fn check_builds_index_without_output() {
        let tmp = TempDir::new().unwrap();
        let config = sample_site(&tmp);

        let index = build_index(&config).unwrap();
        assert_eq!(index.posts.len(), 4);
        assert_eq!(index.categories, vec!["life", "tech"]);
        assert!(!tmp.path().join("output").exists());
    }
}
