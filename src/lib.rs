//! # Simple Blog
//!
//! A minimal static site generator for category-organized blogs. Your
//! filesystem is the data source: first-level directories under the content
//! root are categories, and markdown files anywhere beneath them are posts
//! with a `Key: value` metadata block up top.
//!
//! # Architecture: Two-Phase Pipeline
//!
//! Content is indexed once per run and every page is rendered from that
//! index:
//!
//! ```text
//! 1. Load      content/  →  Vec<Post>        (files → validated records)
//! 2. Index     posts     →  SiteIndex        (grouped, date-sorted)
//! 3. Generate  index     →  output/          (paginated HTML site)
//! ```
//!
//! The phases are explicit and ordered — the driver loads, then builds the
//! index, then renders; downstream stages take the finished index as input
//! rather than lazily triggering construction. Everything lives in memory
//! for the run and is discarded at the end; every run re-scans the full
//! content tree and rebuilds the output tree from scratch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`load`] | Walks category directories, parses posts, validates slugs/titles/dates |
//! | [`markdown`] | Metadata-block extraction and markdown → HTML conversion |
//! | [`index`] | Groups posts per category plus a global feed, sorted newest-first |
//! | [`paginate`] | Page windows, prev/next links, and the "recent N posts" query |
//! | [`render`] | Maud templates: post page, category listing, home feed |
//! | [`generate`] | Pipeline driver — output clearing, asset mirroring, page writing |
//! | [`config`] | `config.toml` loading, validation, stock config generation |
//! | [`output`] | CLI output formatting — content inventory and run summary |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Advantages:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions — no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! Themes therefore contribute static assets (stylesheets, fonts, images),
//! not template files.
//!
//! ## Slugs Are Global Identity
//!
//! A post's slug (file stem, lower-cased) names its output directory
//! `output/<slug>/`, so slugs must be unique across the whole content tree
//! regardless of category. The loader enforces this and aborts on the first
//! collision; every later stage relies on it, including the parallel page
//! writes that assume distinct output paths.
//!
//! ## Dates Parse Once
//!
//! Post dates are parsed into [`chrono`] values against the single
//! configured format when the index is built, and groups are ordered by the
//! parsed value. The original string is kept only for display. String
//! comparison never decides ordering, so `2024/1/9` vs `2024/01/10` style
//! surprises can't happen.
//!
//! ## Full Rebuilds Only
//!
//! The output directory is cleared at the start of every run. No
//! incremental regeneration, no state between runs: a generated site is
//! always a pure function of the content tree and config.

pub mod config;
pub mod generate;
pub mod index;
pub mod load;
pub mod markdown;
pub mod output;
pub mod paginate;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
