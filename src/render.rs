//! HTML templates for the three page kinds.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! the three "named templates" of the site are the three render functions
//! here, and their data bindings are the typed argument structs. Template
//! variables are Rust expressions, malformed HTML is a build error, and all
//! interpolation is auto-escaped.
//!
//! Every page shares [`base_document`] and [`site_header`]: site name,
//! category navigation (only visible categories appear), and a copyright
//! footer. Listing pages additionally get previous/next links and a list of
//! post summaries; post pages get the full rendered body plus the post's
//! requested stylesheets.
//!
//! ## Link Scheme
//!
//! All hrefs are root-absolute: `/{slug}/` for posts, `/{category}/` for
//! listings, `/static/...` for theme assets. Local stylesheets are the one
//! exception — they live in the post's own output directory, so a bare
//! relative href resolves correctly from `/{slug}/index.html`.

use crate::load::Post;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../static/style.css");

/// Logical scope of a page: the home feed or one category's pages.
///
/// An explicit enum rather than a "home" sentinel string, so the home feed
/// can never collide with a real category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Home,
    Category(String),
}

/// Site-wide values present in every page's data binding.
#[derive(Debug, Clone)]
pub struct SiteContext<'a> {
    pub site_name: &'a str,
    pub site_description: &'a str,
    pub copyright: &'a str,
    /// Visible categories, for navigation.
    pub categories: &'a [String],
}

/// One post's entry in a listing page.
#[derive(Debug, Clone)]
pub struct PostSummary<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub date: &'a str,
    pub author: &'a str,
    pub description: &'a str,
    pub main_image: &'a str,
}

impl<'a> PostSummary<'a> {
    pub fn from_post(post: &'a Post) -> Self {
        Self {
            title: &post.title,
            slug: &post.slug,
            date: &post.date,
            author: &post.author,
            description: &post.description,
            main_image: &post.main_image,
        }
    }
}

/// Renders the base HTML document structure.
fn base_document(title: &str, description: &str, extra_head: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !description.is_empty() {
                    meta name="description" content=(description);
                }
                title { (title) }
                style { (CSS) }
                (extra_head)
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header: site name plus category navigation.
fn site_header(site: &SiteContext, scope: &Scope) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (site.site_name) }
            nav.category-nav {
                ul {
                    @for category in site.categories {
                        @let is_current = matches!(scope, Scope::Category(c) if c == category);
                        li class=[is_current.then_some("current")] {
                            a href={ "/" (category.to_lowercase()) "/" } { (category) }
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(site: &SiteContext) -> Markup {
    html! {
        footer.site-footer {
            p { (site.copyright) }
        }
    }
}

/// Renders the previous/newer and next/older links of a listing page.
fn pager(previous: Option<&str>, next: Option<&str>) -> Markup {
    html! {
        nav.pager {
            @if let Some(prev) = previous {
                a.newer href=(prev) { "‹ Newer posts" }
            } @else {
                span {}
            }
            @if let Some(next) = next {
                a.older href=(next) { "Older posts ›" }
            } @else {
                span {}
            }
        }
    }
}

/// Renders one post summary card in a listing.
fn summary_card(post: &PostSummary) -> Markup {
    html! {
        li.post-summary {
            h2 {
                a href={ "/" (post.slug) "/" } { (post.title) }
            }
            p.post-meta { (post.date) " · " (post.author) }
            @if !post.main_image.is_empty() {
                a href={ "/" (post.slug) "/" } {
                    img.main-image src={ "/" (post.slug) "/" (post.main_image) } alt=(post.title) loading="lazy";
                }
            }
            @if !post.description.is_empty() {
                p { (post.description) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a single post's page.
pub fn render_post_page(site: &SiteContext, post: &Post) -> Markup {
    let scope = Scope::Category(post.category.clone());

    let extra_head = html! {
        @if !post.main_image.is_empty() {
            meta property="og:image" content={ "/" (post.slug) "/" (post.main_image) };
        }
        @for style in &post.global_styles {
            link rel="stylesheet" href={ "/static/" (style) };
        }
        @for style in &post.local_styles {
            link rel="stylesheet" href=(style);
        }
    };

    let content = html! {
        (site_header(site, &scope))
        main {
            article.post-body {
                h1 { (post.title) }
                p.post-meta { (post.date) " · " (post.author) }
                (PreEscaped(post.body.as_str()))
            }
        }
        (site_footer(site))
    };

    base_document(&post.title, &post.description, extra_head, content)
}

/// Renders one page of a category listing.
pub fn render_category_page(
    site: &SiteContext,
    category: &str,
    posts: &[PostSummary],
    previous: Option<&str>,
    next: Option<&str>,
) -> Markup {
    let scope = Scope::Category(category.to_string());
    let description = format!("Posts about {category}.");

    let content = html! {
        (site_header(site, &scope))
        main {
            h1 { (category) }
            ul.post-list {
                @for post in posts {
                    (summary_card(post))
                }
            }
            (pager(previous, next))
        }
        (site_footer(site))
    };

    base_document(category, &description, html! {}, content)
}

/// Renders one page of the home feed.
pub fn render_home_page(
    site: &SiteContext,
    posts: &[PostSummary],
    previous: Option<&str>,
    next: Option<&str>,
) -> Markup {
    let content = html! {
        (site_header(site, &Scope::Home))
        main {
            ul.post-list {
                @for post in posts {
                    (summary_card(post))
                }
            }
            (pager(previous, next))
        }
        (site_footer(site))
    };

    base_document(site.site_name, site.site_description, html! {}, content)
}
