//! Index building: grouping and chronological ordering.
//!
//! Second stage of the pipeline and its synchronization point: it sees the
//! complete post collection at once, because category membership and the
//! global aggregate need full knowledge.
//!
//! Produces a [`SiteIndex`]:
//! - one [`OrderedGroup`] per category with at least one post,
//! - one synthetic global group holding every post (used only for the home
//!   feed — it is a separate field, never a navigable category),
//! - the narrowed list of visible categories, so later stages never iterate
//!   a category with nothing to show.
//!
//! Every post's `date` string is parsed here, once, against the configured
//! strftime format; an unparsable date is fatal and reported with the
//! offending slug and raw string. Groups are sorted newest-first with a
//! stable sort, so posts sharing a date keep their discovery order.

use crate::load::Post;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("unparsable date \"{raw}\" in post '{slug}' (expected format \"{format}\")")]
    DateParse {
        slug: String,
        raw: String,
        format: String,
    },
}

/// One entry of an ordered group: an index into [`SiteIndex::posts`] plus
/// the parsed date it was ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupEntry {
    pub post: usize,
    pub date: NaiveDateTime,
}

/// A named sequence of posts sorted by date descending.
#[derive(Debug, Clone)]
pub struct OrderedGroup {
    name: String,
    entries: Vec<GroupEntry>,
}

impl OrderedGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The built content index, held in memory for the duration of a run.
#[derive(Debug)]
pub struct SiteIndex {
    /// All posts, in discovery order. Group entries index into this.
    pub posts: Vec<Post>,
    /// Visible categories: the input category list narrowed to those with
    /// at least one post, original order preserved.
    pub categories: Vec<String>,
    /// Synthetic group over every post, for the paginated home feed.
    pub all: OrderedGroup,
    groups: BTreeMap<String, OrderedGroup>,
}

impl SiteIndex {
    /// The ordered group for a visible category.
    pub fn group(&self, category: &str) -> Option<&OrderedGroup> {
        self.groups.get(category)
    }

    pub fn post(&self, entry: GroupEntry) -> &Post {
        &self.posts[entry.post]
    }
}

/// Group posts by category, add the global aggregate, drop empty
/// categories, and sort every group newest-first.
pub fn build(
    posts: Vec<Post>,
    categories: &[String],
    date_format: &str,
) -> Result<SiteIndex, IndexError> {
    let mut groups: BTreeMap<String, OrderedGroup> = categories
        .iter()
        .map(|name| {
            (
                name.clone(),
                OrderedGroup {
                    name: name.clone(),
                    entries: Vec::new(),
                },
            )
        })
        .collect();
    let mut all = OrderedGroup {
        name: "all".to_string(),
        entries: Vec::new(),
    };

    for (idx, post) in posts.iter().enumerate() {
        let date = parse_date(&post.date, date_format).ok_or_else(|| IndexError::DateParse {
            slug: post.slug.clone(),
            raw: post.date.clone(),
            format: date_format.to_string(),
        })?;
        let entry = GroupEntry { post: idx, date };

        // Loader guarantees the category exists in the input list
        groups.get_mut(&post.category).unwrap().entries.push(entry);
        all.entries.push(entry);
    }

    // Drop categories that ended up empty; keep input order for the rest
    groups.retain(|_, group| !group.entries.is_empty());
    let categories: Vec<String> = categories
        .iter()
        .filter(|name| groups.contains_key(*name))
        .cloned()
        .collect();

    // Stable sort: same-date posts keep discovery order
    for group in groups.values_mut() {
        group.entries.sort_by(|a, b| b.date.cmp(&a.date));
    }
    all.entries.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(SiteIndex {
        posts,
        categories,
        all,
        groups,
    })
}

/// Parse a date string against a strftime format.
///
/// Tries a full datetime first, then falls back to a bare date at midnight,
/// so both `%Y/%m/%d` and formats with time components work.
fn parse_date(raw: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, format)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_post;

    fn build_index(posts: Vec<Post>, categories: &[&str]) -> SiteIndex {
        let categories: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
        build(posts, &categories, "%Y/%m/%d").unwrap()
    }

    #[test]
    fn groups_by_category_with_global_aggregate() {
        let posts = vec![
            make_post("a", "tech", "2024/01/01"),
            make_post("b", "life", "2024/01/02"),
            make_post("c", "tech", "2024/01/03"),
        ];
        let index = build_index(posts, &["life", "tech"]);

        assert_eq!(index.group("tech").unwrap().len(), 2);
        assert_eq!(index.group("life").unwrap().len(), 1);
        assert_eq!(index.all.len(), 3);
    }

    #[test]
    fn groups_sorted_newest_first() {
        let posts = vec![
            make_post("old", "tech", "2024/01/01"),
            make_post("new", "tech", "2024/01/03"),
            make_post("mid", "tech", "2024/01/02"),
        ];
        let index = build_index(posts, &["tech"]);

        let slugs: Vec<&str> = index
            .group("tech")
            .unwrap()
            .entries()
            .iter()
            .map(|e| index.post(*e).slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
    }

    #[test]
    fn same_date_posts_keep_discovery_order() {
        let posts = vec![
            make_post("first", "tech", "2024/01/02"),
            make_post("second", "tech", "2024/01/02"),
            make_post("third", "tech", "2024/01/02"),
        ];
        let index = build_index(posts, &["tech"]);

        let slugs: Vec<&str> = index
            .all
            .entries()
            .iter()
            .map(|e| index.post(*e).slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["first", "second", "third"]);
    }

    #[test]
    fn adjacent_dates_never_ascend() {
        let posts = vec![
            make_post("a", "tech", "2024/01/05"),
            make_post("b", "tech", "2024/03/01"),
            make_post("c", "tech", "2024/01/05"),
            make_post("d", "tech", "2023/12/31"),
        ];
        let index = build_index(posts, &["tech"]);

        let entries = index.all.entries();
        for pair in entries.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn empty_categories_dropped() {
        let posts = vec![make_post("only", "tech", "2024/01/01")];
        let index = build_index(posts, &["drafts", "tech", "life"]);

        assert_eq!(index.categories, vec!["tech"]);
        assert!(index.group("drafts").is_none());
        assert!(index.group("life").is_none());
    }

    #[test]
    fn visible_categories_keep_input_order() {
        let posts = vec![
            make_post("a", "tech", "2024/01/01"),
            make_post("b", "life", "2024/01/01"),
        ];
        let index = build_index(posts, &["tech", "empty", "life"]);
        assert_eq!(index.categories, vec!["tech", "life"]);
    }

    #[test]
    fn global_group_not_a_category() {
        let posts = vec![make_post("a", "tech", "2024/01/01")];
        let index = build_index(posts, &["tech"]);

        assert!(index.group("all").is_none());
        assert_eq!(index.all.name(), "all");
        assert!(!index.categories.contains(&"all".to_string()));
    }

    #[test]
    fn unparsable_date_reports_slug_and_raw() {
        let posts = vec![make_post("broken", "tech", "January 1st")];
        let result = build(posts, &["tech".to_string()], "%Y/%m/%d");

        match result {
            Err(IndexError::DateParse { slug, raw, .. }) => {
                assert_eq!(slug, "broken");
                assert_eq!(raw, "January 1st");
            }
            other => panic!("expected DateParse, got {other:?}"),
        }
    }

    #[test]
    fn datetime_format_supported() {
        let mut post = make_post("timed", "tech", "2024/01/01 13:45");
        post.date = "2024/01/01 13:45".to_string();
        let index = build(vec![post], &["tech".to_string()], "%Y/%m/%d %H:%M").unwrap();
        assert_eq!(index.all.len(), 1);
    }

    #[test]
    fn no_posts_yields_empty_global_group() {
        let index = build_index(vec![], &["tech"]);
        assert!(index.all.is_empty());
        assert!(index.categories.is_empty());
    }
}
