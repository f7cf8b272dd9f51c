//! Pagination arithmetic and navigation links.
//!
//! Pages are ephemeral, computed views over an [`OrderedGroup`]: a window
//! `[offset, offset + len)` plus the file names of the page itself and its
//! neighbors. They are recomputed on demand and never persisted.
//!
//! Numbering is zero-based. Page 0 materializes as the group's landing page
//! (`index.html`); page k ≥ 1 as `page{k}.html`. A group of zero posts
//! yields zero pages — callers treat that as "nothing to render", not an
//! error.
//!
//! [`recent`] is the direct "most recent N posts, with an optional offset"
//! query used to slice a group for one listing page. Its failure modes are
//! caller bugs, not data errors: a zero count or an offset beyond a
//! non-empty group means the pagination arithmetic upstream is wrong.

use crate::index::{GroupEntry, OrderedGroup};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaginateError {
    #[error("requested zero posts from group '{0}'")]
    ZeroCount(String),
    #[error("offset {offset} is out of range for group '{group}' of {len} posts")]
    OffsetOutOfRange {
        group: String,
        offset: usize,
        len: usize,
    },
}

/// A computed listing page: item window plus navigation file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page number.
    pub number: usize,
    /// Index of the first item in the group's ordered sequence.
    pub offset: usize,
    /// Items on this page. Equal to the page size except possibly on the
    /// last page.
    pub len: usize,
    /// Output file name: `index.html` for page 0, `page{k}.html` after.
    pub file_name: String,
    /// File name of the previous page; absent on page 0.
    pub previous: Option<String>,
    /// File name of the next page; absent on the last page.
    pub next: Option<String>,
}

/// File name a page number materializes as.
pub fn page_file_name(number: usize) -> String {
    if number == 0 {
        "index.html".to_string()
    } else {
        format!("page{number}.html")
    }
}

/// Compute the pages needed to list `total` items at `page_size` per page.
///
/// `page_size` must be positive (enforced by config validation); zero
/// `total` yields an empty vec.
pub fn paginate(total: usize, page_size: usize) -> Vec<Page> {
    assert!(page_size > 0, "page_size must be positive");

    let page_count = total.div_ceil(page_size);
    (0..page_count)
        .map(|number| {
            let offset = number * page_size;
            Page {
                number,
                offset,
                len: page_size.min(total - offset),
                file_name: page_file_name(number),
                previous: number.checked_sub(1).map(page_file_name),
                next: (number + 1 < page_count).then(|| page_file_name(number + 1)),
            }
        })
        .collect()
}

/// The most recent `count` entries of a group, starting at `offset`.
///
/// An empty group returns an empty slice — "no posts yet" is normal. The
/// window is clamped to the group's length, so the tail may hold fewer than
/// `count` entries.
pub fn recent(
    group: &OrderedGroup,
    count: usize,
    offset: usize,
) -> Result<&[GroupEntry], PaginateError> {
    if count == 0 {
        return Err(PaginateError::ZeroCount(group.name().to_string()));
    }
    let entries = group.entries();
    if entries.is_empty() {
        return Ok(entries);
    }
    if offset >= entries.len() {
        return Err(PaginateError::OffsetOutOfRange {
            group: group.name().to_string(),
            offset,
            len: entries.len(),
        });
    }
    let end = (offset + count).min(entries.len());
    Ok(&entries[offset..end])
}
