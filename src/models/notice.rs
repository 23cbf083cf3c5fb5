//! Notices (announcements) and the orderings the public pages use.

use serde::{Deserialize, Serialize};

use super::raw::{RawNoticeRow, parse_bool, parse_text};

/// An announcement shown on the calendar and notice pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Sheet id, or `notice-{index}` when the sheet has none.
    pub id: String,
    /// Title line.
    pub title: String,
    /// Rich-text body, stored as the editor produced it.
    pub body: String,
    /// Pinned notices are listed before the rest.
    pub is_pinned: bool,
    /// Inactive notices are hidden from public listings.
    pub is_active: bool,
    /// Creation timestamp; ISO strings order chronologically.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

impl Notice {
    /// Normalizes a sheet row. Returns `None` for rows without a title or body.
    pub fn from_raw(row: &RawNoticeRow, index: usize) -> Option<Self> {
        let title = parse_text(row.title.as_ref())?;
        let body = parse_text(row.body.as_ref())?;

        Some(Notice {
            id: parse_text(row.id.as_ref()).unwrap_or_else(|| format!("notice-{index}")),
            title,
            body,
            is_pinned: parse_bool(row.is_pinned.as_ref(), false),
            is_active: parse_bool(row.is_active.as_ref(), true),
            created_at: parse_text(row.created_at.as_ref()).unwrap_or_default(),
            updated_at: parse_text(row.updated_at.as_ref()),
        })
    }
}

/// Sorts newest first by `created_at`.
pub fn sort_newest_first(notices: &mut [Notice]) {
    notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Active notices split into the pinned block and the regular list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeBoard {
    /// Active pinned notices, newest first.
    pub pinned: Vec<Notice>,
    /// Active unpinned notices, newest first.
    pub regular: Vec<Notice>,
}

impl NoticeBoard {
    /// Builds the board from any list of notices, dropping inactive ones.
    ///
    /// # Example
    ///
    /// ```
    /// use commission_booking::models::{Notice, NoticeBoard};
    ///
    /// let notice = |id: &str, pinned: bool, active: bool, created: &str| Notice {
    ///     id: id.to_string(),
    ///     title: id.to_string(),
    ///     body: String::new(),
    ///     is_pinned: pinned,
    ///     is_active: active,
    ///     created_at: created.to_string(),
    ///     updated_at: None,
    /// };
    ///
    /// let board = NoticeBoard::from_notices(&[
    ///     notice("old", false, true, "2025-11-01"),
    ///     notice("hidden", true, false, "2025-12-01"),
    ///     notice("pin", true, true, "2025-10-01"),
    ///     notice("new", false, true, "2025-11-20"),
    /// ]);
    ///
    /// assert_eq!(board.pinned.len(), 1);
    /// assert_eq!(board.regular[0].id, "new");
    /// assert_eq!(board.regular[1].id, "old");
    /// ```
    pub fn from_notices(notices: &[Notice]) -> Self {
        let (mut pinned, mut regular): (Vec<Notice>, Vec<Notice>) = notices
            .iter()
            .filter(|n| n.is_active)
            .cloned()
            .partition(|n| n.is_pinned);

        sort_newest_first(&mut pinned);
        sort_newest_first(&mut regular);

        Self { pinned, regular }
    }

    /// Up to `limit` notices for a banner: pinned ones first, then the newest regular ones.
    pub fn highlights(&self, limit: usize) -> Vec<&Notice> {
        self.pinned.iter().chain(&self.regular).take(limit).collect()
    }
}

/// The previous (newer) and next (older) active notices around `id`.
///
/// Both are `None` when `id` is inactive or unknown, since it has no place
/// in the public ordering.
pub fn adjacent_notices<'a>(
    notices: &'a [Notice],
    id: &str,
) -> (Option<&'a Notice>, Option<&'a Notice>) {
    let mut active: Vec<&Notice> = notices.iter().filter(|n| n.is_active).collect();
    active.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    match active.iter().position(|n| n.id == id) {
        Some(index) => {
            let previous = index.checked_sub(1).and_then(|i| active.get(i)).copied();
            let next = active.get(index + 1).copied();
            (previous, next)
        }
        None => (None, None),
    }
}
