//! Feed query composition.
//!
//! Turns the raw `sort` / `filter` / paging query parameters of a feed request into a
//! [`FeedQuery`] that the kudo repository executes. Recipient scoping is not part of the
//! query: the repository always applies it on top, so no predicate built here can widen
//! the result set beyond the requesting user's kudos.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedOrdering {
    /// Creation order, oldest first.
    #[default]
    Default,
    /// Newest first.
    Date,
    /// Author first name, case-insensitive ascending.
    Sender,
    /// Emoji label ascending.
    Emoji,
}

impl FeedOrdering {
    /// Unknown values fall back to [`FeedOrdering::Default`].
    pub fn from_param(sort: Option<&str>) -> Self {
        match sort {
            Some("date") => FeedOrdering::Date,
            Some("sender") => FeedOrdering::Sender,
            Some("emoji") => FeedOrdering::Emoji,
            _ => FeedOrdering::Default,
        }
    }
}

/// Case-insensitive substring search over the message and the author's names, evaluated
/// by the kudo gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFilter {
    needle: String,
}

impl FeedFilter {
    /// `None` for an absent or empty filter.
    pub fn from_param(filter: Option<&str>) -> Option<Self> {
        match filter {
            Some(text) if !text.is_empty() => Some(Self {
                needle: text.to_string(),
            }),
            _ => None,
        }
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPage {
    pub page: i64,
    pub per_page: i64,
}

impl FeedPage {
    /// `page` is capped so that `offset()` stays within `i64`.
    pub fn new(page: i64, per_page: i64, max_per_page: i64) -> Self {
        let per_page = per_page.clamp(1, max_per_page.max(1));
        Self {
            page: page.clamp(1, i64::MAX / per_page),
            per_page,
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub ordering: FeedOrdering,
    pub filter: Option<FeedFilter>,
    pub page: FeedPage,
}

impl FeedQuery {
    pub fn compose(sort: Option<&str>, filter: Option<&str>, page: FeedPage) -> Self {
        Self {
            ordering: FeedOrdering::from_param(sort),
            filter: FeedFilter::from_param(filter),
            page,
        }
    }
}
