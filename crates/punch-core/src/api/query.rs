//! Admin attendance-log filter and its query string.

use std::fmt::Write as _;

/// Filters for the admin attendance-log listing.
///
/// The date filters are mutually exclusive in priority order:
/// `today_only` is sent alone; otherwise an exact `date` is sent
/// alone; otherwise `start`/`end` go out independently. Page 1 is the
/// implicit default and never appears in the query string.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Restrict to one user ID.
    pub user: Option<u64>,
    /// Today's sessions only; beats every other date filter.
    pub today_only: bool,
    /// Exact date (`YYYY-MM-DD`); beats the range.
    pub date: Option<String>,
    /// Range start (`YYYY-MM-DD`), optional independently of `end`.
    pub start: Option<String>,
    /// Range end (`YYYY-MM-DD`), optional independently of `start`.
    pub end: Option<String>,
    /// 1-based page number.
    pub page: u32,
}

impl LogFilter {
    /// Render the query string, `?`-prefixed, or empty when no filter
    /// is active.
    pub fn to_query_string(&self) -> String {
        let mut qs = String::new();

        if let Some(user) = self.user {
            push_param(&mut qs, "user", &user.to_string());
        }

        if self.today_only {
            push_param(&mut qs, "today", "true");
        } else if let Some(date) = &self.date {
            push_param(&mut qs, "date", date);
        } else {
            if let Some(start) = &self.start {
                push_param(&mut qs, "start", start);
            }
            if let Some(end) = &self.end {
                push_param(&mut qs, "end", end);
            }
        }

        if self.page > 1 {
            push_param(&mut qs, "page", &self.page.to_string());
        }

        qs
    }

    /// The same filter pointed at another page.
    pub fn with_page(&self, page: u32) -> Self {
        let mut filter = self.clone();
        filter.page = page;
        filter
    }
}

fn push_param(qs: &mut String, key: &str, value: &str) {
    let sep = if qs.is_empty() { '?' } else { '&' };
    let _ = write!(qs, "{sep}{key}={value}");
}

/// Pull the page number out of a `next`/`previous` envelope URL
/// (absolute or relative). An omitted `page` param means page 1.
pub fn page_from_url(url: &str) -> Option<u32> {
    match url.split_once('?') {
        Some((_, query)) => {
            for pair in query.split('&') {
                if let Some(value) = pair.strip_prefix("page=") {
                    return value.parse().ok();
                }
            }
            Some(1)
        }
        None => Some(1),
    }
}
