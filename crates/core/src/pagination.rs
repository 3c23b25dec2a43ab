//! Page-number pagination for list endpoints.

use serde::Serialize;

/// One page of results in the `{count, next, previous, results}` envelope.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A `LIMIT`/`OFFSET` slice of an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: i64,
    pub offset: i64,
}

impl Window {
    /// Every row. SQLite reads a negative limit as "no limit".
    pub const ALL: Window = Window {
        limit: -1,
        offset: 0,
    };
}

/// A 1-based page number paired with a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// `None` for page 0 or a zero page size.
    pub fn new(page: u32, page_size: u32) -> Option<Self> {
        if page == 0 || page_size == 0 {
            return None;
        }
        Some(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows this page covers.
    pub fn window(&self) -> Window {
        let size = i64::from(self.page_size);
        Window {
            limit: size,
            offset: (i64::from(self.page) - 1) * size,
        }
    }

    fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.page_size as usize).max(1)
    }

    /// Whether this page exists when the listing holds `count` rows. The
    /// first page always exists, even when empty.
    pub fn fits(&self, count: usize) -> bool {
        self.page as usize <= self.page_count(count)
    }

    /// Wrap one window of `results` in the page envelope.
    ///
    /// `path` is the list URL the `next`/`previous` links are built from.
    pub fn into_page<T>(self, count: usize, results: Vec<T>, path: &str) -> Page<T> {
        let index = self.page as usize;
        let next = (index < self.page_count(count)).then(|| format!("{path}?page={}", index + 1));
        let previous = match index {
            1 => None,
            2 => Some(path.to_string()),
            n => Some(format!("{path}?page={}", n - 1)),
        };
        Page {
            count,
            next,
            previous,
            results,
        }
    }
}
