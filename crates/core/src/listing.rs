//! List query grammar: search terms, ordering, and page-number pagination.
//!
//! Both API variants share these rules. Each variant decides which sort
//! fields it allows and whether search is honoured at all.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound for a client-requested `page_size`.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameter selecting the page.
pub const PAGE_PARAM: &str = "page";

/// `?page=last` jumps to the final page.
const LAST_PAGE: &str = "last";

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Columns a list may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Title,
    Body,
    CreatedAt,
}

impl SortField {
    /// Parse a client-facing field name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "body" => Some(Self::Body),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    /// Field name, identical to the column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Body => "body",
            Self::CreatedAt => "created_at",
        }
    }
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub field: SortField,
    pub descending: bool,
}

impl OrderTerm {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

/// Ordering applied when the client asks for none: oldest first.
pub fn default_ordering() -> Vec<OrderTerm> {
    vec![OrderTerm::asc(SortField::CreatedAt)]
}

/// Parse an `?ordering=` value such as `-title,id`.
///
/// Fields outside `allowed` are dropped. When nothing usable remains, the
/// default ordering applies.
pub fn parse_ordering(raw: Option<&str>, allowed: &[SortField]) -> Vec<OrderTerm> {
    let terms: Vec<OrderTerm> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter_map(|term| {
            let (name, descending) = match term.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (term, false),
            };
            SortField::parse(name)
                .filter(|field| allowed.contains(field))
                .map(|field| OrderTerm { field, descending })
        })
        .collect();

    if terms.is_empty() {
        default_ordering()
    } else {
        terms
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Split a `?search=` value into terms.
///
/// Terms are separated by whitespace or commas. NUL characters are stripped.
/// Every returned term must match for a record to be included.
pub fn search_terms(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .replace('\0', "")
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Record-level filter applied before counting and paging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Each term must appear, case-insensitively, in the title or the body.
    pub search_terms: Vec<String>,
}

impl TodoFilter {
    /// Whether a record with the given text fields passes the filter.
    pub fn matches(&self, title: &str, body: &str) -> bool {
        let title = title.to_lowercase();
        let body = body.to_lowercase();
        self.search_terms.iter().all(|term| {
            let term = term.to_lowercase();
            title.contains(&term) || body.contains(&term)
        })
    }
}

/// A fully resolved list query handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListQuery {
    pub filter: TodoFilter,
    pub ordering: Vec<OrderTerm>,
    pub limit: i64,
    pub offset: i64,
}

// ---------------------------------------------------------------------------
// Page numbers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageSelector {
    Number(i64),
    Last,
}

/// Page requested by the client, not yet checked against the record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    selector: PageSelector,
    page_size: i64,
}

impl PageRequest {
    /// Interpret the raw `page` and `page_size` query values.
    ///
    /// A missing page means page 1. An unparsable page fails with
    /// [`CoreError::InvalidPage`]. A missing, unparsable, or non-positive
    /// page size falls back to `default_size`; larger sizes are capped at
    /// `max_size`.
    pub fn from_params(
        page: Option<&str>,
        page_size: Option<&str>,
        default_size: i64,
        max_size: i64,
    ) -> Result<Self, CoreError> {
        let selector = match page.map(str::trim) {
            None | Some("") => PageSelector::Number(1),
            Some(LAST_PAGE) => PageSelector::Last,
            Some(raw) => PageSelector::Number(raw.parse().map_err(|_| CoreError::InvalidPage)?),
        };

        let page_size = page_size
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|size| *size > 0)
            .map(|size| size.min(max_size))
            .unwrap_or(default_size);

        Ok(Self {
            selector,
            page_size,
        })
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Check the request against the number of matching records.
    ///
    /// The first page always exists, even for an empty collection.
    pub fn resolve(&self, count: i64) -> Result<Page, CoreError> {
        let num_pages = num_pages(count, self.page_size);
        let number = match self.selector {
            PageSelector::Number(n) => n,
            PageSelector::Last => num_pages,
        };

        if number < 1 || number > num_pages {
            return Err(CoreError::InvalidPage);
        }

        Ok(Page {
            number,
            size: self.page_size,
            num_pages,
        })
    }
}

/// A page known to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
    pub num_pages: i64,
}

impl Page {
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.size
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Number of pages needed for `count` records, never less than one.
pub fn num_pages(count: i64, page_size: i64) -> i64 {
    if count <= 0 {
        return 1;
    }
    (count + page_size - 1) / page_size
}

/// Build a link to `page` from the current request path and query string.
///
/// All other query parameters are preserved as sent. Page 1 is linked by
/// dropping the `page` parameter altogether.
pub fn page_link(path: &str, query: Option<&str>, page: i64) -> String {
    let mut pairs: Vec<String> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(PAGE_PARAM))
        .map(str::to_string)
        .collect();

    if page > 1 {
        pairs.push(format!("{PAGE_PARAM}={page}"));
    }

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", pairs.join("&"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
