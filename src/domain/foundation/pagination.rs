//! Pagination and ordering for list queries.
//!
//! List endpoints accept `_page`, `_size` and `_order` (for example
//! `"price desc, title asc"`). Each aggregate declares which fields may be
//! sorted on; anything else is rejected before it reaches a repository.

use serde::{Deserialize, Serialize};

use super::ValidationError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One `field direction` clause of an ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Always one of the aggregate's whitelisted field names.
    pub field: &'static str,
    pub direction: SortDirection,
}

/// Validated page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub size: u32,
    pub order: Vec<SortKey>,
}

impl PageRequest {
    /// Builds a request from raw query parameters.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if page is 0 or size is outside `1..=MAX_PAGE_SIZE`
    /// - `InvalidFormat` if the ordering names an unknown field or direction
    pub fn parse(
        page: Option<u32>,
        size: Option<u32>,
        order: Option<&str>,
        sortable: &[&'static str],
    ) -> Result<Self, ValidationError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(ValidationError::out_of_range("_page", 1, i64::from(u32::MAX), 0));
        }

        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ValidationError::out_of_range(
                "_size",
                1,
                i64::from(MAX_PAGE_SIZE),
                i64::from(size),
            ));
        }

        let order = match order {
            Some(raw) => parse_order(raw, sortable)?,
            None => Vec::new(),
        };

        Ok(Self { page, size, order })
    }

    /// First page with default size and no ordering.
    pub fn first() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            order: Vec::new(),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Parses an ordering string such as `"price desc, title"`.
///
/// Direction defaults to ascending. Field names are matched
/// case-insensitively against `sortable`.
pub fn parse_order(raw: &str, sortable: &[&'static str]) -> Result<Vec<SortKey>, ValidationError> {
    let mut keys = Vec::new();

    for clause in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let mut parts = clause.split_whitespace();
        let name = parts.next().unwrap_or_default();

        let field = sortable
            .iter()
            .find(|f| f.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "_order",
                    format!("cannot order by '{}'", name),
                )
            })?;

        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(ValidationError::invalid_format(
                    "_order",
                    format!("unknown direction '{}'", other),
                ))
            }
        };

        if parts.next().is_some() {
            return Err(ValidationError::invalid_format(
                "_order",
                format!("malformed clause '{}'", clause),
            ));
        }

        keys.push(SortKey { field, direction });
    }

    Ok(keys)
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub current_page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: &PageRequest) -> Self {
        let size = u64::from(request.size.max(1));
        let total_pages = (total_items + size - 1) / size;
        Self {
            items,
            total_items,
            current_page: request.page,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    /// Maps the items while keeping the paging information.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }
}
