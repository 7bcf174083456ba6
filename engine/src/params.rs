//! Request parameters for list endpoints.

use crate::{error::Result, Error};

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: usize = 2000;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// First page number.
pub const DEFAULT_PAGE_NUMBER: usize = 1;

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(requested: usize) -> usize {
    requested.clamp(1, MAX_PAGE_SIZE)
}

/// Filter, sort, shaping and paging input of one list request.
///
/// Constructed through the builder methods, so the page size is always
/// clamped and the page number is always at least 1. Text getters return
/// trimmed values and treat blank input as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceParameters {
    /// Exact match on the primary key
    id_filter: Option<i64>,
    /// Exact match on the name
    name_filter: Option<String>,
    /// Free text search term
    search_term: Option<String>,
    /// Comma separated sort clauses
    order_by: Option<String>,
    /// Comma separated member names to return
    fields: Option<String>,
    page_number: usize,
    page_size: usize,
}

impl Default for ResourceParameters {
    fn default() -> Self {
        Self {
            id_filter: None,
            name_filter: None,
            search_term: None,
            order_by: None,
            fields: None,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ResourceParameters {
    /// Parameters for the first page with the default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to select a page. Page numbers start at 1.
    pub fn with_page_number(mut self, page_number: usize) -> Result<Self> {
        if page_number < 1 {
            return Err(Error::InvalidPageNumber(page_number));
        }
        self.page_number = page_number;
        Ok(self)
    }

    /// Builder-style method to set the page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Set the page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = clamp_page_size(page_size);
    }

    pub fn with_id_filter(mut self, id: i64) -> Self {
        self.id_filter = Some(id);
        self
    }

    pub fn with_name_filter(mut self, name: impl Into<String>) -> Self {
        self.name_filter = Some(name.into());
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// 1-based page number.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Effective page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of records before the requested page.
    pub fn offset(&self) -> usize {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    pub fn id_filter(&self) -> Option<i64> {
        self.id_filter
    }

    /// Trimmed name filter, or `None` when blank.
    pub fn name_filter(&self) -> Option<&str> {
        non_blank(self.name_filter.as_deref())
    }

    /// Trimmed search term, or `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        non_blank(self.search_term.as_deref())
    }

    pub fn order_by(&self) -> Option<&str> {
        non_blank(self.order_by.as_deref())
    }

    pub fn fields(&self) -> Option<&str> {
        non_blank(self.fields.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = ResourceParameters::new();
        assert_eq!(params.page_number(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
        assert!(params.order_by().is_none());
    }

    #[test]
    fn page_size_is_capped() {
        assert_eq!(ResourceParameters::new().with_page_size(2001).page_size(), 2000);
        assert_eq!(
            ResourceParameters::new().with_page_size(usize::MAX).page_size(),
            MAX_PAGE_SIZE
        );
    }

    #[test]
    fn page_size_in_range_is_kept() {
        for size in [1, 2, 100, 1999, 2000] {
            assert_eq!(ResourceParameters::new().with_page_size(size).page_size(), size);
        }
    }

    #[test]
    fn zero_page_size_becomes_one() {
        assert_eq!(ResourceParameters::new().with_page_size(0).page_size(), 1);
    }

    #[test]
    fn page_number_zero_is_rejected() {
        assert_eq!(
            ResourceParameters::new().with_page_number(0),
            Err(Error::InvalidPageNumber(0))
        );
    }

    #[test]
    fn offset_from_page() {
        let params = ResourceParameters::new()
            .with_page_size(25)
            .with_page_number(3)
            .unwrap();
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn blank_text_inputs_are_none() {
        let params = ResourceParameters::new()
            .with_name_filter("   ")
            .with_search_term("  ann ")
            .with_order_by("")
            .with_fields(" id ");

        assert_eq!(params.name_filter(), None);
        assert_eq!(params.search_term(), Some("ann"));
        assert_eq!(params.order_by(), None);
        assert_eq!(params.fields(), Some("id"));
    }
}
