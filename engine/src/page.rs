//! Pages of a larger ordered result set.

use serde::{Deserialize, Serialize};

/// Position of a page within the whole result set.
///
/// This is the value clients receive alongside a page, for example in an
/// `X-Pagination` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

/// One materialized page of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page_number: usize,
    page_size: usize,
    total_count: usize,
    total_pages: usize,
}

impl<T> Page<T> {
    /// Wrap a page that was materialized and counted elsewhere.
    pub fn new(items: Vec<T>, page_number: usize, page_size: usize, total_count: usize) -> Self {
        Self {
            items,
            page_number,
            page_size,
            total_count,
            total_pages: total_pages(total_count, page_size),
        }
    }

    /// Cut one page out of a full ordered sequence.
    ///
    /// The whole sequence is counted once. A page past the end is empty.
    pub fn paginate<I>(records: I, page_number: usize, page_size: usize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut total_count = 0;
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);

        let mut items = Vec::with_capacity(page_size.min(crate::MAX_PAGE_SIZE));
        for (index, record) in records.into_iter().enumerate() {
            total_count += 1;
            if index >= offset && items.len() < page_size {
                items.push(record);
            }
        }

        Self::new(items, page_number, page_size, total_count)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn metadata(&self) -> PaginationMetadata {
        PaginationMetadata {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.page_number,
            total_pages: self.total_pages,
        }
    }

    /// Transform every item, keeping the page position.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }

    /// Fallible form of [`Page::map`].
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Page {
            items: self
                .items
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, E>>()?,
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        })
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_count.div_ceil(page_size)
    }
}
