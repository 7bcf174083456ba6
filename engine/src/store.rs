//! In-memory record storage and querying.
//!
//! [`RecordSource`] is what the list pipeline needs from a persistence layer:
//! filtering, sorting by internal members, counting and slicing.
//! [`Collection`] is the in-memory implementation; database backed services
//! translate the same operations into their own query language.

use crate::{error::Result, sort, Page, Shaped, SortKey};

/// A filterable, sortable, countable sequence of records.
pub trait RecordSource: Sized {
    /// Record type, of a registered shape.
    type Record: Shaped;
    /// What a slice yields.
    type Item;

    /// Keep only records matching the predicate.
    fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&Self::Record) -> bool;

    /// Order by internal members, keys in priority order.
    fn sort_by(self, keys: &[SortKey]) -> Result<Self>;

    /// Number of records.
    fn count(&self) -> usize;

    /// Materialize `limit` records starting at `offset`.
    fn slice(self, offset: usize, limit: usize) -> Vec<Self::Item>;

    /// Materialize one page, counting the full sequence first.
    fn page(self, page_number: usize, page_size: usize) -> Page<Self::Item> {
        let total_count = self.count();
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);
        let items = self.slice(offset, page_size);
        Page::new(items, page_number, page_size, total_count)
    }
}

/// An ordered in-memory collection of records.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn insert(&mut self, record: T) {
        self.records.push(record);
    }

    /// First record matching a predicate.
    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().find(|r| predicate(r))
    }

    /// Remove the records matching a predicate, returning how many went.
    pub fn remove_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|r| !predicate(r));
        before - self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Start a query over borrowed records in insertion order.
    pub fn query(&self) -> Query<'_, T> {
        Query {
            records: self.records.iter().collect(),
        }
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Query over a [`Collection`].
#[derive(Debug)]
pub struct Query<'a, T> {
    records: Vec<&'a T>,
}

impl<'a, T> Query<'a, T> {
    /// All matching records.
    pub fn all(self) -> Vec<&'a T> {
        self.records
    }

    /// First matching record.
    pub fn first(self) -> Option<&'a T> {
        self.records.into_iter().next()
    }
}

impl<'a, T: Shaped> RecordSource for Query<'a, T> {
    type Record = T;
    type Item = &'a T;

    fn filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        self.records.retain(|r| predicate(r));
        self
    }

    fn sort_by(mut self, keys: &[SortKey]) -> Result<Self> {
        sort::sort_by_key_fn(&mut self.records, keys, T::shape(), |r| *r)?;
        Ok(self)
    }

    fn count(&self) -> usize {
        self.records.len()
    }

    fn slice(self, offset: usize, limit: usize) -> Vec<&'a T> {
        self.records.into_iter().skip(offset).take(limit).collect()
    }
}
