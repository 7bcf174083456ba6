//! The list pipeline: validate, filter, sort, paginate, shape.
//!
//! A [`ListPlan`] is built from the request before any record is read. Every
//! client mistake (an unmapped `orderBy` name, an unknown `fields` member, an
//! empty token) is reported while planning, so execution never produces a
//! partial result.

use crate::{
    error::Result, translate_order_by, Page, PropertyMappingRegistry, RecordSource,
    ResourceParameters, Shaped, ShapedRecord, SortKey,
};
use std::marker::PhantomData;

/// A validated list request from external shape `E` over internal shape `I`.
#[derive(Debug, Clone)]
pub struct ListPlan<E, I> {
    sort_keys: Vec<SortKey>,
    fields: Option<String>,
    page_number: usize,
    page_size: usize,
    shapes: PhantomData<fn(I) -> E>,
}

impl<E: Shaped, I: Shaped> ListPlan<E, I> {
    /// Validate a request and translate its sort expression.
    ///
    /// `default_sort` is used when the request has no `orderBy`; it names
    /// internal members directly. A missing mapping for `<E, I>` is a
    /// configuration error.
    pub fn new(
        registry: &PropertyMappingRegistry,
        params: &ResourceParameters,
        default_sort: &[SortKey],
    ) -> Result<Self> {
        let mappings = registry.mappings::<E, I>()?;

        mappings.validate(params.order_by())?;
        E::shape().check_fields(params.fields())?;

        let sort_keys = match params.order_by() {
            Some(order_by) => translate_order_by(Some(order_by), mappings)?,
            None => default_sort.to_vec(),
        };

        Ok(Self {
            sort_keys,
            fields: params.fields().map(str::to_string),
            page_number: params.page_number(),
            page_size: params.page_size(),
            shapes: PhantomData,
        })
    }

    /// Internal sort keys in priority order.
    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort_keys
    }

    /// Requested `fields`, or `None` for all of them.
    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref()
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        self.page_number
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }

    /// Shape a page of external records with the requested fields.
    pub fn shape_page(&self, page: Page<E>) -> Result<Page<ShapedRecord>> {
        let shape = E::shape();
        let fields = self.fields();
        page.try_map(|record| shape.shape_data(&record, fields))
    }

    /// Run the plan against a record source.
    ///
    /// Records are filtered with `predicate`, sorted by the plan's keys, cut
    /// to the requested page, converted to the external shape with
    /// `to_external` and reduced to the requested fields.
    pub fn execute<S, P, F>(
        &self,
        source: S,
        predicate: P,
        to_external: F,
    ) -> Result<Page<ShapedRecord>>
    where
        S: RecordSource<Record = I>,
        P: Fn(&I) -> bool,
        F: FnMut(S::Item) -> E,
    {
        let page = source
            .filter(predicate)
            .sort_by(&self.sort_keys)?
            .page(self.page_number, self.page_size);

        self.shape_page(page.map(to_external))
    }
}
