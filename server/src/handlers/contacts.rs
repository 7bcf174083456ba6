//! Contacts handlers: listing, lookup and writes.

use serde::Deserialize;
use shape_engine::{
    ListPlan, Page, PaginationMetadata, PropertyMappingRegistry, ResourceParameters, Shaped,
    ShapedRecord, SortKey,
};
use sqlx::PgPool;

use crate::db::{self, ContactFilter};
use crate::error::Result;
use crate::models::{Contact, ContactDto, ContactInput};

/// Query parameters for listing contacts.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsQuery {
    /// Exact id filter; 0 means none
    #[serde(alias = "Id")]
    pub id: Option<i64>,
    /// Exact first name filter
    #[serde(alias = "firstname", alias = "FirstName")]
    pub first_name: Option<String>,
    /// Free-text search term
    #[serde(alias = "Search")]
    pub search: Option<String>,
    /// One-based page number
    #[serde(alias = "pagenumber", alias = "PageNumber")]
    pub page_number: Option<usize>,
    /// Requested page size, clamped to the engine maximum
    #[serde(alias = "pagesize", alias = "PageSize")]
    pub page_size: Option<usize>,
    /// Sort expression over client-facing names, e.g. `name desc,id`
    #[serde(alias = "orderby", alias = "OrderBy")]
    pub order_by: Option<String>,
    /// Comma-separated members to return
    #[serde(alias = "Fields")]
    pub fields: Option<String>,
}

impl ContactsQuery {
    /// Convert the raw query into engine parameters.
    pub fn into_parameters(self) -> Result<ResourceParameters> {
        let mut params = ResourceParameters::new();

        if let Some(page_number) = self.page_number {
            params = params.with_page_number(page_number)?;
        }
        if let Some(page_size) = self.page_size {
            params = params.with_page_size(page_size);
        }
        if let Some(id) = self.id {
            params = params.with_id_filter(id);
        }
        if let Some(name) = self.first_name {
            params = params.with_name_filter(name);
        }
        if let Some(term) = self.search {
            params = params.with_search_term(term);
        }
        if let Some(order_by) = self.order_by {
            params = params.with_order_by(order_by);
        }
        if let Some(fields) = self.fields {
            params = params.with_fields(fields);
        }

        Ok(params)
    }
}

/// Query parameters for fetching one contact.
#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    #[serde(alias = "Fields")]
    pub fields: Option<String>,
}

/// One page of shaped contacts.
#[derive(Debug)]
pub struct ContactList {
    pub metadata: PaginationMetadata,
    pub records: Vec<ShapedRecord>,
}

/// Order used when the client names none.
fn default_sort() -> [SortKey; 1] {
    [SortKey::ascending("Id")]
}

/// Process a list request.
///
/// Sort and field names are checked before the database is touched.
pub async fn handle_list(
    pool: &PgPool,
    registry: &PropertyMappingRegistry,
    query: ContactsQuery,
) -> Result<ContactList> {
    let params = query.into_parameters()?;
    let plan = ListPlan::<ContactDto, Contact>::new(registry, &params, &default_sort())?;

    let filter = ContactFilter::from(&params);
    let (contacts, total_count) = db::list_contacts(
        pool,
        &filter,
        plan.sort_keys(),
        plan.offset(),
        plan.page_size(),
    )
    .await?;

    tracing::debug!(
        "Listed {} of {} contacts (page {}, size {})",
        contacts.len(),
        total_count,
        plan.page_number(),
        plan.page_size()
    );

    let page = Page::new(contacts, plan.page_number(), plan.page_size(), total_count);
    let shaped = plan.shape_page(page.map(ContactDto::from))?;

    Ok(ContactList {
        metadata: shaped.metadata(),
        records: shaped.into_items(),
    })
}

/// Fetch one contact, shaped to the requested fields.
pub async fn handle_get(
    pool: &PgPool,
    id: i64,
    query: ContactQuery,
) -> Result<Option<ShapedRecord>> {
    let fields = query.fields.as_deref();
    ContactDto::shape().check_fields(fields)?;

    let Some(contact) = db::get_contact(pool, id).await? else {
        return Ok(None);
    };

    let shaped = ContactDto::shape().shape_data(&ContactDto::from(contact), fields)?;
    Ok(Some(shaped))
}

/// Create a contact and return its shaped representation.
pub async fn handle_create(pool: &PgPool, input: ContactInput) -> Result<(i64, ShapedRecord)> {
    let input = input.validate()?;
    let contact = db::insert_contact(pool, &input).await?;

    tracing::info!("Created contact {}", contact.id);

    let id = contact.id;
    let shaped = ContactDto::shape().shape_data(&ContactDto::from(contact), None)?;
    Ok((id, shaped))
}

/// Replace a contact. Returns false when it does not exist.
pub async fn handle_update(pool: &PgPool, id: i64, input: ContactInput) -> Result<bool> {
    let input = input.validate()?;
    let updated = db::update_contact(pool, id, &input).await?;

    if updated {
        tracing::info!("Updated contact {}", id);
    }
    Ok(updated)
}

/// Delete a contact. Returns false when it does not exist.
pub async fn handle_delete(pool: &PgPool, id: i64) -> Result<bool> {
    let deleted = db::delete_contact(pool, id).await?;

    if deleted {
        tracing::info!("Deleted contact {}", id);
    }
    Ok(deleted)
}
