//! Database operations for the contacts table.

use shape_engine::{ResourceParameters, SortDirection, SortKey};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::{AppError, Result};
use crate::models::{Contact, ContactInput};

const CONTACT_COLUMNS: &str = "id, first_name, last_name, phone, email";

/// Row filters of a list request. All present filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Exact id
    pub id: Option<i64>,
    /// Exact first name
    pub first_name: Option<String>,
    /// Substring of first name, last name, phone or email
    pub search: Option<String>,
}

impl From<&ResourceParameters> for ContactFilter {
    fn from(params: &ResourceParameters) -> Self {
        Self {
            // Id 0 never names a stored contact and means "no filter".
            id: params.id_filter().filter(|id| *id != 0),
            first_name: params.name_filter().map(str::to_string),
            search: params.search_term().map(str::to_string),
        }
    }
}

/// Column backing a member of the stored contact shape.
fn column_for(field: &str) -> Option<&'static str> {
    match field.to_lowercase().as_str() {
        "id" => Some("id"),
        "firstname" => Some("first_name"),
        "lastname" => Some("last_name"),
        "phone" => Some("phone"),
        "email" => Some("email"),
        _ => None,
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ContactFilter) {
    let mut separator = " WHERE ";

    if let Some(id) = filter.id {
        query.push(separator).push("id = ").push_bind(id);
        separator = " AND ";
    }

    if let Some(first_name) = &filter.first_name {
        query
            .push(separator)
            .push("first_name = ")
            .push_bind(first_name.clone());
        separator = " AND ";
    }

    if let Some(term) = &filter.search {
        query.push(separator).push("(");
        for (i, column) in ["first_name", "last_name", "phone", "email"].iter().enumerate() {
            if i > 0 {
                query.push(" OR ");
            }
            query
                .push(format!("strpos(coalesce({}, ''), ", column))
                .push_bind(term.clone())
                .push(") > 0");
        }
        query.push(")");
    }
}

/// Order by the given keys, then by id so pages partition the result.
///
/// Nulls sort before every value ascending and after every value descending.
fn push_order_by(query: &mut QueryBuilder<'_, Postgres>, sort: &[SortKey]) -> Result<()> {
    let mut has_id = false;

    for (i, key) in sort.iter().enumerate() {
        let column = column_for(&key.field).ok_or_else(|| {
            AppError::Internal(format!("no column backs sort field {}", key.field))
        })?;
        has_id |= column == "id";

        let direction = match key.direction {
            SortDirection::Ascending => "ASC NULLS FIRST",
            SortDirection::Descending => "DESC NULLS LAST",
        };

        query
            .push(if i == 0 { " ORDER BY " } else { ", " })
            .push(column)
            .push(" ")
            .push(direction);
    }

    if !has_id {
        query
            .push(if sort.is_empty() { " ORDER BY " } else { ", " })
            .push("id ASC");
    }
    Ok(())
}

/// Build the page query for a filtered, sorted listing.
fn select_page_query(
    filter: &ContactFilter,
    sort: &[SortKey],
    offset: usize,
    limit: usize,
) -> Result<QueryBuilder<'static, Postgres>> {
    let mut query = QueryBuilder::new(format!("SELECT {} FROM contacts", CONTACT_COLUMNS));
    push_filters(&mut query, filter);
    push_order_by(&mut query, sort)?;

    query
        .push(" LIMIT ")
        .push_bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

    Ok(query)
}

fn count_query(filter: &ContactFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT COUNT(*) FROM contacts");
    push_filters(&mut query, filter);
    query
}

/// Count matching contacts and load one page of them.
pub async fn list_contacts(
    pool: &PgPool,
    filter: &ContactFilter,
    sort: &[SortKey],
    offset: usize,
    limit: usize,
) -> Result<(Vec<Contact>, usize)> {
    let mut select = select_page_query(filter, sort, offset, limit)?;

    let total: i64 = count_query(filter)
        .build_query_scalar()
        .fetch_one(pool)
        .await?;

    let contacts = select
        .build_query_as::<Contact>()
        .fetch_all(pool)
        .await?;

    Ok((contacts, usize::try_from(total).unwrap_or(0)))
}

/// Get a contact by id.
pub async fn get_contact(
    pool: &PgPool,
    id: i64,
) -> std::result::Result<Option<Contact>, sqlx::Error> {
    let sql = format!("SELECT {} FROM contacts WHERE id = $1", CONTACT_COLUMNS);
    sqlx::query_as::<_, Contact>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a contact and return the stored row.
pub async fn insert_contact(
    pool: &PgPool,
    input: &ContactInput,
) -> std::result::Result<Contact, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO contacts (first_name, last_name, phone, email)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        CONTACT_COLUMNS
    );
    sqlx::query_as::<_, Contact>(&sql)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone)
        .bind(&input.email)
        .fetch_one(pool)
        .await
}

/// Replace a contact. Returns false when no contact has the id.
pub async fn update_contact(
    pool: &PgPool,
    id: i64,
    input: &ContactInput,
) -> std::result::Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE contacts
        SET first_name = $2, last_name = $3, phone = $4, email = $5
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.phone)
    .bind(&input.email)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a contact. Returns false when no contact has the id.
pub async fn delete_contact(pool: &PgPool, id: i64) -> std::result::Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
