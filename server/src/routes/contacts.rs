//! Contacts endpoint routes.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::handlers::{
    handle_create, handle_delete, handle_get, handle_list, handle_update, ContactQuery,
    ContactsQuery,
};
use crate::models::ContactInput;
use crate::AppState;

/// Header carrying the pagination metadata of a list response.
pub const PAGINATION_HEADER: HeaderName = HeaderName::from_static("x-pagination");

/// Methods served under `/api/contacts`.
pub const ALLOWED_METHODS: &str = "GET,HEAD,POST,PUT,DELETE,OPTIONS";

/// Create contacts routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/contacts",
            get(list_handler)
                .post(create_handler)
                .options(options_handler),
        )
        .route(
            "/api/contacts/{id}",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
}

/// GET|HEAD /api/contacts - List contacts.
async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ContactsQuery>,
) -> Result<impl IntoResponse> {
    let list = handle_list(&state.pool, &state.registry, query).await?;

    let metadata = serde_json::to_string(&list.metadata)
        .map_err(|e| AppError::Internal(format!("pagination header: {}", e)))?;

    Ok(([(PAGINATION_HEADER, metadata)], Json(list.records)))
}

/// GET /api/contacts/{id} - Fetch one contact.
async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ContactQuery>,
) -> Result<impl IntoResponse> {
    let record = handle_get(&state.pool, id, query)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("contact {}", id)))?;
    Ok(Json(record))
}

/// POST /api/contacts - Create a contact.
async fn create_handler(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> Result<impl IntoResponse> {
    let (id, record) = handle_create(&state.pool, input).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/contacts/{}", id))],
        Json(record),
    ))
}

/// PUT /api/contacts/{id} - Replace a contact.
async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ContactInput>,
) -> Result<StatusCode> {
    if handle_update(&state.pool, id, input).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("contact {}", id)))
    }
}

/// DELETE /api/contacts/{id} - Delete a contact.
async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    if handle_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("contact {}", id)))
    }
}

/// OPTIONS /api/contacts - Advertise supported methods.
async fn options_handler() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, ALLOWED_METHODS)])
}
