//! Catalog endpoints: books, selection, filter and the add/edit form

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::{BookInput, FilterCriteria},
        view::{CatalogPage, FormMode},
    },
};

/// Result of a book mutation
#[derive(Serialize, ToSchema)]
pub struct BookActionResponse {
    /// Affected book id, absent when nothing changed
    pub id: Option<String>,
    /// Whether any record changed
    pub changed: bool,
}

impl BookActionResponse {
    fn from_id(id: Option<String>) -> Self {
        Self {
            changed: id.is_some(),
            id,
        }
    }
}

/// Catalog page
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Visible books, author list and filter", body = CatalogPage)
    )
)]
pub async fn get_catalog(State(state): State<crate::AppState>) -> Json<CatalogPage> {
    Json(state.services.catalog.page().await)
}

/// Set the author filter
#[utoipa::path(
    put,
    path = "/catalog/filter",
    tag = "catalog",
    request_body = FilterCriteria,
    responses(
        (status = 200, description = "Filtered catalog page", body = CatalogPage)
    )
)]
pub async fn set_filter(
    State(state): State<crate::AppState>,
    Json(criteria): Json<FilterCriteria>,
) -> Json<CatalogPage> {
    Json(state.services.catalog.set_filter(criteria).await)
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "catalog",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book added", body = BookActionResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(input): Json<BookInput>,
) -> (StatusCode, Json<BookActionResponse>) {
    let id = state.services.catalog.add_book(input).await;
    (StatusCode::CREATED, Json(BookActionResponse::from_id(Some(id))))
}

/// Update a book. Unknown ids change nothing.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BookInput,
    responses(
        (status = 200, description = "Update applied or ignored", body = BookActionResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(input): Json<BookInput>,
) -> Json<BookActionResponse> {
    let updated = state.services.catalog.update_book(&id, input).await;
    Json(BookActionResponse::from_id(updated.then_some(id)))
}

/// Delete a book and its loans
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted or already absent", body = BookActionResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Json<BookActionResponse> {
    let deleted = state.services.catalog.delete_book(&id).await;
    Json(BookActionResponse::from_id(deleted.then_some(id)))
}

/// Toggle selection of a book
#[utoipa::path(
    post,
    path = "/books/{id}/select",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Catalog page after toggling", body = CatalogPage)
    )
)]
pub async fn toggle_select(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> Json<CatalogPage> {
    Json(state.services.catalog.toggle_select(&id).await)
}

/// Delete the selected book and its loans
#[utoipa::path(
    delete,
    path = "/catalog/selected",
    tag = "catalog",
    responses(
        (status = 200, description = "Selected book deleted, if any", body = BookActionResponse)
    )
)]
pub async fn delete_selected(State(state): State<crate::AppState>) -> Json<BookActionResponse> {
    Json(BookActionResponse::from_id(
        state.services.catalog.delete_selected().await,
    ))
}

/// Open the form in add mode
#[utoipa::path(
    post,
    path = "/catalog/form/add",
    tag = "catalog",
    responses(
        (status = 200, description = "Form opened", body = FormMode)
    )
)]
pub async fn begin_add(State(state): State<crate::AppState>) -> Json<FormMode> {
    Json(state.services.catalog.begin_add().await)
}

/// Open the form on the selected book
#[utoipa::path(
    post,
    path = "/catalog/form/edit",
    tag = "catalog",
    responses(
        (status = 200, description = "Form opened with the selected book", body = FormMode),
        (status = 400, description = "No book selected")
    )
)]
pub async fn begin_edit(State(state): State<crate::AppState>) -> AppResult<Json<FormMode>> {
    Ok(Json(state.services.catalog.begin_edit().await?))
}

/// Submit the form
#[utoipa::path(
    post,
    path = "/catalog/form",
    tag = "catalog",
    request_body = BookInput,
    responses(
        (status = 200, description = "Book added or updated", body = BookActionResponse),
        (status = 400, description = "No form is open")
    )
)]
pub async fn submit_form(
    State(state): State<crate::AppState>,
    Json(input): Json<BookInput>,
) -> AppResult<Json<BookActionResponse>> {
    let affected = state.services.catalog.submit_form(input).await?;
    Ok(Json(BookActionResponse::from_id(affected)))
}

/// Close the form without saving
#[utoipa::path(
    delete,
    path = "/catalog/form",
    tag = "catalog",
    responses(
        (status = 204, description = "Form closed")
    )
)]
pub async fn cancel_form(State(state): State<crate::AppState>) -> StatusCode {
    state.services.catalog.cancel_form().await;
    StatusCode::NO_CONTENT
}
