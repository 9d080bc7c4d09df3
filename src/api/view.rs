//! Screen transition endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::view::ViewState};

/// Current screen, form and detail page
#[utoipa::path(
    get,
    path = "/view",
    tag = "view",
    responses(
        (status = 200, description = "Current view state", body = ViewState)
    )
)]
pub async fn get_view(State(state): State<crate::AppState>) -> Json<ViewState> {
    Json(state.services.view.state().await)
}

/// Switch from the catalog to loan management
#[utoipa::path(
    post,
    path = "/view/loans",
    tag = "view",
    responses(
        (status = 200, description = "Loan management shown", body = ViewState),
        (status = 409, description = "Not on the catalog screen")
    )
)]
pub async fn manage_loans(State(state): State<crate::AppState>) -> AppResult<Json<ViewState>> {
    Ok(Json(state.services.view.manage_loans().await?))
}

/// Leave loan management
#[utoipa::path(
    delete,
    path = "/view/loans",
    tag = "view",
    responses(
        (status = 200, description = "Catalog shown", body = ViewState),
        (status = 409, description = "Not on the loan management screen")
    )
)]
pub async fn quit_loans(State(state): State<crate::AppState>) -> AppResult<Json<ViewState>> {
    Ok(Json(state.services.view.quit_loans().await?))
}

/// Show a book's detail page and start looking up similar books
#[utoipa::path(
    post,
    path = "/view/details/{id}",
    tag = "view",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Detail page shown, lookup pending", body = ViewState),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Not on the catalog screen")
    )
)]
pub async fn open_details(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ViewState>> {
    Ok(Json(state.services.view.open_details(&id).await?))
}

/// Close the detail page
#[utoipa::path(
    delete,
    path = "/view/details",
    tag = "view",
    responses(
        (status = 200, description = "Catalog shown", body = ViewState),
        (status = 409, description = "No detail page open")
    )
)]
pub async fn dismiss_details(State(state): State<crate::AppState>) -> AppResult<Json<ViewState>> {
    Ok(Json(state.services.view.dismiss_details().await?))
}
