//! API handlers for Bookcat REST endpoints

pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod view;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Catalog
        .route("/catalog", get(books::get_catalog))
        .route("/catalog/filter", put(books::set_filter))
        .route("/catalog/selected", delete(books::delete_selected))
        .route("/catalog/form", post(books::submit_form).delete(books::cancel_form))
        .route("/catalog/form/add", post(books::begin_add))
        .route("/catalog/form/edit", post(books::begin_edit))
        // Books
        .route("/books", post(books::create_book))
        .route("/books/:id", put(books::update_book).delete(books::delete_book))
        .route("/books/:id/select", post(books::toggle_select))
        // Loans
        .route("/loans", get(loans::get_loans).post(loans::create_loan))
        // View
        .route("/view", get(view::get_view))
        .route("/view/loans", post(view::manage_loans).delete(view::quit_loans))
        .route("/view/details", delete(view::dismiss_details))
        .route("/view/details/:id", post(view::open_details))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
