//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, view};
use crate::models::{book, loan, similar, view as view_models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookcat API",
        version = "0.1.0",
        description = "Single-user book catalog and loan manager",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Catalog
        books::get_catalog,
        books::set_filter,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::toggle_select,
        books::delete_selected,
        books::begin_add,
        books::begin_edit,
        books::submit_form,
        books::cancel_form,
        // Loans
        loans::get_loans,
        loans::create_loan,
        // View
        view::get_view,
        view::manage_loans,
        view::quit_loans,
        view::open_details,
        view::dismiss_details,
    ),
    components(
        schemas(
            // Books
            book::Book,
            book::BookInput,
            book::BookSummary,
            book::FilterCriteria,
            books::BookActionResponse,
            // Loans
            loan::Loan,
            loan::CreateLoan,
            loan::LoanDetails,
            loan::LoanPage,
            // View
            view_models::View,
            view_models::FormMode,
            view_models::DetailPage,
            view_models::CatalogPage,
            view_models::ViewState,
            similar::SimilarBook,
            // Health
            health::HealthResponse,
            crate::config::StorageBackend,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Books, selection, filter and form"),
        (name = "loans", description = "Loan management"),
        (name = "view", description = "Screen transitions")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
