//! HTTP routes for the Bookshelf catalog

pub mod books;
pub mod health;

use axum::{
    extract::{FromRequest, FromRequestParts, Request, State},
    handler::HandlerWithoutStateExt,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    error::{AppError, ErrorReport},
    templates, AppState,
};

/// Shown for any path without a route
pub const PAGE_NOT_FOUND: &str = "Sorry, but it looks like that location does not exist";

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    let static_dir =
        ServeDir::new(&state.config.server.static_dir).not_found_service(not_found.into_service());

    Router::new()
        .route("/", get(books::index).post(books::search_form))
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/new", get(books::new_book).post(books::create_book))
        .route("/books/:id", get(books::show_book).post(books::update_book))
        .route("/books/:id/delete", post(books::delete_book))
        .route("/health", get(health::health_check))
        .nest_service("/static", static_dir)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            render_error_page,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query string extractor whose rejections render the error page
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Form body extractor whose rejections render the error page
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct Form<T>(pub T);

async fn not_found() -> AppError {
    AppError::NotFound(PAGE_NOT_FOUND.to_string())
}

#[derive(Serialize)]
struct ErrorPage<'a> {
    message: &'a str,
    status: u16,
    detail: Option<&'a str>,
}

/// Turn error responses carrying an [`ErrorReport`] into the HTML error page
async fn render_error_page(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };
    let status = response.status();

    let page = ErrorPage {
        message: &report.message,
        status: status.as_u16(),
        detail: state
            .config
            .server
            .is_development()
            .then_some(report.detail.as_str()),
    };

    match templates::render("error.html", page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            (status, report.message).into_response()
        }
    }
}
