//! Book catalog pages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;

use super::{Form, Query};
use crate::{
    error::{AppError, AppResult, FieldError},
    models::book::{total_pages, Book, BookForm, BookQuery, ListParams},
    services::books::BOOK_NOT_FOUND,
    templates, AppState,
};

#[derive(Serialize)]
struct ListPage<'a> {
    books: &'a [Book],
    total: i64,
    search: Option<&'a str>,
    page: i64,
    pages: i64,
    paginated: bool,
}

#[derive(Serialize)]
struct FormPage<'a> {
    id: Option<i32>,
    book: &'a BookForm,
    errors: &'a [FieldError],
}

fn render_new(form: &BookForm, errors: &[FieldError]) -> AppResult<Html<String>> {
    let page = FormPage {
        id: None,
        book: form,
        errors,
    };
    Ok(Html(templates::render("new-book.html", page)?))
}

fn render_edit(id: i32, form: &BookForm, errors: &[FieldError]) -> AppResult<Html<String>> {
    let page = FormPage {
        id: Some(id),
        book: form,
        errors,
    };
    Ok(Html(templates::render("update-book.html", page)?))
}

/// Ids that are not integers can never match a row
fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok()
}

async fn render_list(state: &AppState, params: &ListParams) -> AppResult<Html<String>> {
    let query = BookQuery::from_params(params);
    let result = state.services.books.search(&query).await?;

    let page = ListPage {
        books: &result.books,
        total: result.total,
        search: query.search.as_deref(),
        page: query.current_page(),
        pages: total_pages(result.total),
        paginated: true,
    };
    Ok(Html(templates::render("index.html", page)?))
}

/// List view with optional `search` and `page` query parameters
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Html<String>> {
    render_list(&state, &params).await
}

/// Search submitted as a form body
pub async fn search_form(
    State(state): State<AppState>,
    Form(params): Form<ListParams>,
) -> AppResult<Html<String>> {
    render_list(&state, &params).await
}

/// Every book on one page
pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.books.list_all().await?;
    let total = books.len() as i64;

    let page = ListPage {
        books: &books,
        total,
        search: None,
        page: 1,
        pages: 1,
        paginated: false,
    };
    Ok(Html(templates::render("index.html", page)?))
}

pub async fn new_book() -> AppResult<Html<String>> {
    render_new(&BookForm::default(), &[])
}

/// Create a book, then go to its page; invalid input redisplays the form
pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.create(form.clone()).await {
        Ok(book) => Ok(Redirect::to(&format!("/books/{}", book.id)).into_response()),
        Err(AppError::Validation(errors)) => Ok(render_new(&form, &errors)?.into_response()),
        Err(e) => Err(e),
    }
}

pub async fn show_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id).ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;
    let book = state.services.books.get(id).await?;
    render_edit(book.id, &BookForm::from(&book), &[])
}

/// Apply the submitted fields and show the edit form again
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id).ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

    match state.services.books.update(id, form.clone()).await {
        Ok(book) => render_edit(book.id, &BookForm::from(&book), &[]),
        Err(AppError::Validation(errors)) => render_edit(id, &form, &errors),
        Err(e) => Err(e),
    }
}

/// Delete and return to the list; unknown ids get a bare 404
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    match state.services.books.delete(id).await {
        Ok(()) => Ok(Redirect::to("/").into_response()),
        Err(AppError::NotFound(_)) => Ok(StatusCode::NOT_FOUND.into_response()),
        Err(e) => Err(e),
    }
}
