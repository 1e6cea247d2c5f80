//! Book model, form input and list query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::error::FieldError;

/// Rows shown per page on the list view
pub const PAGE_SIZE: i64 = 5;

/// Longest title, author or genre the `books` columns hold
pub const MAX_TEXT_CHARS: usize = 255;

/// Form fields in display order; validation errors are reported in this order
const FORM_FIELDS: [&str; 4] = ["title", "author", "genre", "year"];

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated field values for an insert or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

impl BookChanges {
    /// Overwrite the editable fields of `book`
    pub fn apply_to(&self, book: &mut Book) {
        book.title = self.title.clone();
        book.author = self.author.clone();
        book.genre = self.genre.clone();
        book.year = self.year;
    }
}

/// Raw create/update form submission.
///
/// Every field is kept as submitted text so a rejected form can be shown
/// again exactly as the visitor typed it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Please provide a value for \"title\""))]
    pub title: String,
    #[validate(length(min = 1, message = "Please provide a value for \"author\""))]
    pub author: String,
    pub genre: String,
    pub year: String,
}

impl BookForm {
    /// Trim the fields and check them, yielding the values to store
    pub fn into_changes(self) -> Result<BookChanges, Vec<FieldError>> {
        let form = BookForm {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: self.genre.trim().to_string(),
            year: self.year.trim().to_string(),
        };

        let mut errors = match form.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };

        for (field, value) in [
            ("title", &form.title),
            ("author", &form.author),
            ("genre", &form.genre),
        ] {
            if value.chars().count() > MAX_TEXT_CHARS {
                errors.push(FieldError::new(
                    field,
                    format!("\"{}\" must be at most {} characters", field, MAX_TEXT_CHARS),
                ));
            }
        }

        let year = if form.year.is_empty() {
            None
        } else {
            match form.year.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    errors.push(FieldError::new("year", "\"year\" must be a whole number"));
                    None
                }
            }
        };

        if !errors.is_empty() {
            errors.sort_by_key(|e| field_rank(&e.field));
            return Err(errors);
        }

        Ok(BookChanges {
            title: form.title,
            author: form.author,
            genre: (!form.genre.is_empty()).then_some(form.genre),
            year,
        })
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone().unwrap_or_default(),
            year: book.year.map(|y| y.to_string()).unwrap_or_default(),
        }
    }
}

fn field_rank(field: &str) -> usize {
    FORM_FIELDS
        .iter()
        .position(|f| *f == field)
        .unwrap_or(FORM_FIELDS.len())
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("\"{}\" is invalid", field));
                FieldError::new(field.clone(), message)
            })
        })
        .collect()
}

/// List request parameters, as received from the query string or search form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<String>,
}

/// Contiguous slice of the ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

impl Window {
    /// Window for a 1-based page number; pages below 1 clamp to the first page
    pub fn for_page(page: Option<i64>) -> Self {
        let offset = match page {
            Some(p) => p.saturating_sub(1).saturating_mul(PAGE_SIZE).max(0),
            None => 0,
        };
        Self {
            offset,
            limit: PAGE_SIZE,
        }
    }
}

/// Search filter and page window for listing books
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookQuery {
    /// Substring to look for in title, author, genre or year
    pub search: Option<String>,
    /// `None` lists every matching row
    pub window: Option<Window>,
}

impl BookQuery {
    /// Every book, unpaginated
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_params(params: &ListParams) -> Self {
        let search = params
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let page = params
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok());

        Self {
            search,
            window: Some(Window::for_page(page)),
        }
    }

    /// 1-based page the window starts on
    pub fn current_page(&self) -> i64 {
        self.window
            .map(|w| w.offset / w.limit.max(1) + 1)
            .unwrap_or(1)
    }

    /// Whether `book` passes the search filter
    pub fn matches(&self, book: &Book) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };

        book.title.contains(term)
            || book.author.contains(term)
            || book.genre.as_deref().is_some_and(|g| g.contains(term))
            || book.year.is_some_and(|y| y.to_string().contains(term))
    }
}

/// Pages needed to show `total` rows
pub fn total_pages(total: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (total + PAGE_SIZE - 1) / PAGE_SIZE
    }
}

/// Rows of one window plus the count of all matching rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: i64,
}
