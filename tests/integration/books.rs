use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};

use crate::{test_app, test_app_in};

#[tokio::test]
async fn create_redirects_to_the_new_book() {
    let app = test_app();

    let (status, location, _) = app
        .post_form_with_location("/books/new", "title=Dune&author=Frank+Herbert&genre=&year=1965")
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/books/1"));

    let (status, body) = app.get("/books/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Dune""#));
    assert!(body.contains(r#"value="1965""#));
}

#[tokio::test]
async fn create_also_accepts_the_collection_path() {
    let app = test_app();

    let (status, location, _) = app
        .post_form_with_location("/books", "title=Emma&author=Jane+Austen")
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/books/1"));
    assert_eq!(app.count().await, 1);
}

#[tokio::test]
async fn create_without_title_or_author_redisplays_the_form() {
    let app = test_app();

    let (status, body) = app
        .post_form("/books/new", "title=&author=+&genre=Poetry&year=")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please provide a value for &quot;title&quot;"));
    assert!(body.contains("Please provide a value for &quot;author&quot;"));
    assert!(body.contains(r#"value="Poetry""#));
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn detail_of_missing_book_is_404_with_message() {
    let app = test_app();

    let (status, body) = app.get("/books/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("find the book you were looking for"));

    let (status, _) = app.get("/books/not-a-number").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rerenders_with_saved_values() {
    let app = test_app();
    let id = app.seed("Emma", "Jane Austen", None, None).await;

    let (status, body) = app
        .post_form(
            &format!("/books/{id}"),
            "title=Emma&author=Jane+Austen&genre=Romance&year=1815",
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Romance""#));

    let (_, body) = app.get(&format!("/books/{id}")).await;
    assert!(body.contains(r#"value="1815""#));
}

#[tokio::test]
async fn invalid_update_keeps_the_stored_book() {
    let app = test_app();
    let id = app.seed("Emma", "Jane Austen", None, None).await;

    let (status, body) = app
        .post_form(&format!("/books/{id}"), "title=&author=Someone+Else")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please provide a value for &quot;title&quot;"));
    assert!(body.contains(r#"value="Someone Else""#));

    let (_, body) = app.get(&format!("/books/{id}")).await;
    assert!(body.contains(r#"value="Jane Austen""#));
}

#[tokio::test]
async fn update_of_missing_book_is_404() {
    let app = test_app();
    let (status, _) = app.post_form("/books/5", "title=A&author=B").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_and_redirects_to_list() {
    let app = test_app();
    let id = app.seed("Hamlet", "William Shakespeare", None, None).await;

    let (status, location, _) = app
        .post_form_with_location(&format!("/books/{id}/delete"), "")
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn delete_of_missing_book_is_bare_404() {
    let app = test_app();
    app.seed("Hamlet", "William Shakespeare", None, None).await;

    let (status, body) = app.post_form("/books/42/delete", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    assert_eq!(app.count().await, 1);
}

#[tokio::test]
async fn search_matches_each_of_the_four_fields() {
    let app = test_app();
    app.seed("Dune", "Frank Herbert", Some("Science Fiction"), Some(1965))
        .await;
    app.seed("Beloved", "Toni Morrison", Some("Literary"), Some(1987))
        .await;
    app.seed("Emma", "Jane Austen", Some("Romance"), Some(1815))
        .await;

    for (term, title) in [
        ("Belov", "Beloved"),
        ("Austen", "Emma"),
        ("Science", "Dune"),
        ("1987", "Beloved"),
    ] {
        let (status, body) = app.get(&format!("/?search={term}")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<p class="total">1 book</p>"#), "term {term}");
        assert!(body.contains(title), "term {term}");
        assert!(body.contains(&format!(r#"value="{term}""#)), "term {term}");
    }
}

#[tokio::test]
async fn search_can_be_posted_as_a_form() {
    let app = test_app();
    app.seed("Dune", "Frank Herbert", None, None).await;
    app.seed("Emma", "Jane Austen", None, None).await;

    let (status, body) = app.post_form("/", "search=Herbert").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Dune"));
    assert!(!body.contains("Emma"));
}

#[tokio::test]
async fn twelve_books_paginate_into_three_pages() {
    let app = test_app();
    for i in 1..=12 {
        app.seed(&format!("Title {i}"), "Author", None, None).await;
    }
    let link = |id: i32| format!(r#"href="/books/{id}""#);

    let (_, first) = app.get("/").await;
    assert!((1..=5).all(|id| first.contains(&link(id))));
    assert!(!first.contains(&link(6)));
    assert!(first.contains("?page=3"));
    assert!(!first.contains("?page=4"));
    assert!(first.contains(r#"<p class="total">12 books</p>"#));

    let (_, second) = app.get("/?page=2").await;
    assert!((6..=10).all(|id| second.contains(&link(id))));
    assert!(!second.contains(&link(5)));
    assert!(!second.contains(&link(11)));

    let (_, third) = app.get("/?page=3").await;
    assert!(third.contains(&link(11)));
    assert!(third.contains(&link(12)));
    assert!(!third.contains(&link(10)));
}

#[tokio::test]
async fn pagination_links_keep_the_search_term() {
    let app = test_app();
    for i in 1..=6 {
        app.seed(&format!("Saga {i}"), "Author", None, None).await;
    }
    app.seed("Other", "Author", None, None).await;

    let (_, body) = app.get("/?search=Saga").await;
    assert!(body.contains("?page=2&amp;search=Saga"));
    assert!(body.contains(r#"<p class="total">6 books</p>"#));
}

#[tokio::test]
async fn out_of_range_pages_fall_back_to_first() {
    let app = test_app();
    for i in 1..=6 {
        app.seed(&format!("Title {i}"), "Author", None, None).await;
    }

    for uri in ["/?page=0", "/?page=-2", "/?page=abc", "/?page="] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.contains(r#"href="/books/1""#), "{uri}");
    }
}

#[tokio::test]
async fn books_route_lists_everything() {
    let app = test_app();
    for i in 1..=7 {
        app.seed(&format!("Title {i}"), "Author", None, None).await;
    }

    let (status, body) = app.get("/books").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/books/7""#));
    assert!(!body.contains("?page="));
}

#[tokio::test]
async fn new_book_form_renders() {
    let app = test_app();
    let (status, body) = app.get("/books/new").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="/books/new""#));
}

#[tokio::test]
async fn unknown_paths_render_not_found_page() {
    let app = test_app();
    let (status, body) = app.get("/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("does not exist"));
}

#[tokio::test]
async fn error_detail_only_shown_in_development() {
    let (_, dev) = test_app().get("/nowhere").await;
    assert!(dev.contains("<pre>"));

    let (_, prod) = test_app_in("production").get("/nowhere").await;
    assert!(!prod.contains("<pre>"));
    assert!(prod.contains("does not exist"));
}

#[tokio::test]
async fn health_reports_store_status() {
    let app = test_app();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn stylesheet_is_served() {
    let app = test_app();
    let (status, body) = app.get("/static/stylesheets/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("#wrapper"));
}

#[tokio::test]
async fn missing_static_file_renders_not_found_page() {
    let app = test_app();
    let (status, body) = app.get("/static/stylesheets/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("does not exist"));
}

#[tokio::test]
async fn malformed_query_renders_error_page() {
    let app = test_app();
    let (status, body) = app.get("/?search=a&search=b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("<h2>400</h2>"));
    assert!(body.contains("duplicate field"));
}

#[tokio::test]
async fn form_with_wrong_content_type_renders_error_page() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/books/new")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("title=Dune&author=Frank+Herbert"))
        .expect("request");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("<h2>400</h2>"));
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn overlong_title_redisplays_the_form() {
    let app = test_app();
    let title = "x".repeat(300);

    let (status, body) = app
        .post_form("/books", &format!("title={title}&author=Anon"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("must be at most 255 characters"));
    assert_eq!(app.count().await, 0);
}
