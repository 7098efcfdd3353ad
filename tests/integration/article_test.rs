//! Article endpoint tests: shared namespace, ordering and visibility.

use http::StatusCode;
use serde_json::json;

use inkpress_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_article_cannot_take_a_category_name() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "blog").await;

    let response = app
        .request(
            "POST",
            "/api/articles",
            Some(json!({ "category_path": "/", "filename": "blog", "title": "Blog post" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "NAME_CONFLICT");
    assert_eq!(response.body["details"]["occupant"], "category");
}

#[tokio::test]
async fn test_category_cannot_take_an_article_name() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_article(&token, json!({ "filename": "about", "title": "About" }))
        .await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "directory_name": "about", "name": "About" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["occupant"], "article");
}

#[tokio::test]
async fn test_create_and_read_article() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "blog").await;

    let created = app
        .request(
            "POST",
            "/api/articles",
            Some(json!({
                "category_path": "/blog",
                "filename": "hello",
                "title": "Hello",
                "content": "First post",
                "tags": ["rust", "rust", "intro"],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    assert_eq!(created.body["data"]["path"], "/blog/hello");
    assert_eq!(created.body["data"]["authors"][0]["username"], "editor");

    let response = app
        .request("GET", "/api/articles?path=/blog/hello", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["content"], "First post");
    assert_eq!(data["category"]["path"], "/blog");
    assert_eq!(data["tags"], json!(["rust", "intro"]));
    assert!(data.get("draft_content").is_none());
}

#[tokio::test]
async fn test_article_lookup_errors() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "blog").await;

    let missing_leaf = app
        .request("GET", "/api/articles?path=/blog/nope", None, None)
        .await;
    assert_eq!(missing_leaf.status, StatusCode::NOT_FOUND);
    assert_eq!(missing_leaf.body["error"], "PATH_NOT_FOUND");

    let missing_prefix = app
        .request("GET", "/api/articles?path=/nope/nope", None, None)
        .await;
    assert_eq!(missing_prefix.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_prefix.body["error"], "INVALID_PATH");

    let root = app.request("GET", "/api/articles?path=/", None, None).await;
    assert_eq!(root.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_filename_is_an_invalid_name() {
    let app = TestApp::new().await;
    let token = app.editor();

    let response = app
        .request(
            "POST",
            "/api/articles",
            Some(json!({ "filename": "", "title": "Untitled" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_NAME");
}

#[tokio::test]
async fn test_reader_cannot_write_articles() {
    let app = TestApp::new().await;
    let token = app.token("visitor", UserRole::Reader);

    let response = app
        .request(
            "POST",
            "/api/articles",
            Some(json!({ "filename": "spam", "title": "Spam" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_manual_category_orders_by_sorting_index() {
    let app = TestApp::new().await;
    let token = app.editor();
    let created = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "directory_name": "docs", "name": "Docs", "sorting_type": "manual" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);

    app.create_article(
        &token,
        json!({ "category_path": "/docs", "filename": "intro", "title": "Intro", "category_sorting_index": 2 }),
    )
    .await;
    app.create_article(
        &token,
        json!({ "category_path": "/docs", "filename": "setup", "title": "Setup", "category_sorting_index": 1 }),
    )
    .await;

    let response = app
        .request("GET", "/api/categories/articles?path=/docs", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["data"]["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|a| a["filename"].as_str().expect("filename"))
        .collect();
    assert_eq!(names, ["setup", "intro"]);
}

#[tokio::test]
async fn test_chronological_listing_respects_direction_and_limit() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "news").await;
    for (name, day) in [("b", "2024-02-01"), ("a", "2024-01-01"), ("c", "2024-03-01")] {
        app.create_article(
            &token,
            json!({ "category_path": "/news", "filename": name, "title": name, "publish_time": day }),
        )
        .await;
    }

    let response = app
        .request(
            "GET",
            "/api/categories/articles?path=/news&direction=desc&limit=2",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let page = &response.body["data"];
    assert_eq!(page["total_items"], 3);
    let names: Vec<&str> = page["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|a| a["filename"].as_str().expect("filename"))
        .collect();
    assert_eq!(names, ["c", "b"]);
}

#[tokio::test]
async fn test_hidden_article_is_only_visible_to_editors() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_article(
        &token,
        json!({ "filename": "secret", "title": "Secret", "is_visible": false }),
    )
    .await;

    let public = app
        .request("GET", "/api/articles?path=/secret", None, None)
        .await;
    assert_eq!(public.status, StatusCode::NOT_FOUND);

    let editor = app
        .request("GET", "/api/articles?path=/secret", None, Some(&token))
        .await;
    assert_eq!(editor.status, StatusCode::OK);
    assert_eq!(editor.body["data"]["is_visible"], false);
}

#[tokio::test]
async fn test_rename_and_move_article() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "inbox").await;
    app.create_category(&token, "/", "archive").await;
    app.create_article(
        &token,
        json!({ "category_path": "/inbox", "filename": "memo", "title": "Memo" }),
    )
    .await;

    let response = app
        .request(
            "PATCH",
            "/api/articles?path=/inbox/memo",
            Some(json!({ "filename": "memo_2024", "category_path": "/archive" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["path"], "/archive/memo_2024");

    let old = app
        .request("GET", "/api/articles?path=/inbox/memo", None, None)
        .await;
    assert_eq!(old.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_move_article_onto_category_name_conflicts() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "taken").await;
    app.create_article(&token, json!({ "filename": "loose", "title": "Loose" }))
        .await;

    let response = app
        .request(
            "PATCH",
            "/api/articles?path=/loose",
            Some(json!({ "filename": "taken" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["occupant"], "category");
}

#[tokio::test]
async fn test_unknown_featured_image_is_rejected() {
    let app = TestApp::new().await;
    let token = app.editor();

    let response = app
        .request(
            "POST",
            "/api/articles",
            Some(json!({
                "filename": "pic",
                "title": "Picture",
                "featured_image_path": "/images/missing.png",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "INVALID_REFERENCE");
}

#[tokio::test]
async fn test_delete_article_frees_the_name() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_article(&token, json!({ "filename": "temp", "title": "Temp", "tags": ["misc"] }))
        .await;

    let response = app
        .request("DELETE", "/api/articles?path=/temp", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    app.create_category(&token, "/", "temp").await;

    let tags = app.request("GET", "/api/tags", None, None).await;
    assert_eq!(tags.status, StatusCode::OK);
    assert!(
        tags.body["data"]
            .as_array()
            .expect("tags")
            .iter()
            .any(|t| t["name"] == "misc")
    );
}
