//! Category endpoint tests: creation, addressing, moves and deletion.

use http::StatusCode;
use serde_json::json;

use inkpress_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_root_exists_on_startup() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/categories?path=/", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["category"]["path"], "/");
    assert!(response.body["data"]["category"]["parent_id"].is_null());
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["store"], "memory");
}

#[tokio::test]
async fn test_create_nested_categories_and_resolve() {
    let app = TestApp::new().await;
    let token = app.editor();

    app.create_category(&token, "/", "guides").await;
    app.create_category(&token, "/guides", "rust").await;

    let response = app
        .request("GET", "/api/categories?path=/guides/rust", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["category"]["path"], "/guides/rust");

    let parent = app
        .request("GET", "/api/categories?path=/guides", None, None)
        .await;
    let subcategories = parent.body["data"]["subcategories"]
        .as_array()
        .expect("subcategories");
    assert_eq!(subcategories.len(), 1);
    assert_eq!(subcategories[0]["path"], "/guides/rust");
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "directory_name": "blog", "name": "Blog" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_create_rejects_bad_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "directory_name": "blog", "name": "Blog" })),
            Some("not-a-jwt"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reader_cannot_create_category() {
    let app = TestApp::new().await;
    let token = app.token("visitor", UserRole::Reader);

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "directory_name": "blog", "name": "Blog" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_directory_name_is_rejected() {
    let app = TestApp::new().await;
    let token = app.editor();

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "directory_name": "a/b", "name": "Slashy" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_NAME");
}

#[tokio::test]
async fn test_empty_directory_name_is_an_invalid_name() {
    let app = TestApp::new().await;
    let token = app.editor();

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "directory_name": "", "name": "Nameless" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_NAME");
}

#[tokio::test]
async fn test_long_word_token_is_accepted() {
    let app = TestApp::new().await;
    let token = app.editor();
    let long = "a".repeat(300);

    app.create_category(&token, "/", &long).await;

    let response = app
        .request("GET", &format!("/api/categories?path=/{long}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_category_conflicts() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "blog").await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "directory_name": "blog", "name": "Again" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "NAME_CONFLICT");
    assert_eq!(response.body["details"]["occupant"], "category");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestApp::new().await;

    let missing = app
        .request("GET", "/api/categories?path=/nowhere", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "PATH_NOT_FOUND");

    let malformed = app
        .request("GET", "/api/categories?path=nowhere", None, None)
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["error"], "INVALID_PATH");
}

#[tokio::test]
async fn test_move_under_own_descendant_is_a_cycle() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "a").await;
    app.create_category(&token, "/a", "b").await;
    app.create_category(&token, "/a/b", "c").await;

    let response = app
        .request(
            "POST",
            "/api/categories/move",
            Some(json!({ "path": "/a", "new_parent_path": "/a/b/c" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CYCLE");

    let unchanged = app
        .request("GET", "/api/categories?path=/a/b/c", None, None)
        .await;
    assert_eq!(unchanged.status, StatusCode::OK);
}

#[tokio::test]
async fn test_move_rewrites_descendant_paths() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "drafts").await;
    app.create_category(&token, "/drafts", "series").await;
    app.create_category(&token, "/drafts/series", "part_one").await;
    app.create_category(&token, "/", "published").await;

    let response = app
        .request(
            "POST",
            "/api/categories/move",
            Some(json!({ "path": "/drafts/series", "new_parent_path": "/published" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["path"], "/published/series");

    let moved = app
        .request(
            "GET",
            "/api/categories?path=/published/series/part_one",
            None,
            None,
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);

    let old = app
        .request("GET", "/api/categories?path=/drafts/series", None, None)
        .await;
    assert_eq!(old.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_through_update() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "news").await;

    let response = app
        .request(
            "PATCH",
            "/api/categories?path=/news",
            Some(json!({ "directory_name": "updates", "name": "Updates" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["path"], "/updates");
    assert_eq!(response.body["data"]["name"], "Updates");

    let old = app
        .request("GET", "/api/categories?path=/news", None, None)
        .await;
    assert_eq!(old.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_root_cannot_be_moved_or_deleted() {
    let app = TestApp::new().await;
    let admin = app.admin();
    app.create_category(&admin, "/", "box").await;

    let moved = app
        .request(
            "POST",
            "/api/categories/move",
            Some(json!({ "path": "/", "new_parent_path": "/box" })),
            Some(&admin),
        )
        .await;
    assert_ne!(moved.status, StatusCode::OK);

    let deleted = app
        .request("DELETE", "/api/categories?path=/", None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_cascades_and_requires_admin() {
    let app = TestApp::new().await;
    let editor = app.editor();
    app.create_category(&editor, "/", "old").await;
    app.create_category(&editor, "/old", "nested").await;
    app.create_article(
        &editor,
        json!({ "category_path": "/old/nested", "filename": "post", "title": "Post" }),
    )
    .await;

    let forbidden = app
        .request("DELETE", "/api/categories?path=/old", None, Some(&editor))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let admin = app.admin();
    let response = app
        .request("DELETE", "/api/categories?path=/old", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["categories"], 2);
    assert_eq!(response.body["data"]["articles"], 1);

    let gone = app
        .request("GET", "/api/articles?path=/old/nested/post", None, None)
        .await;
    assert_eq!(gone.status, StatusCode::BAD_REQUEST);

    // The freed name can be reused.
    app.create_category(&editor, "/", "old").await;
}

#[tokio::test]
async fn test_tree_lists_children_by_name() {
    let app = TestApp::new().await;
    let token = app.editor();
    app.create_category(&token, "/", "zeta").await;
    app.create_category(&token, "/", "alpha").await;
    app.create_category(&token, "/alpha", "inner").await;
    app.create_article(&token, json!({ "category_path": "/alpha", "filename": "a1", "title": "A1" }))
        .await;

    let response = app.request("GET", "/api/categories/tree", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let root = &response.body["data"];
    assert_eq!(root["path"], "/");
    let children = root["children"].as_array().expect("children");
    let names: Vec<&str> = children
        .iter()
        .map(|c| c["directory_name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, ["alpha", "zeta"]);
    assert_eq!(children[0]["article_count"], 1);
    assert_eq!(children[0]["children"][0]["path"], "/alpha/inner");
}

#[tokio::test]
async fn test_cache_rebuild_is_admin_only() {
    let app = TestApp::new().await;
    let editor = app.editor();
    app.create_category(&editor, "/", "docs").await;

    let forbidden = app
        .request("POST", "/api/categories/cache/rebuild", None, Some(&editor))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let admin = app.admin();
    let response = app
        .request("POST", "/api/categories/cache/rebuild", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
}
