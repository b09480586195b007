use reqwest::Method;

use crate::common::{REGISTER_FORM_HTML, TestApp, routes};

#[tokio::test]
async fn unsupported_methods_on_known_paths_are_rejected() {
    let app = TestApp::spawn().await;
    let id = app.create_item("Drill", "").await;

    let cases = [
        (Method::GET, routes::REGISTER.to_string()),
        (Method::DELETE, routes::INVENTORY.to_string()),
        (Method::POST, routes::item(id)),
        (Method::PATCH, routes::item(id)),
        (Method::DELETE, routes::photo(id)),
        (Method::GET, routes::SEARCH.to_string()),
    ];

    for (method, path) in cases {
        let res = app.request(method.clone(), &path).await;
        assert_eq!(res.status, 405, "{method} {path}");
    }
}

#[tokio::test]
async fn unknown_paths_are_rejected() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/nope").await.status, 405);
    assert_eq!(app.request(Method::POST, "/nope").await.status, 405);
}

#[tokio::test]
async fn root_redirects_to_docs() {
    let app = TestApp::spawn().await;

    let res = app.client.get(app.url("/")).send().await.unwrap();

    assert!(res.status().is_redirection());
    assert_eq!(res.headers()["location"], "/docs");
}

#[tokio::test]
async fn openapi_document_lists_endpoints() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().unwrap();
    for path in [
        "/register",
        "/inventory",
        "/inventory/{id}",
        "/inventory/{id}/photo",
        "/search",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn static_forms_are_served() {
    let app = TestApp::spawn().await;

    let res = app.get("/RegisterForm.html").await;

    assert_eq!(res.status, 200);
    assert!(res.content_type.unwrap().starts_with("text/html"));
    assert_eq!(res.text, REGISTER_FORM_HTML);
}
