use crate::common::{TestApp, routes};

/// Register filler items so the next registration gets `id`.
async fn advance_to(app: &TestApp, id: u64) {
    for i in 1..id {
        app.create_item(&format!("filler-{i}"), "").await;
    }
}

#[tokio::test]
async fn item_without_photo_has_three_lines_even_when_photo_requested() {
    let app = TestApp::spawn().await;
    advance_to(&app, 7).await;
    assert_eq!(app.create_item("Drill", "Cordless").await, 7);

    let res = app
        .post_form(routes::SEARCH, &[("id", "7"), ("has_photo", "on")])
        .await;

    assert_eq!(res.status, 200);
    assert!(res.content_type.unwrap().starts_with("text/plain"));
    assert_eq!(res.text, "ID: 7\nName: Drill\nDescription: Cordless");
}

#[tokio::test]
async fn photo_line_uses_advertised_host_and_port() {
    let app = TestApp::spawn().await;
    advance_to(&app, 7).await;
    let res = app
        .register(
            Some("Drill"),
            Some("Cordless"),
            Some(("drill.jpg", b"JPEG".to_vec())),
        )
        .await;
    assert_eq!(res.id(), 7);

    let res = app
        .post_form(routes::SEARCH, &[("id", "7"), ("has_photo", "on")])
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.text,
        format!(
            "ID: 7\nName: Drill\nDescription: Cordless\nPhoto: http://127.0.0.1:{}/inventory/7/photo",
            app.addr.port()
        )
    );
}

#[tokio::test]
async fn photo_line_omitted_unless_requested() {
    let app = TestApp::spawn().await;
    let id = app.create_item_with_photo("Cam", b"JPEG").await;

    let res = app
        .post_form(routes::SEARCH, &[("id", &id.to_string())])
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.text, format!("ID: {id}\nName: Cam\nDescription: "));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.post_form(routes::SEARCH, &[("id", "12")]).await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn non_numeric_or_missing_id_is_not_found() {
    let app = TestApp::spawn().await;
    app.create_item("Drill", "").await;

    assert_eq!(
        app.post_form(routes::SEARCH, &[("id", "one")]).await.status,
        404
    );
    assert_eq!(
        app.post_form(routes::SEARCH, &[("has_photo", "on")])
            .await
            .status,
        404
    );
}

#[tokio::test]
async fn request_without_form_body_is_not_found() {
    let app = TestApp::spawn().await;
    app.create_item("Drill", "").await;

    let res = app.client.post(app.url(routes::SEARCH)).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 404);

    let res = app
        .client
        .post(app.url(routes::SEARCH))
        .header("content-type", "application/json")
        .body(r#"{"id":"1"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
}
