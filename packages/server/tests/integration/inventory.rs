use serde_json::json;

use crate::common::{TestApp, routes};

mod register {
    use super::*;

    #[tokio::test]
    async fn register_returns_created_item() {
        let app = TestApp::spawn().await;

        let res = app.register(Some("Drill"), Some("Cordless"), None).await;

        assert_eq!(res.status, 201);
        assert_eq!(
            res.body,
            json!({
                "id": 1,
                "name": "Drill",
                "description": "Cordless",
                "photoUrl": null,
            })
        );
    }

    #[tokio::test]
    async fn description_defaults_to_empty() {
        let app = TestApp::spawn().await;

        let res = app.register(Some("Saw"), None, None).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["description"], "");
    }

    #[tokio::test]
    async fn register_with_photo_exposes_public_photo_url() {
        let app = TestApp::spawn().await;

        let res = app
            .register(Some("Camera"), None, Some(("cam.png", b"PNG".to_vec())))
            .await;

        assert_eq!(res.status, 201);
        let id = res.id();
        assert_eq!(res.body["photoUrl"], format!("/inventory/{id}/photo"));

        let photos = app.stored_photos();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].extension().unwrap(), "png");
    }

    #[tokio::test]
    async fn empty_file_input_counts_as_no_photo() {
        let app = TestApp::spawn().await;
        let form = reqwest::multipart::Form::new()
            .text("inventory_name", "Shelf")
            .part("photo", reqwest::multipart::Part::bytes(Vec::new()));

        let res = app
            .client
            .post(app.url(routes::REGISTER))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 201);
        let body: serde_json::Value = res.json().await.unwrap();
        assert!(body["photoUrl"].is_null());
        assert!(app.stored_photos().is_empty());
    }

    #[tokio::test]
    async fn missing_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.register(None, Some("x"), None).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_storing_photo_or_consuming_id() {
        let app = TestApp::spawn().await;

        let res = app
            .register(Some("   "), Some("x"), Some(("a.jpg", b"JPEG".to_vec())))
            .await;
        assert_eq!(res.status, 400);
        assert!(app.stored_photos().is_empty());

        let list = app.get(routes::INVENTORY).await;
        assert_eq!(list.body, json!([]));

        let id = app.create_item("First", "").await;
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn concurrent_registrations_get_distinct_ids() {
        let app = std::sync::Arc::new(TestApp::spawn().await);

        let mut handles = Vec::new();
        for i in 0..20 {
            let app = app.clone();
            handles.push(tokio::spawn(async move {
                app.create_item(&format!("item-{i}"), "").await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn list_is_in_creation_order() {
        let app = TestApp::spawn().await;
        for name in ["Drill", "Saw", "Hammer"] {
            app.create_item(name, "").await;
        }
        app.put_json(&routes::item(1), &json!({"name": "Impact drill"}))
            .await;

        let res = app.get(routes::INVENTORY).await;

        assert_eq!(res.status, 200);
        let names: Vec<_> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Impact drill", "Saw", "Hammer"]);
    }

    #[tokio::test]
    async fn empty_inventory_lists_nothing() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::INVENTORY).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn get_returns_item() {
        let app = TestApp::spawn().await;
        let id = app.create_item("Drill", "Cordless").await;

        let res = app.get(&routes::item(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Drill");
        assert_eq!(res.body["description"], "Cordless");
        assert!(res.body["photoUrl"].is_null());
    }

    #[tokio::test]
    async fn get_unknown_item_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::item(99)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get("/inventory/abc").await;

        assert_eq!(res.status, 404);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn partial_update_keeps_omitted_fields() {
        let app = TestApp::spawn().await;
        let id = app.create_item("A", "B").await;

        let res = app
            .put_json(&routes::item(id), &json!({"description": "C"}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "A");
        assert_eq!(res.body["description"], "C");
    }

    #[tokio::test]
    async fn blank_fields_are_ignored() {
        let app = TestApp::spawn().await;
        let id = app.create_item("A", "B").await;

        let res = app
            .put_json(&routes::item(id), &json!({"name": "  ", "description": ""}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "A");
        assert_eq!(res.body["description"], "B");
    }

    #[tokio::test]
    async fn empty_body_returns_item_unchanged() {
        let app = TestApp::spawn().await;
        let id = app.create_item("A", "B").await;

        let res = app
            .client
            .put(app.url(&routes::item(id)))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 200);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["name"], "A");
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_item("A", "B").await;

        let res = app
            .client
            .put(app.url(&routes::item(id)))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn update_unknown_item_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.put_json(&routes::item(5), &json!({"name": "X"})).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn update_is_visible_to_later_reads() {
        let app = TestApp::spawn().await;
        let id = app.create_item("A", "B").await;
        app.put_json(&routes::item(id), &json!({"name": "Z"})).await;

        let res = app.get(&routes::item(id)).await;

        assert_eq!(res.body["name"], "Z");
        assert_eq!(res.body["description"], "B");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_item() {
        let app = TestApp::spawn().await;
        let keep = app.create_item("Keep", "").await;
        let gone = app.create_item("Gone", "").await;

        let res = app.delete(&routes::item(gone)).await;
        assert_eq!(res.status, 200);
        assert!(res.text.is_empty());

        assert_eq!(app.get(&routes::item(gone)).await.status, 404);
        let list = app.get(routes::INVENTORY).await;
        let ids: Vec<u64> = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, [keep]);
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_item("Once", "").await;

        assert_eq!(app.delete(&routes::item(id)).await.status, 200);
        assert_eq!(app.delete(&routes::item(id)).await.status, 404);
    }

    #[tokio::test]
    async fn delete_releases_photo_file() {
        let app = TestApp::spawn().await;
        let id = app.create_item_with_photo("Cam", b"JPEG").await;
        assert_eq!(app.stored_photos().len(), 1);

        app.delete(&routes::item(id)).await;

        assert!(app.stored_photos().is_empty());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let app = TestApp::spawn().await;
        let first = app.create_item("A", "").await;
        let second = app.create_item("B", "").await;
        app.delete(&routes::item(second)).await;

        let third = app.create_item("C", "").await;

        assert!(third > second && second > first);
    }
}
