mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;

use support::build_app;

#[tokio::test]
async fn test_product_mutations_require_token() -> anyhow::Result<()> {
    let t = build_app().await?;
    let body = json!({"name": "Widget", "description": "x", "price": 10});

    let missing = t.json(Method::POST, "/products", None, Some(body.clone())).await?;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json(), json!({"message": "token not provided"}));

    let forged = t.json(Method::POST, "/products", Some("forged.token.value"), Some(body)).await?;
    assert_eq!(forged.status, StatusCode::FORBIDDEN);

    for (method, uri) in [(Method::PUT, "/products/1"), (Method::DELETE, "/products/1"), (Method::POST, "/services"), (Method::DELETE, "/services/1")] {
        assert_eq!(t.json(method, uri, None, None).await?.status, StatusCode::UNAUTHORIZED, "{uri}");
    }
    Ok(())
}

#[tokio::test]
async fn test_multipart_create_with_image() -> anyhow::Result<()> {
    let t = build_app().await?;
    let token = t.register("shop@example.com").await?;
    let png: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

    let resp = t
        .multipart(
            Method::POST,
            "/products",
            &token,
            &[("name", "Widget"), ("description", "x"), ("price", "10")],
            Some(("widget.png", png)),
        )
        .await?;
    assert_eq!(resp.status, StatusCode::CREATED);
    let product = resp.json();
    assert_eq!(product["price"], 10);
    assert_eq!(product["name"], "Widget");
    let image_url = product["imageUrl"].as_str().unwrap_or_default().to_string();
    assert!(image_url.starts_with("/uploads/") && image_url.ends_with(".png"), "{image_url}");

    let served = t.get(&image_url).await?;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(served.bytes, png);
    Ok(())
}

#[tokio::test]
async fn test_get_product_by_id() -> anyhow::Result<()> {
    let t = build_app().await?;
    let token = t.register("get@example.com").await?;

    assert_eq!(t.get("/products/999").await?.status, StatusCode::NOT_FOUND);
    assert_eq!(t.get("/products/abc").await?.status, StatusCode::BAD_REQUEST);

    let created = t
        .json(Method::POST, "/products", Some(&token), Some(json!({"name": "Lamp", "description": "desk lamp", "price": "25"})))
        .await?;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.json()["id"].as_i64().unwrap_or_default();

    let fetched = t.get(&format!("/products/{id}")).await?;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(
        fetched.json(),
        json!({"id": id, "name": "Lamp", "description": "desk lamp", "price": 25, "imageUrl": null})
    );
    Ok(())
}

#[tokio::test]
async fn test_update_with_non_numeric_price_keeps_record() -> anyhow::Result<()> {
    let t = build_app().await?;
    let token = t.register("upd@example.com").await?;
    let created = t
        .json(Method::POST, "/products", Some(&token), Some(json!({"name": "Mug", "description": "tea", "price": 7})))
        .await?
        .json();
    let uri = format!("/products/{}", created["id"]);

    let resp = t.json(Method::PUT, &uri, Some(&token), Some(json!({"price": "seven"}))).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json(), json!({"message": "price must be an integer"}));
    assert_eq!(t.get(&uri).await?.json(), created);

    // a leading integer is accepted on update exactly like on create
    let resp = t.json(Method::PUT, &uri, Some(&token), Some(json!({"price": "12abc"}))).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["price"], 12);
    assert_eq!(resp.json()["name"], "Mug");
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_or_mistyped_price_is_rejected() -> anyhow::Result<()> {
    let t = build_app().await?;
    let token = t.register("range@example.com").await?;

    let huge = t
        .json(Method::POST, "/products", Some(&token), Some(json!({"name": "W", "description": "x", "price": 1e30})))
        .await?;
    assert_eq!(huge.status, StatusCode::BAD_REQUEST);
    assert_eq!(huge.json(), json!({"message": "price must be an integer"}));

    let boolean = t
        .json(Method::POST, "/products", Some(&token), Some(json!({"name": "W", "description": "x", "price": true})))
        .await?;
    assert_eq!(boolean.status, StatusCode::BAD_REQUEST);

    assert_eq!(t.get("/products").await?.json(), json!([]));
    Ok(())
}

#[tokio::test]
async fn test_image_files_follow_product_lifecycle() -> anyhow::Result<()> {
    let t = build_app().await?;
    let token = t.register("img@example.com").await?;

    let created = t
        .multipart(Method::POST, "/products", &token, &[("name", "Chair"), ("description", "oak"), ("price", "40")], Some(("a.jpg", &b"first"[..])))
        .await?
        .json();
    let uri = format!("/products/{}", created["id"]);
    let first = created["imageUrl"].as_str().unwrap_or_default().to_string();
    assert!(t.upload_path(&first).exists());

    let updated = t
        .multipart(Method::PUT, &uri, &token, &[("price", "45")], Some(("b.jpg", &b"second"[..])))
        .await?;
    assert_eq!(updated.status, StatusCode::OK);
    let updated = updated.json();
    let second = updated["imageUrl"].as_str().unwrap_or_default().to_string();
    assert_ne!(first, second);
    assert_eq!(updated["price"], 45);
    assert_eq!(updated["name"], "Chair");
    assert!(!t.upload_path(&first).exists());
    assert_eq!(t.get(&first).await?.status, StatusCode::NOT_FOUND);

    // update without a file keeps the current image
    let kept = t.multipart(Method::PUT, &uri, &token, &[("name", "Stool")], None).await?.json();
    assert_eq!(kept["imageUrl"], second.as_str());

    let deleted = t.json(Method::DELETE, &uri, Some(&token), None).await?;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json()["imageUrl"], second.as_str());
    assert!(!t.upload_path(&second).exists());
    Ok(())
}

#[tokio::test]
async fn test_service_crud_and_double_delete() -> anyhow::Result<()> {
    let t = build_app().await?;
    let token = t.register("svc@example.com").await?;

    let created = t
        .json(
            Method::POST,
            "/services",
            Some(&token),
            Some(json!({"name": "Haircut", "description": "30 min cut", "price": "30", "duration": 30})),
        )
        .await?;
    assert_eq!(created.status, StatusCode::CREATED);
    let service = created.json();
    assert_eq!(service["price"], 30);
    let uri = format!("/services/{}", service["id"]);

    let missing_field = t
        .json(Method::POST, "/services", Some(&token), Some(json!({"name": "x", "description": "y", "price": 1})))
        .await?;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_field.json(), json!({"message": "duration is required"}));

    let updated = t.json(Method::PUT, &uri, Some(&token), Some(json!({"duration": "45"}))).await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["duration"], 45);

    let first = t.json(Method::DELETE, &uri, Some(&token), None).await?;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json()["name"], "Haircut");
    assert_eq!(first.json()["duration"], 45);

    let second = t.json(Method::DELETE, &uri, Some(&token), None).await?;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(second.json(), json!({"message": "service not found"}));
    Ok(())
}

#[tokio::test]
async fn test_lists_are_ordered_and_paginated() -> anyhow::Result<()> {
    let t = build_app().await?;
    let token = t.register("list@example.com").await?;
    for name in ["a", "b", "c"] {
        t.json(Method::POST, "/products", Some(&token), Some(json!({"name": name, "description": "d", "price": 1})))
            .await?;
    }

    let all = t.get("/products").await?.json();
    let names: Vec<_> = all.as_array().map(|a| a.iter().map(|p| p["name"].clone()).collect()).unwrap_or_default();
    assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);

    let page = t.get("/products?page=2&per_page=2").await?.json();
    assert_eq!(page.as_array().map(Vec::len), Some(1));
    assert_eq!(page[0]["name"], "c");

    assert_eq!(t.get("/services").await?.json(), json!([]));
    assert_eq!(t.get("/products?page=x").await?.status, StatusCode::BAD_REQUEST);
    Ok(())
}
