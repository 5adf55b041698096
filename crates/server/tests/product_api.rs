mod support;

use axum::http::StatusCode;
use serde_json::{json, Value};
use support::{app, send};

fn spare_part(name: &str, brand: &str, model: &str) -> Value {
    json!({
        "name": name,
        "price": 1200,
        "productType": "spare part",
        "brand": brand,
        "partType": "brake pad",
        "bikeModel": model
    })
}

fn names(v: &Value) -> Vec<String> {
    v.as_array()
        .expect("array")
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn product_defaults_to_accessory() {
    let app = app();
    let r = send(&app, "POST", "/product/add", Some(json!({"name": "Bell", "price": 300}))).await;
    assert_eq!(r.status, StatusCode::OK);
    let p = r.json();
    assert_eq!(p["id"], 1);
    assert_eq!(p["productType"], "accessory");
    assert_eq!(p["price"], 300);

    let fetched = send(&app, "GET", "/product/1", None).await;
    assert_eq!(fetched.json(), p);
}

#[tokio::test]
async fn spare_part_requires_details() {
    let app = app();
    let r = send(
        &app,
        "POST",
        "/product/add",
        Some(json!({"name": "Pads", "price": 500, "productType": "spare part", "brand": "Shimano"})),
    )
    .await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert_eq!(r.json()["error"], "Validation Error");
}

#[tokio::test]
async fn invalid_price_and_type_are_rejected() {
    let app = app();
    let zero = send(&app, "POST", "/product", Some(json!({"name": "Bell", "price": 0}))).await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);

    let kind = send(&app, "POST", "/product", Some(json!({"name": "Bell", "price": 10, "productType": "bike"}))).await;
    assert_eq!(kind.status, StatusCode::BAD_REQUEST);

    let long = "x".repeat(1001);
    let desc = send(&app, "POST", "/product", Some(json!({"name": "Bell", "price": 10, "description": long}))).await;
    assert_eq!(desc.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bike_model_is_normalized() {
    let app = app();
    let r = send(&app, "POST", "/product/add", Some(spare_part("Pads", "Shimano", "yamaha fz  v3"))).await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.json()["bikeModel"], "YAMAHA-FZ-V3");
}

#[tokio::test]
async fn listing_filters_and_pages() {
    let app = app();
    send(&app, "POST", "/product/add", Some(json!({"name": "Bell", "price": 300, "description": "Loud chrome bell"}))).await;
    send(&app, "POST", "/product/add", Some(spare_part("Front pads", "Shimano", "fz"))).await;
    send(&app, "POST", "/product/add", Some(spare_part("Rear pads", "Brembo", "fz"))).await;

    let all = send(&app, "GET", "/product/getall", None).await;
    assert_eq!(names(&all.json()), ["Bell", "Front pads", "Rear pads"]);

    let spare = send(&app, "GET", "/products?productType=spare%20part", None).await;
    assert_eq!(names(&spare.json()), ["Front pads", "Rear pads"]);

    let brembo = send(&app, "GET", "/products?brand=Brembo&bikeModel=fz", None).await;
    assert_eq!(names(&brembo.json()), ["Rear pads"]);

    let text = send(&app, "GET", "/products?q=CHROME", None).await;
    assert_eq!(names(&text.json()), ["Bell"]);

    let page2 = send(&app, "GET", "/product/getall?page=2&perPage=2", None).await;
    assert_eq!(names(&page2.json()), ["Rear pads"]);
}

#[tokio::test]
async fn update_merges_and_revalidates() {
    let app = app();
    send(&app, "POST", "/product/add", Some(json!({"name": "Bell", "price": 300}))).await;

    let r = send(&app, "PUT", "/product/update/1", Some(json!({"price": "450"}))).await;
    assert_eq!(r.status, StatusCode::OK);
    let p = r.json();
    assert_eq!(p["id"], 1);
    assert_eq!(p["price"], 450);
    assert_eq!(p["name"], "Bell");

    // switching to a spare part without details fails validation of the merged record
    let bad = send(&app, "PUT", "/product/1", Some(json!({"productType": "spare part"}))).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let missing = send(&app, "PUT", "/product/update/42", Some(json!({"price": 1}))).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let app = app();
    send(&app, "POST", "/product/add", Some(json!({"name": "Bell", "price": 300}))).await;

    let r = send(&app, "DELETE", "/product/delete/1", None).await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.text, "Product with ID 1 has been deleted");

    assert_eq!(send(&app, "GET", "/product/1", None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", "/product/1", None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = app();
    let r = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(r.status, StatusCode::OK);
    let doc = r.json();
    assert!(doc["paths"].get("/product/getall").is_some());
    assert!(doc["paths"].get("/user/login").is_some());
}

#[tokio::test]
async fn missing_or_unparsable_fields_are_validation_errors() {
    let app = app();
    for body in [json!({"name": "Bell"}), json!({"name": "Bell", "price": "cheap"}), json!({"price": 300})] {
        let r = send(&app, "POST", "/product/add", Some(body)).await;
        assert_eq!(r.status, StatusCode::BAD_REQUEST);
        assert_eq!(r.json()["error"], "Validation Error");
    }
}

#[tokio::test]
async fn bad_path_and_query_parameters_are_validation_errors() {
    let app = app();
    let id = send(&app, "GET", "/product/abc", None).await;
    assert_eq!(id.status, StatusCode::BAD_REQUEST);
    assert_eq!(id.json()["error"], "Validation Error");

    let page = send(&app, "GET", "/products?page=first", None).await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert_eq!(page.json()["error"], "Validation Error");
}

#[tokio::test]
async fn text_search_treats_wildcards_literally() {
    let app = app();
    send(&app, "POST", "/product/add", Some(json!({"name": "Bell", "price": 300}))).await;
    send(&app, "POST", "/product/add", Some(json!({"name": "Bell 50% off", "price": 200}))).await;

    let all = send(&app, "GET", "/products?q=%25", None).await;
    assert_eq!(names(&all.json()), ["Bell 50% off"]);
    let underscore = send(&app, "GET", "/products?q=_", None).await;
    assert!(names(&underscore.json()).is_empty());
}
