//! End-to-end storefront flows through the full router.
//!
//! Each test stands up a mock upstream and drives the storefront over HTTP,
//! threading the session cookie between requests the way a browser would.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marigold_integration_tests::{
    cart_json, catalog_json, product_json, send, storefront_app, user_json,
};

/// Mount the catalog, a product detail, and a happily-acknowledging cart API.
async fn mount_happy_upstream(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .mount(server)
        .await;
    for id in 1..=4 {
        Mock::given(method("GET"))
            .and(path(format!("/products/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(product_json(
                    id,
                    &format!("Product {id}"),
                    10.0 * id as f64,
                    "electronics",
                )),
            )
            .mount(server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/carts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(
            7,
            1,
            json!([{ "productId": 1, "quantity": 1 }]),
        )))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/carts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(
            7,
            1,
            json!([{ "productId": 1, "quantity": 2 }]),
        )))
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/carts/7"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn add_then_re_add_merges_into_one_line() {
    let server = MockServer::start().await;
    mount_happy_upstream(&server).await;
    let app = storefront_app(&server.uri());

    let first = send(
        &app,
        "POST",
        "/cart/add",
        None,
        Some(json!({ "product_id": 1, "quantity": 2 })),
    )
    .await;
    assert_eq!(first.status, 200);
    assert_eq!(first.body["ok"], json!(true));
    assert_eq!(first.body["cart"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(first.body["cart"]["item_count"], json!(2));
    let cookie = first.cookie.expect("session cookie set");

    // Same product again: one line, summed quantity, original price kept.
    let second = send(
        &app,
        "POST",
        "/cart/add",
        Some(&cookie),
        Some(json!({ "product_id": 1 })),
    )
    .await;
    assert_eq!(second.status, 200);
    let items = second.body["cart"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], json!(3));
    assert_eq!(items[0]["unit_price_display"], json!("$10.00"));
    assert_eq!(second.body["cart"]["subtotal_display"], json!("$30.00"));
}

#[tokio::test]
async fn cart_count_reflects_summed_quantities() {
    let server = MockServer::start().await;
    mount_happy_upstream(&server).await;
    let app = storefront_app(&server.uri());

    let empty = send(&app, "GET", "/cart/count", None, None).await;
    assert_eq!(empty.body, json!({ "count": 0 }));

    let added = send(
        &app,
        "POST",
        "/cart/add",
        None,
        Some(json!({ "product_id": 2, "quantity": 4 })),
    )
    .await;
    let cookie = added.cookie.expect("session cookie set");

    let count = send(&app, "GET", "/cart/count", Some(&cookie), None).await;
    assert_eq!(count.body, json!({ "count": 4 }));
}

#[tokio::test]
async fn removing_an_absent_line_is_a_no_op_without_upstream_calls() {
    let server = MockServer::start().await;
    let app = storefront_app(&server.uri());

    let response = send(
        &app,
        "POST",
        "/cart/remove",
        None,
        Some(json!({ "product_id": 99 })),
    )
    .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["ok"], json!(true));
    assert!(response.body["cart"]["items"].as_array().unwrap().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn setting_quantity_to_zero_removes_the_line() {
    let server = MockServer::start().await;
    mount_happy_upstream(&server).await;
    let app = storefront_app(&server.uri());

    let added = send(
        &app,
        "POST",
        "/cart/add",
        None,
        Some(json!({ "product_id": 1, "quantity": 2 })),
    )
    .await;
    let cookie = added.cookie.expect("session cookie set");

    let updated = send(
        &app,
        "POST",
        "/cart/update",
        Some(&cookie),
        Some(json!({ "product_id": 1, "quantity": 0 })),
    )
    .await;
    assert_eq!(updated.body["ok"], json!(true));
    assert!(updated.body["cart"]["items"].as_array().unwrap().is_empty());
    assert_eq!(updated.body["cart"]["subtotal_display"], json!("$0.00"));

    // The empty cart deleted the upstream record.
    let deletes: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .collect();
    assert_eq!(deletes.len(), 1);
}

#[tokio::test]
async fn failed_mutation_keeps_last_good_cart_and_queues_one_notification() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_json(1, "Backpack", 109.95, "men's clothing")),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/carts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = storefront_app(&server.uri());

    let response = send(
        &app,
        "POST",
        "/cart/add",
        None,
        Some(json!({ "product_id": 1 })),
    )
    .await;

    // 200 with ok:false - the shopper keeps their last-good (empty) cart.
    assert_eq!(response.status, 200);
    assert_eq!(response.body["ok"], json!(false));
    assert!(response.body["cart"]["items"].as_array().unwrap().is_empty());

    let notifications = send(&app, "GET", "/notifications", None, None).await;
    let drained = notifications.body.as_array().unwrap();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0]["level"], json!("error"));

    // Drained means gone.
    let again = send(&app, "GET", "/notifications", None, None).await;
    assert!(again.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn successful_mutation_queues_a_success_notification() {
    let server = MockServer::start().await;
    mount_happy_upstream(&server).await;
    let app = storefront_app(&server.uri());

    send(
        &app,
        "POST",
        "/cart/add",
        None,
        Some(json!({ "product_id": 1 })),
    )
    .await;

    let notifications = send(&app, "GET", "/notifications", None, None).await;
    let drained = notifications.body.as_array().unwrap();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0]["level"], json!("success"));
    assert_eq!(drained[0]["message"], json!("Added Product 1 to your cart."));
}

#[tokio::test]
async fn clearing_the_cart_empties_it() {
    let server = MockServer::start().await;
    mount_happy_upstream(&server).await;
    let app = storefront_app(&server.uri());

    let added = send(
        &app,
        "POST",
        "/cart/add",
        None,
        Some(json!({ "product_id": 1, "quantity": 2 })),
    )
    .await;
    let cookie = added.cookie.expect("session cookie set");

    let cleared = send(&app, "POST", "/cart/clear", Some(&cookie), None).await;
    assert_eq!(cleared.body["ok"], json!(true));
    assert!(cleared.body["cart"]["items"].as_array().unwrap().is_empty());

    let cart = send(&app, "GET", "/cart", Some(&cookie), None).await;
    assert_eq!(cart.body["item_count"], json!(0));
}

#[tokio::test]
async fn product_listing_filters_and_paginates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .mount(&server)
        .await;
    let app = storefront_app(&server.uri());

    let all = send(&app, "GET", "/products", None, None).await;
    assert_eq!(all.status, 200);
    assert_eq!(all.body["total_items"], json!(4));
    assert_eq!(all.body["page"], json!(1));

    let searched = send(&app, "GET", "/products?search=backpack", None, None).await;
    assert_eq!(searched.body["total_items"], json!(1));
    assert_eq!(
        searched.body["products"][0]["title"],
        json!("Fjallraven Backpack")
    );

    let filtered = send(
        &app,
        "GET",
        "/products?category=jewelery,electronics",
        None,
        None,
    )
    .await;
    assert_eq!(filtered.body["total_items"], json!(2));

    let paged = send(&app, "GET", "/products?per_page=3&page=2", None, None).await;
    assert_eq!(paged.body["page"], json!(2));
    assert_eq!(paged.body["products"].as_array().unwrap().len(), 1);
    assert_eq!(paged.body["has_more_pages"], json!(false));

    // Out-of-range pages clamp to the last page instead of going empty.
    let clamped = send(&app, "GET", "/products?per_page=3&page=9", None, None).await;
    assert_eq!(clamped.body["page"], json!(2));
}

#[tokio::test]
async fn invalid_product_id_is_rejected_before_any_upstream_call() {
    let server = MockServer::start().await;
    let app = storefront_app(&server.uri());

    let response = send(&app, "GET", "/products/0", None, None).await;
    assert_eq!(response.status, 400);
    assert!(response.body["error"].is_string());

    assert!(server.received_requests().await.unwrap().is_empty());

    // And no notification was queued for the client mistake.
    let notifications = send(&app, "GET", "/notifications", None, None).await;
    assert!(notifications.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_product_is_a_404_with_a_friendly_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = storefront_app(&server.uri());

    let response = send(&app, "GET", "/products/999", None, None).await;
    assert_eq!(response.status, 404);
    assert_eq!(
        response.body["error"],
        json!("We couldn't find that product.")
    );
}

#[tokio::test]
async fn upstream_outage_surfaces_as_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = storefront_app(&server.uri());

    let response = send(&app, "GET", "/products", None, None).await;
    assert_eq!(response.status, 502);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn user_detail_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(3)))
        .mount(&server)
        .await;
    let app = storefront_app(&server.uri());

    let response = send(&app, "GET", "/users/3", None, None).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["username"], json!("jo"));
    // The upstream password never reaches the client.
    assert!(response.body.get("password").is_none());
}

#[tokio::test]
async fn home_serves_the_first_catalog_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .mount(&server)
        .await;
    let app = storefront_app(&server.uri());

    let response = send(&app, "GET", "/", None, None).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["page"], json!(1));
    assert_eq!(response.body["total_items"], json!(4));
}

#[tokio::test]
async fn checkout_is_explicitly_not_implemented() {
    let server = MockServer::start().await;
    let app = storefront_app(&server.uri());

    let response = send(&app, "GET", "/checkout", None, None).await;
    assert_eq!(response.status, 501);
    assert_eq!(response.body["status"], json!("not_implemented"));
}
