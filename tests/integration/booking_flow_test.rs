// Integration tests for booking creation
//
// Covers pricing, required-field validation, catalog lookups, contact
// resolution from the session and the background invoice dispatch.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::test;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;

use helpers::*;

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal fields are strings")).unwrap()
}

#[actix_web::test]
async fn test_hourly_service_booked_by_day() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(TestDataFactory::booking_payload("baby-care", "day", 2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(decimal(&body["perUnitRate"]), Decimal::from(9600));
    assert_eq!(decimal(&body["totalCost"]), Decimal::from(19200));
    assert_eq!(body["serviceName"], "Baby Care");
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["createdAt"], body["updatedAt"]);

    let stored = ctx.bookings.get(body["id"].as_str().unwrap()).unwrap();
    assert_eq!(stored.total_cost, Decimal::from(19200));
    assert_eq!(stored.location.area, "Dhanmondi");
}

#[actix_web::test]
async fn test_daily_service_booked_by_hour() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    // overnight-care is 3000 per day
    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(TestDataFactory::booking_payload("overnight-care", "hour", 6))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let rate = decimal(&body["perUnitRate"]);
    let total = decimal(&body["totalCost"]);
    assert_eq!(rate, Decimal::from(125));
    assert_eq!(total, Decimal::from(750));
    assert_eq!(total, rate * Decimal::from(6));
}

#[actix_web::test]
async fn test_missing_fields_rejected_without_persisting() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    for field in [
        "serviceSlug",
        "durationUnit",
        "durationValue",
        "division",
        "district",
        "city",
        "address",
    ] {
        let mut payload = TestDataFactory::booking_payload("baby-care", "hour", 4);
        payload.as_object_mut().unwrap().remove(field);

        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "missing {} should be rejected", field);

        let body: Value = test::read_body_json(resp).await;
        assert_error_message(&body, 400, "Missing required fields for booking.");
    }

    assert_eq!(ctx.bookings.len(), 0);
    assert!(ctx.notifier.sent().is_empty());
}

#[actix_web::test]
async fn test_blank_field_counts_as_missing() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    let mut payload = TestDataFactory::booking_payload("baby-care", "hour", 4);
    payload["city"] = json!("   ");

    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(ctx.bookings.len(), 0);
}

#[actix_web::test]
async fn test_area_is_optional() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    let mut payload = TestDataFactory::booking_payload("baby-care", "hour", 4);
    payload.as_object_mut().unwrap().remove("area");

    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["location"]["area"], "");
}

#[actix_web::test]
async fn test_unknown_or_inactive_service_is_not_found() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    for slug in ["no-such-service", INACTIVE_SLUG] {
        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(TestDataFactory::booking_payload(slug, "hour", 4))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404, "slug {}", slug);

        let body: Value = test::read_body_json(resp).await;
        assert_error_message(&body, 404, "Service not found.");
    }

    assert_eq!(ctx.bookings.len(), 0);
}

#[actix_web::test]
async fn test_invalid_duration_unit_rejected() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(TestDataFactory::booking_payload("baby-care", "week", 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(ctx.bookings.len(), 0);
}

#[actix_web::test]
async fn test_negative_duration_rejected() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(TestDataFactory::booking_payload("baby-care", "hour", -3))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_error_message(&body, 400, "Invalid duration or pricing configuration.");
    assert_eq!(ctx.bookings.len(), 0);
}

#[actix_web::test]
async fn test_zero_duration_counts_as_missing() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    // Rejected before the service lookup, so the slug does not matter
    for slug in ["baby-care", "no-such-service"] {
        let req = test::TestRequest::post()
            .uri("/bookings")
            .set_json(TestDataFactory::booking_payload(slug, "hour", 0))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "slug {}", slug);

        let body: Value = test::read_body_json(resp).await;
        assert_error_message(&body, 400, "Missing required fields for booking.");
    }
    assert_eq!(ctx.bookings.len(), 0);
}

#[actix_web::test]
async fn test_invoice_sent_to_customer() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(TestDataFactory::booking_payload("elderly-care", "hour", 3))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let sent = ctx.notifier.wait_for(1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].booking_id, body["id"].as_str().unwrap());
    assert_eq!(sent[0].recipient, "rina@example.com");
    assert_eq!(sent[0].service_name, "Elderly Care");
}

#[actix_web::test]
async fn test_notifier_failure_does_not_fail_booking() {
    let ctx = TestContext::with_notifier(RecordingNotifier::failing());
    let app = init_app(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(TestDataFactory::booking_payload("baby-care", "hour", 4))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    assert_eq!(ctx.notifier.wait_for(1).await.len(), 1);
    assert_eq!(ctx.bookings.len(), 1);
}

#[actix_web::test]
async fn test_signed_in_booking_uses_account_contact() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;
    let (cookie, user) = register_user(&app, "Karim Uddin", "karim@example.com").await;

    let mut payload = TestDataFactory::booking_payload("sick-care", "hour", 2);
    payload.as_object_mut().unwrap().remove("customer");

    let req = test::TestRequest::post()
        .uri("/bookings")
        .cookie(cookie.clone())
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["userId"], user["id"]);
    assert_eq!(body["customer"]["name"], "Karim Uddin");
    assert_eq!(body["customer"]["email"], "karim@example.com");

    let req = test::TestRequest::get()
        .uri("/bookings")
        .cookie(cookie)
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["id"], body["id"]);
}

#[actix_web::test]
async fn test_anonymous_booking_needs_contact() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    let mut payload = TestDataFactory::booking_payload("baby-care", "hour", 4);
    payload.as_object_mut().unwrap().remove("customer");

    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(ctx.bookings.len(), 0);
}

#[actix_web::test]
async fn test_my_bookings_requires_session() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;

    let req = test::TestRequest::get().uri("/bookings").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_my_bookings_lists_only_own_newest_first() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;
    let (alice, _) = register_user(&app, "Alice", "alice@example.com").await;
    let (bob, _) = register_user(&app, "Bob", "bob@example.com").await;

    let mut alice_ids = Vec::new();
    for slug in ["baby-care", "elderly-care"] {
        let req = test::TestRequest::post()
            .uri("/bookings")
            .cookie(alice.clone())
            .set_json(TestDataFactory::booking_payload(slug, "hour", 2))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        alice_ids.push(body["id"].as_str().unwrap().to_string());
    }
    let req = test::TestRequest::post()
        .uri("/bookings")
        .cookie(bob.clone())
        .set_json(TestDataFactory::booking_payload("sick-care", "hour", 2))
        .to_request();
    let _: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/bookings")
        .cookie(alice)
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<&str> = mine
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids, vec![alice_ids[1].as_str(), alice_ids[0].as_str()]);
}
