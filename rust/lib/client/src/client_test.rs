//! Client tests against an in-process backend.
//!
//! Starts a small axum server that speaks the backend's envelope, then
//! exercises the client through real HTTP requests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use stockdesk_core::{Customer, Party, Payment, PaymentMode, Role, Vendor};

use crate::{ApiClient, ApiError, NoAuth, RetryPolicy, SharedToken, StaticToken};

const TOKEN: &str = "tok-1";

#[derive(Default)]
struct Backend {
    customers: Mutex<Vec<Value>>,
    next_id: AtomicU32,
    unit_calls: AtomicU32,
}

type Shared = Arc<Backend>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        == Some(TOKEN)
}

fn unauthenticated() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthenticated"}))).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "owner@acme.in" && body["password"] == "secret" {
        Json(json!({
            "status": "success",
            "message": "Welcome back",
            "data": {
                "token": TOKEN,
                "user": {"id": 1, "name": "Owner", "email": "owner@acme.in", "rid": 1},
                "company": {"id": 7, "name": "Acme Traders", "currency": "INR"}
            }
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"}))).into_response()
    }
}

async fn list_customers(State(b): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthenticated();
    }
    let rows = b.customers.lock().unwrap().clone();
    Json(json!({"status": true, "data": rows})).into_response()
}

async fn create_customer(State(b): State<Shared>, headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthenticated();
    }
    let id = b.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    body["id"] = json!(id);
    b.customers.lock().unwrap().push(body.clone());
    Json(json!({"status": "success", "message": "Customer added", "data": body})).into_response()
}

fn find(b: &Backend, id: &str) -> Option<usize> {
    b.customers
        .lock()
        .unwrap()
        .iter()
        .position(|c| c["id"].to_string() == id)
}

async fn get_customer(State(b): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthenticated();
    }
    match find(&b, &id) {
        Some(i) => Json(json!({"status": true, "data": b.customers.lock().unwrap()[i]})).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Customer not found"}))).into_response(),
    }
}

async fn update_customer(
    State(b): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthenticated();
    }
    let Some(i) = find(&b, &id) else {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Customer not found"}))).into_response();
    };
    body["id"] = json!(id.parse::<u32>().unwrap());
    b.customers.lock().unwrap()[i] = body;
    Json(json!({"status": "success", "message": "Customer updated"})).into_response()
}

async fn delete_customer(State(b): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthenticated();
    }
    match find(&b, &id) {
        Some(i) => {
            b.customers.lock().unwrap().remove(i);
            Json(json!({"status": true, "message": "Customer deleted"})).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Customer not found"}))).into_response(),
    }
}

async fn create_vendor() -> Response {
    Json(json!({"status": false, "message": "GST number is invalid"})).into_response()
}

/// Rate-limits the first two calls, then answers with a bare array.
async fn units(State(b): State<Shared>) -> Response {
    if b.unit_calls.fetch_add(1, Ordering::SeqCst) < 2 {
        return (StatusCode::TOO_MANY_REQUESTS, [(header::RETRY_AFTER, "0")], "slow down").into_response();
    }
    Json(json!([{"id": 1, "name": "Piece", "short_name": "pcs"}])).into_response()
}

async fn categories() -> Response {
    (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response()
}

async fn product_info(Path(id): Path<String>) -> Response {
    let _ = id;
    Json(json!({"data": {"purchase_price": "100", "profit_percentage": 10, "gst": 18,
        "purchase_stock": 40, "sales_stock": 15}}))
    .into_response()
}

async fn block_user(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    Json(json!({"status": true, "message": "User updated",
        "data": {"id": id, "name": "Clerk", "rid": 4, "blocked": body["blocked"]}}))
    .into_response()
}

async fn role_user(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    Json(json!({"status": true, "data": {"id": id, "name": "Clerk", "rid": body["rid"]}})).into_response()
}

async fn pay_due(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    Json(json!({"status": "success", "message": "Payment recorded",
        "data": {"id": id, "payable_amount": 500, "paid_amount": body["amount"],
                 "payment_mode": body["payment_mode"]}}))
    .into_response()
}

async fn password(Json(body): Json<Value>) -> Response {
    if body["current_password"] == "secret" {
        Json(json!({"status": true, "message": "Password changed"})).into_response()
    } else {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"error": "Current password is wrong"}))).into_response()
    }
}

async fn start_backend() -> String {
    let backend: Shared = Arc::new(Backend::default());
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/{id}", get(get_customer).put(update_customer).delete(delete_customer))
        .route("/vendors", post(create_vendor))
        .route("/units", get(units))
        .route("/categories", get(categories))
        .route("/products/{id}/info", get(product_info))
        .route("/users/{id}/block", put(block_user))
        .route("/users/{id}/role", put(role_user))
        .route("/dues/{id}/payments", post(pay_due))
        .route("/profile/password", put(password))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

async fn authed_client() -> ApiClient {
    let base = start_backend().await;
    ApiClient::new(base, Arc::new(StaticToken::new(TOKEN))).with_retry(fast_retry())
}

fn customer(name: &str) -> Customer {
    Customer(Party { name: name.into(), phone: "98450 12345".into(), ..Default::default() })
}

#[tokio::test]
async fn login_returns_token_user_and_company() {
    let base = start_backend().await;
    let token = SharedToken::default();
    let api = ApiClient::new(base, Arc::new(token.clone()));

    let reply = api.login("owner@acme.in", "secret").await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Welcome back"));
    assert_eq!(reply.data.token, TOKEN);
    assert_eq!(reply.data.user.as_ref().unwrap().rid, Role::SuperAdmin);
    assert_eq!(reply.data.company.as_ref().unwrap().currency, "INR");

    token.set(reply.data.token);
    assert!(api.resource::<Customer>().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn login_bad_credentials() {
    let base = start_backend().await;
    let api = ApiClient::new(base, Arc::new(NoAuth));
    match api.login("owner@acme.in", "wrong").await.unwrap_err() {
        ApiError::Auth(msg) => assert_eq!(msg, "Invalid credentials"),
        other => panic!("expected Auth error, got: {:?}", other),
    }
}

#[tokio::test]
async fn customer_crud_lifecycle() {
    let api = authed_client().await;
    let customers = api.resource::<Customer>();

    // Create: no id yet, so save posts.
    let reply = customers.save(&customer("Ravi Traders")).await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Customer added"));
    let created = reply.data.unwrap();
    assert_eq!(created.id, "1", "numeric ids are read as strings");

    // Get.
    let fetched = customers.get("1").await.unwrap();
    assert_eq!(fetched.name, "Ravi Traders");

    // Update: server replies without data.
    let mut edited = fetched.clone();
    edited.address = "MG Road, Bengaluru".into();
    let reply = customers.save(&edited).await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Customer updated"));
    assert!(reply.data.is_none());

    let list = customers.list().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].address, "MG Road, Bengaluru");

    // Delete.
    let reply = customers.delete("1").await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Customer deleted"));
    assert!(customers.list().await.unwrap().is_empty());

    // Missing record.
    match customers.get("1").await.unwrap_err() {
        ApiError::Server { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Customer not found");
        }
        other => panic!("expected 404, got: {:?}", other),
    }
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let base = start_backend().await;
    let api = ApiClient::new(base, Arc::new(NoAuth));
    let err = api.resource::<Customer>().list().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Unauthenticated");
}

#[tokio::test]
async fn failing_envelope_is_rejected() {
    let api = authed_client().await;
    let vendor = Vendor(Party { name: "Shree Supplies".into(), gst_no: "BAD".into(), ..Default::default() });
    match api.resource::<Vendor>().create(&vendor).await.unwrap_err() {
        ApiError::Rejected(msg) => assert_eq!(msg, "GST number is invalid"),
        other => panic!("expected Rejected, got: {:?}", other),
    }
}

#[tokio::test]
async fn rate_limit_is_retried() {
    let api = authed_client().await;
    let units = api.units().await.unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].short_name, "pcs");
}

#[tokio::test]
async fn rate_limit_gives_up_after_budget() {
    let api = authed_client().await;
    match api.categories().await.unwrap_err() {
        ApiError::RateLimited { attempts } => assert_eq!(attempts, 4),
        other => panic!("expected RateLimited, got: {:?}", other),
    }
}

#[tokio::test]
async fn rate_limit_without_retries() {
    let base = start_backend().await;
    let api = ApiClient::new(base, Arc::new(NoAuth)).with_retry(RetryPolicy::none());
    match api.units().await.unwrap_err() {
        ApiError::RateLimited { attempts } => assert_eq!(attempts, 1),
        other => panic!("expected RateLimited, got: {:?}", other),
    }
}

#[tokio::test]
async fn product_info_fills_derived_costs() {
    let api = authed_client().await;
    let info = api.product_info("42").await.unwrap();
    assert_eq!(info.product_id, "42");
    assert_eq!(info.purchase_price, 100.0);
    assert_eq!(info.pre_gst_sale_cost, 110.0);
    assert_eq!(info.post_gst_sale_cost, 129.8);
    assert_eq!(info.current_stock, 25.0);
}

#[tokio::test]
async fn user_block_and_role() {
    let api = authed_client().await;
    let reply = api.set_user_blocked("9", true).await.unwrap();
    let user = reply.data.unwrap();
    assert!(user.blocked);
    assert_eq!(user.id, "9");

    let user = api.set_user_role("9", Role::Manager).await.unwrap().data.unwrap();
    assert_eq!(user.rid, Role::Manager);
}

#[tokio::test]
async fn record_payment_against_due() {
    let api = authed_client().await;
    let payment = Payment { amount: 200.0, payment_mode: PaymentMode::Upi, ..Default::default() };
    let reply = api.record_payment("3", &payment).await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Payment recorded"));
    let due = reply.data.unwrap();
    assert_eq!(due.paid_amount, 200.0);
    assert_eq!(due.outstanding(), 300.0);
}

#[tokio::test]
async fn change_password_reports_server_error() {
    let api = authed_client().await;
    let reply = api.change_password("secret", "n3w-secret").await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Password changed"));

    let err = api.change_password("nope", "n3w-secret").await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.user_message(), "Current password is wrong");
}
