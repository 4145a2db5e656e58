use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use campus_market_api::{
    contract::{self, Operation},
    routes::create_app,
    state::AppState,
    store::MockStore,
};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    body: Value,
}

fn app() -> Router {
    create_app(AppState::new(
        MockStore::seeded(Duration::ZERO),
        "test-secret",
    ))
}

/// Sends one request for `op` and checks the reply against the registry.
async fn call(
    app: &Router,
    op: &Operation,
    uri: &str,
    body: Option<Value>,
    session: Option<&str>,
) -> Reply {
    let mut request = Request::builder().method(op.method.to_http()).uri(uri);
    if let Some(session) = session {
        request = request.header(header::COOKIE, session);
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    if let Err(err) = op.check_response(status.as_u16(), &body) {
        panic!("{op} returned {status} {body}: {err}");
    }
    Reply {
        status,
        cookie,
        body,
    }
}

async fn get(app: &Router, op: &Operation, uri: &str, session: Option<&str>) -> Reply {
    call(app, op, uri, None, session).await
}

async fn post(
    app: &Router,
    op: &Operation,
    uri: &str,
    body: Value,
    session: Option<&str>,
) -> Reply {
    call(app, op, uri, Some(body), session).await
}

async fn sign_up(app: &Router, username: &str) -> (i32, String) {
    let reply = post(
        app,
        &contract::auth::SIGNUP,
        contract::auth::SIGNUP.path,
        json!({
            "username": username,
            "email": format!("{username}@campus.edu"),
            "password": "secret1",
            "name": "Test Student"
        }),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let id = reply.body["id"].as_i64().expect("id") as i32;
    (id, reply.cookie.expect("session cookie"))
}

async fn google_sign_in(app: &Router, id_token: &str) -> Reply {
    post(
        app,
        &contract::auth::GOOGLE,
        "/api/auth/google",
        json!({ "idToken": id_token }),
        None,
    )
    .await
}

fn hs256_token(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"issuer-key"),
    )
    .expect("token")
}

#[tokio::test]
async fn browse_catalog_and_missing_listing() {
    let app = app();

    let all = get(&app, &contract::products::LIST, "/api/products", None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body.as_array().map(Vec::len), Some(6));

    let filtered = get(
        &app,
        &contract::products::LIST,
        "/api/products?category=electronics",
        None,
    )
    .await;
    let filtered = filtered.body.as_array().expect("array").clone();
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|p| p["category"] == "Electronics"));

    let url = contract::products::GET.url(&[("id", 1)]).expect("url");
    let one = get(&app, &contract::products::GET, &url, None).await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body["id"], 1);

    let url = contract::products::GET.url(&[("id", 999)]).expect("url");
    let missing = get(&app, &contract::products::GET, &url, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Product not found");

    let bad_id = get(&app, &contract::products::GET, "/api/products/abc", None).await;
    assert_eq!(bad_id.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn signup_login_me_and_logout() {
    let app = app();
    let (id, session) = sign_up(&app, "jlee").await;

    let me = get(&app, &contract::auth::ME, "/api/auth/me", Some(&session)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], id);
    assert_eq!(me.body["campus"], "Main Campus");
    assert_eq!(me.body["role"], "student");
    assert!(me.body.get("password").is_none());

    let login = post(
        &app,
        &contract::auth::LOGIN,
        "/api/auth/login",
        json!({ "email": "jlee@campus.edu", "password": "secret1" }),
        None,
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["username"], "jlee");
    assert!(login.cookie.is_some());

    let logout = call(
        &app,
        &contract::auth::LOGOUT,
        "/api/auth/logout",
        None,
        Some(&session),
    )
    .await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);
    assert_eq!(logout.body, Value::Null);
    assert_eq!(logout.cookie.as_deref(), Some("session="));
}

#[tokio::test]
async fn auth_failures_use_error_bodies() {
    let app = app();
    sign_up(&app, "kim").await;

    let duplicate = post(
        &app,
        &contract::auth::SIGNUP,
        "/api/auth/signup",
        json!({
            "username": "kim",
            "email": "other@campus.edu",
            "password": "secret1",
            "name": "Kim"
        }),
        None,
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["field"], "username");

    let short_password = post(
        &app,
        &contract::auth::SIGNUP,
        "/api/auth/signup",
        json!({
            "username": "lee",
            "email": "lee@campus.edu",
            "password": "123",
            "name": "Lee"
        }),
        None,
    )
    .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(short_password.body["field"], "password");

    let wrong_password = post(
        &app,
        &contract::auth::LOGIN,
        "/api/auth/login",
        json!({ "email": "kim@campus.edu", "password": "wrong-one" }),
        None,
    )
    .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);

    let anonymous = get(&app, &contract::auth::ME, "/api/auth/me", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forged = get(
        &app,
        &contract::orders::LIST,
        "/api/orders",
        Some("session=not.a.token"),
    )
    .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn favorites_toggle_back_and_forth() {
    let app = app();
    let (_, session) = sign_up(&app, "ana").await;
    let session = Some(session.as_str());
    let toggle = |product_id: i32| json!({ "productId": product_id });
    let (list_op, toggle_op) = (&contract::favorites::LIST, &contract::favorites::TOGGLE);
    let url = toggle_op.path;

    let added = post(&app, toggle_op, url, toggle(2), session).await;
    assert_eq!(added.body["status"], "added");

    let list = get(&app, list_op, url, session).await;
    assert_eq!(list.body.as_array().map(Vec::len), Some(1));
    assert_eq!(list.body[0]["productId"], 2);

    let removed = post(&app, toggle_op, url, toggle(2), session).await;
    assert_eq!(removed.body["status"], "removed");

    let list = get(&app, list_op, url, session).await;
    assert_eq!(list.body, json!([]));

    let unknown = post(&app, toggle_op, url, toggle(404), session).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let anonymous = post(&app, toggle_op, url, toggle(2), None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reviews_are_validated_and_listed_per_product() {
    let app = app();
    let (user_id, session) = sign_up(&app, "ben").await;
    let session = Some(session.as_str());
    let url = contract::reviews::CREATE.url(&[("id", 3)]).expect("url");

    let create_op = &contract::reviews::CREATE;

    let too_high = post(&app, create_op, &url, json!({ "rating": 6 }), session).await;
    assert_eq!(too_high.status, StatusCode::BAD_REQUEST);
    assert_eq!(too_high.body["field"], "rating");

    let created = post(
        &app,
        create_op,
        &url,
        json!({ "rating": 4, "comment": "Bright enough for late nights." }),
        session,
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["userId"], user_id);
    assert_eq!(created.body["productId"], 3);

    let listed = get(&app, &contract::reviews::LIST_FOR_PRODUCT, &url, None).await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));

    let other = contract::reviews::LIST_FOR_PRODUCT.url(&[("id", 1)]).expect("url");
    let empty = get(&app, &contract::reviews::LIST_FOR_PRODUCT, &other, None).await;
    assert_eq!(empty.body, json!([]));

    let missing = contract::reviews::LIST_FOR_PRODUCT.url(&[("id", 77)]).expect("url");
    let missing = get(&app, &contract::reviews::LIST_FOR_PRODUCT, &missing, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn orders_belong_to_the_signed_in_user() {
    let app = app();
    let (user_id, session) = sign_up(&app, "cara").await;
    let session = Some(session.as_str());
    let (list_op, create_op) = (&contract::orders::LIST, &contract::orders::CREATE);
    let orders = create_op.path;
    let order = |user: i32, total: &str| {
        json!({ "userId": user, "total": total, "items": [{ "productId": 1, "quantity": 1 }] })
    };

    let first = post(&app, create_op, orders, order(user_id, "45.00"), session).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["status"], "Processing");

    let second = post(&app, create_op, orders, order(user_id, "12.50"), session).await;
    assert_eq!(second.status, StatusCode::CREATED);

    let someone_else = post(&app, create_op, orders, order(user_id + 1, "1.00"), session).await;
    assert_eq!(someone_else.status, StatusCode::BAD_REQUEST);
    assert_eq!(someone_else.body["field"], "userId");

    let bad_total = post(&app, create_op, orders, order(user_id, "lots"), session).await;
    assert_eq!(bad_total.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_total.body["field"], "total");

    let listed = get(&app, list_op, orders, session).await;
    let ids: Vec<&Value> = listed
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|o| &o["id"])
        .collect();
    assert_eq!(ids, vec![&second.body["id"], &first.body["id"]]);
}

#[tokio::test]
async fn google_sign_in_creates_then_reuses_account() {
    let app = app();
    let id_token = hs256_token(json!({
        "email": "dana@campus.edu",
        "name": "Dana Park",
        "picture": "https://example.org/d.png"
    }));

    let first = google_sign_in(&app, &id_token).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["user"]["username"], "dana");
    assert_eq!(first.body["user"]["avatar"], "https://example.org/d.png");
    let session = first.cookie.expect("session cookie");

    let again = google_sign_in(&app, &id_token).await;
    assert_eq!(again.body["user"]["id"], first.body["user"]["id"]);

    let me = get(&app, &contract::auth::ME, "/api/auth/me", Some(&session)).await;
    assert_eq!(me.body["email"], "dana@campus.edu");

    let password_login = post(
        &app,
        &contract::auth::LOGIN,
        "/api/auth/login",
        json!({ "email": "dana@campus.edu", "password": "anything" }),
        None,
    )
    .await;
    assert_eq!(password_login.status, StatusCode::UNAUTHORIZED);

    let garbage = google_sign_in(&app, "nope").await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn google_sign_in_reads_rs256_tokens_without_keys() {
    let app = app();
    let segment = |value: Value| URL_SAFE_NO_PAD.encode(value.to_string());
    let id_token = format!(
        "{}.{}.{}",
        segment(json!({ "alg": "RS256", "kid": "abc", "typ": "JWT" })),
        segment(json!({ "email": "dana@gmail.com", "name": "Dana" })),
        URL_SAFE_NO_PAD.encode([0x5a_u8; 256]),
    );

    let reply = google_sign_in(&app, &id_token).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["email"], "dana@gmail.com");
    assert_eq!(reply.body["user"]["name"], "Dana");
}

#[tokio::test]
async fn google_sign_in_suffixes_a_taken_username() {
    let app = app();

    let token = hs256_token(json!({ "email": "mchen@gmail.com" }));
    let first = google_sign_in(&app, &token).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["user"]["username"], "mchen1");

    let token = hs256_token(json!({ "email": "mchen@proton.me" }));
    let second = google_sign_in(&app, &token).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["user"]["username"], "mchen2");
}
