//! Router-level tests driving [`api_router`] with `oneshot`.

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{AppState, api_router};

async fn send(state: AppState, req: Request<Body>) -> Response {
  api_router(state).oneshot(req).await.unwrap()
}

async fn body_json(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
  Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method(method)
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

fn form_req(uri: &str, body: &str) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
    .body(Body::from(body.to_owned()))
    .unwrap()
}

fn locs(body: &Value) -> Vec<String> {
  body["detail"]
    .as_array()
    .unwrap()
    .iter()
    .map(|v| {
      v["loc"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect::<Vec<_>>()
        .join(".")
    })
    .collect()
}

// ─── Home ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn home_greets() {
  let resp = send(AppState::default(), get("/")).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await, json!({ "Hello": "world" }));
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_without_password() {
  let body = json!({
    "first_name": "Eva",
    "last_name": "Parra",
    "age": 18,
    "password": "12345678"
  });
  let resp = send(AppState::default(), json_req("POST", "/person/new", body)).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(
    body_json(resp).await,
    json!({
      "first_name": "Eva",
      "last_name": "Parra",
      "age": 18,
      "hair_color": null,
      "is_married": null
    })
  );
}

#[tokio::test]
async fn create_rejects_out_of_range_age() {
  for age in [17, 116] {
    let body = json!({
      "first_name": "Eva",
      "last_name": "Parra",
      "age": age,
      "password": "12345678"
    });
    let resp = send(AppState::default(), json_req("POST", "/person/new", body)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "age {age}");
    let body = body_json(resp).await;
    assert_eq!(locs(&body), vec!["body.age"]);
    assert_eq!(body["detail"][0]["type"], "range");
  }
}

#[tokio::test]
async fn create_rejects_unknown_hair_color() {
  let body = json!({
    "first_name": "Eva",
    "last_name": "Parra",
    "age": 30,
    "hair_color": "green",
    "password": "12345678"
  });
  let resp = send(AppState::default(), json_req("POST", "/person/new", body)).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let body = body_json(resp).await;
  assert_eq!(body["detail"][0]["type"], "decode");
}

#[tokio::test]
async fn create_without_json_content_type_keeps_axum_status() {
  let req = Request::builder()
    .method("POST")
    .uri("/person/new")
    .body(Body::from("{}"))
    .unwrap();
  let resp = send(AppState::default(), req).await;
  assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
  assert!(body_json(resp).await["detail"].is_string());
}

// ─── Show by query ────────────────────────────────────────────────────────────

#[tokio::test]
async fn query_echoes_name_and_age() {
  let resp = send(AppState::default(), get("/person/detail?name=Eva&age=30")).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await, json!({ "Eva": 30 }));

  let resp = send(AppState::default(), get("/person/detail?age=30")).await;
  assert_eq!(body_json(resp).await, json!({ "null": 30 }));
}

#[tokio::test]
async fn query_requires_age_and_bounded_name() {
  let resp = send(AppState::default(), get("/person/detail?name=Eva")).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let body = body_json(resp).await;
  assert_eq!(locs(&body), vec!["query.age"]);
  assert_eq!(body["detail"][0]["type"], "missing");

  let long = "x".repeat(51);
  let resp = send(
    AppState::default(),
    get(&format!("/person/detail?name={long}&age=30")),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(locs(&body_json(resp).await), vec!["query.name"]);
}

#[tokio::test]
async fn query_rejects_empty_name() {
  let resp = send(AppState::default(), get("/person/detail?name=&age=30")).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let body = body_json(resp).await;
  assert_eq!(locs(&body), vec!["query.name"]);
  assert_eq!(body["detail"][0]["type"], "length");
}

// ─── Show by path ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn known_ids_exist() {
  for id in 1..=5 {
    let resp = send(AppState::default(), get(&format!("/person/detail/{id}&30"))).await;
    assert_eq!(resp.status(), StatusCode::OK, "id {id}");
    let mut expected = serde_json::Map::new();
    expected.insert(id.to_string(), json!("It exists"));
    expected.insert("30".to_owned(), json!("years old"));
    assert_eq!(body_json(resp).await, Value::Object(expected));
  }
}

#[tokio::test]
async fn unknown_id_is_404() {
  let resp = send(AppState::default(), get("/person/detail/6&30")).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(
    body_json(resp).await,
    json!({ "detail": "This person doesn't exist" })
  );
}

#[tokio::test]
async fn configured_ids_replace_defaults() {
  let state = AppState::new([42].into_iter().collect(), crate::DEFAULT_UPLOAD_LIMIT);
  let resp = send(state.clone(), get("/person/detail/42&30")).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let resp = send(state, get("/person/detail/1&30")).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn path_rules_run_before_lookup() {
  let resp = send(AppState::default(), get("/person/detail/9&17")).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(locs(&body_json(resp).await), vec!["path.age"]);
}

#[tokio::test]
async fn undecodable_detail_segment_is_json_422() {
  let resp = send(AppState::default(), get("/person/detail/%FF&30")).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
  assert!(ct.contains("application/json"), "Content-Type: {ct}");
  let body = body_json(resp).await;
  assert_eq!(locs(&body), vec!["path"]);
  assert_eq!(body["detail"][0]["type"], "decode");
}

// ─── Update ───────────────────────────────────────────────────────────────────

fn update_body() -> Value {
  json!({
    "person": {
      "first_name": "Eva",
      "last_name": "Parra Buitrago",
      "age": 18,
      "hair_color": "black",
      "is_married": false,
      "password": "12345678"
    },
    "location": { "city": "Pereira", "state": "Risaralda", "country": "Colombia" },
    "contact": {
      "personalemail": "evaparrabuitrago@gmail.com",
      "cellphone": "3174341284"
    }
  })
}

#[tokio::test]
async fn update_merges_all_parts() {
  let resp = send(AppState::default(), json_req("PUT", "/person/3", update_body())).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body = body_json(resp).await;
  assert_eq!(body["first_name"], "Eva");
  assert_eq!(body["is_married"], false);
  assert_eq!(body["country"], "Colombia");
  assert_eq!(body["cellphone"], "3174341284");
  assert_eq!(body.as_object().unwrap().len(), 11);
}

#[tokio::test]
async fn update_rejects_non_positive_id() {
  let resp = send(AppState::default(), json_req("PUT", "/person/0", update_body())).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(locs(&body_json(resp).await), vec!["path.person_id"]);

  let resp = send(AppState::default(), json_req("PUT", "/person/abc", update_body())).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_reports_nested_locations() {
  let mut body = update_body();
  body["contact"]["cellphone"] = json!("123");
  let resp = send(AppState::default(), json_req("PUT", "/person/1", body)).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(locs(&body_json(resp).await), vec!["body.contact.cellphone"]);
}

// ─── Forms ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_echoes_username_only() {
  let resp = send(
    AppState::default(),
    form_req("/login", "username=eva&password=secret123"),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    body_json(resp).await,
    json!({ "username": "eva", "message": "Login Successful" })
  );
}

#[tokio::test]
async fn login_requires_both_fields() {
  let resp = send(AppState::default(), form_req("/login", "username=eva")).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_rejects_long_username() {
  let body = format!("username={}&password=secret123", "u".repeat(21));
  let resp = send(AppState::default(), form_req("/login", &body)).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let body = body_json(resp).await;
  assert_eq!(locs(&body), vec!["form.username"]);
  assert_eq!(body["detail"][0]["type"], "length");

  let body = format!("username={}&password=secret123", "u".repeat(20));
  let resp = send(AppState::default(), form_req("/login", &body)).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

const CONTACT_FORM: &str = "first_name=Eva&last_name=Parra\
  &email=eva%40example.com&message=I+would+like+to+hear+more+about+this";

#[tokio::test]
async fn contact_returns_user_agent() {
  let req = Request::builder()
    .method("POST")
    .uri("/contact")
    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
    .header(header::USER_AGENT, "roster-test/1.0")
    .header(header::COOKIE, "ads=yes")
    .body(Body::from(CONTACT_FORM))
    .unwrap();
  let resp = send(AppState::default(), req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await, json!("roster-test/1.0"));
}

#[tokio::test]
async fn contact_without_user_agent_is_null() {
  let resp = send(AppState::default(), form_req("/contact", CONTACT_FORM)).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await, Value::Null);
}

#[tokio::test]
async fn contact_validates_message_length() {
  let body = "first_name=Eva&last_name=Parra&email=eva%40example.com&message=short";
  let resp = send(AppState::default(), form_req("/contact", body)).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(locs(&body_json(resp).await), vec!["form.message"]);
}

#[tokio::test]
async fn contact_validates_name_length() {
  let message = "I+would+like+to+hear+more+about+this";
  let long = "x".repeat(21);
  let body = format!(
    "first_name={long}&last_name=Parra&email=eva%40example.com&message={message}"
  );
  let resp = send(AppState::default(), form_req("/contact", &body)).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let body = body_json(resp).await;
  assert_eq!(locs(&body), vec!["form.first_name"]);
  assert_eq!(body["detail"][0]["type"], "length");

  let body = format!(
    "first_name=Eva&last_name=&email=eva%40example.com&message={message}"
  );
  let resp = send(AppState::default(), form_req("/contact", &body)).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(locs(&body_json(resp).await), vec!["form.last_name"]);
}

// ─── Upload ───────────────────────────────────────────────────────────────────

const BOUNDARY: &str = "roster-boundary";

fn multipart_req(field: &str, data: &[u8]) -> Request<Body> {
  let mut body = format!(
    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
     filename=\"cat.png\"\r\nContent-Type: image/png\r\n\r\n"
  )
  .into_bytes();
  body.extend_from_slice(data);
  body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
  Request::builder()
    .method("POST")
    .uri("/post-image")
    .header(
      header::CONTENT_TYPE,
      format!("multipart/form-data; boundary={BOUNDARY}"),
    )
    .body(Body::from(body))
    .unwrap()
}

#[tokio::test]
async fn image_size_is_reported_in_kib() {
  let resp = send(AppState::default(), multipart_req("image", &[7u8; 2048])).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    body_json(resp).await,
    json!({ "Filename": "cat.png", "Format": "image/png", "Size(kb)": 2.0 })
  );
}

#[tokio::test]
async fn missing_image_part_is_422() {
  let resp = send(AppState::default(), multipart_req("file", &[0u8; 16])).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(locs(&body_json(resp).await), vec!["form.image"]);
}

#[tokio::test]
async fn oversized_upload_is_413() {
  let state = AppState::new(Default::default(), 1024);
  let resp = send(state, multipart_req("image", &[0u8; 4096])).await;
  assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
