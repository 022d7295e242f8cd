//! Integration tests serving handlers through the tower service.

use std::sync::{Arc, Mutex};

use assert2::{check, let_assert};
use bytes::Bytes;
use http_body_util::Full;
use insta::assert_snapshot;
use responder::middleware::{LoggingLayer, ServiceBuilder};
use responder::{
    Encoder, Error, Exchange, JSON_CONTENT_TYPE, Options, Payload, ResponderLayer, Result, Sink,
    StatusCode, handler_fn, header, service,
};
use serde::Serialize;
use serde_json::{Value, json};
use tower::ServiceExt;

fn get(uri: &str) -> http::Request<Full<Bytes>> {
    http::Request::builder()
        .uri(uri)
        .body(Full::new(Bytes::new()))
        .expect("request")
}

fn content_type(response: &http::Response<Bytes>) -> Option<&str> {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

fn json_body(response: &http::Response<Bytes>) -> Value {
    serde_json::from_slice(response.body()).expect("json body")
}

/// Test that a handler response reaches the wire through the service.
#[tokio::test]
async fn test_with_through_service() {
    #[derive(Serialize)]
    struct User {
        id: u64,
        name: String,
    }

    let service = service(
        &Options::default(),
        handler_fn(|exchange| {
            let user = User {
                id: 42,
                name: "Alice".to_string(),
            };
            exchange.with(StatusCode::OK, Payload::data(user));
        }),
    );

    let response = service.oneshot(get("/users/42")).await.expect("response");

    check!(response.status() == StatusCode::OK);
    check!(content_type(&response) == Some(JSON_CONTENT_TYPE));
    assert_snapshot!(
        String::from_utf8_lossy(response.body()).trim_end(),
        @r#"{"id":42,"name":"Alice"}"#
    );
}

/// Test the default status payload.
#[tokio::test]
async fn test_with_status_teapot() {
    let service = ServiceBuilder::new()
        .layer(ResponderLayer::new(Options::default()))
        .service(handler_fn(|exchange| {
            exchange.with_status(StatusCode::IM_A_TEAPOT);
        }));

    let response = service.oneshot(get("/brew")).await.expect("response");

    check!(response.status() == StatusCode::IM_A_TEAPOT);
    check!(content_type(&response) == Some(JSON_CONTENT_TYPE));
    check!(response.body().as_ref() == b"{\"status\":\"I'm a teapot\",\"code\":418}\n");
}

/// Test that handlers can read the buffered request body.
#[tokio::test]
async fn test_request_body_is_buffered() {
    let service = service(
        &Options::default(),
        handler_fn(|exchange| {
            let body: Value = serde_json::from_slice(exchange.request().body()).unwrap_or_default();
            exchange.with(StatusCode::CREATED, json!({"echo": body}));
        }),
    );

    let request = http::Request::builder()
        .method(http::Method::POST)
        .uri("/echo")
        .body(Full::new(Bytes::from_static(br#"{"n":1}"#)))
        .expect("request");
    let response = service.oneshot(request).await.expect("response");

    check!(response.status() == StatusCode::CREATED);
    check!(json_body(&response) == json!({"echo": {"n": 1}}));
}

/// Test the hook order: before transforms, after observes handler arguments.
#[tokio::test]
async fn test_hooks_through_service() {
    let observed: Arc<Mutex<Vec<(StatusCode, Payload)>>> = Arc::default();
    let captured = Arc::clone(&observed);
    let options = Options::builder()
        .before(|_sink, _request, status, payload| match payload.as_error() {
            Some(err) => (status, json!({"error": err.to_string()}).into()),
            None => (status, payload),
        })
        .after(move |_sink, _request, status, payload| {
            captured
                .lock()
                .expect("lock")
                .push((status, payload.clone()));
        })
        .build();

    let failure = Payload::error("something went wrong");
    let emitted = failure.clone();
    let service = ServiceBuilder::new()
        .layer(LoggingLayer::new())
        .layer(ResponderLayer::new(options))
        .service(handler_fn(move |exchange| {
            exchange.with(StatusCode::INTERNAL_SERVER_ERROR, emitted.clone());
        }));

    let response = service.oneshot(get("/fail")).await.expect("response");

    check!(response.status() == StatusCode::INTERNAL_SERVER_ERROR);
    check!(json_body(&response) == json!({"error": "something went wrong"}));

    let observed = observed.lock().expect("lock");
    let_assert!([(status, payload)] = observed.as_slice());
    check!(*status == StatusCode::INTERNAL_SERVER_ERROR);
    check!(*payload == failure);
}

struct CsvEncoder;

impl Encoder for CsvEncoder {
    fn content_type(&self, _sink: &dyn Sink, _request: &http::Request<Bytes>) -> http::HeaderValue {
        http::HeaderValue::from_static("text/csv")
    }

    fn encode(
        &self,
        sink: &mut dyn Sink,
        _request: &http::Request<Bytes>,
        payload: &Payload,
    ) -> Result<()> {
        let Some(Value::Object(map)) = payload.as_json() else {
            return Err(Error::encode("only objects encode to CSV"));
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        let values: Vec<String> = map.values().map(ToString::to_string).collect();
        let body = format!("{}\n{}\n", keys.join(","), values.join(","));
        sink.write(body.as_bytes())?;
        Ok(())
    }
}

/// Test per-request encoder selection from the Accept header.
#[tokio::test]
async fn test_encoder_negotiation() {
    let options = Options::builder()
        .encoder(|_sink, request| {
            let wants_csv = request
                .headers()
                .get(header::ACCEPT)
                .is_some_and(|accept| accept == "text/csv");
            let encoder: Arc<dyn Encoder> = if wants_csv {
                Arc::new(CsvEncoder)
            } else {
                Arc::new(responder::JsonEncoder)
            };
            encoder
        })
        .build();
    let service = service(
        &options,
        handler_fn(|exchange| exchange.with(StatusCode::OK, json!({"a": 1, "b": 2}))),
    );

    let csv = http::Request::builder()
        .uri("/report")
        .header(header::ACCEPT, "text/csv")
        .body(Full::new(Bytes::new()))
        .expect("request");
    let response = service.clone().oneshot(csv).await.expect("response");
    check!(content_type(&response) == Some("text/csv"));
    check!(response.body().as_ref() == b"a,b\n1,2\n");

    let response = service.oneshot(get("/report")).await.expect("response");
    check!(content_type(&response) == Some(JSON_CONTENT_TYPE));
    check!(json_body(&response) == json!({"a": 1, "b": 2}));
}

/// Test that encode failures are observed and do not fail the exchange.
#[tokio::test]
async fn test_encode_failure_reaches_on_err() {
    let errors: Arc<Mutex<Vec<String>>> = Arc::default();
    let captured = Arc::clone(&errors);
    let options = Options::builder()
        .with_encoder(CsvEncoder)
        .on_err(move |err| captured.lock().expect("lock").push(err.to_string()))
        .build();
    let service = service(
        &options,
        handler_fn(|exchange| exchange.with(StatusCode::OK, json!([1, 2, 3]))),
    );

    let response = service.oneshot(get("/report")).await.expect("response");

    check!(response.status() == StatusCode::OK);
    check!(content_type(&response) == Some("text/csv"));
    check!(response.body().is_empty());
    check!(*errors.lock().expect("lock") == ["encode error: only objects encode to CSV"]);
}

/// Test that a second response without `allow_multiple` is reported.
#[tokio::test]
async fn test_try_with_second_response() {
    let outcome: Arc<Mutex<Option<Error>>> = Arc::default();
    let captured = Arc::clone(&outcome);
    let service = service(
        &Options::default(),
        handler_fn(move |exchange: &mut Exchange<'_>| {
            exchange.with(StatusCode::BAD_REQUEST, Payload::error("borked"));
            if let Err(err) = exchange.try_with(StatusCode::OK, ()) {
                *captured.lock().expect("lock") = Some(err);
            }
        }),
    );

    let response = service.oneshot(get("/twice")).await.expect("response");

    check!(response.status() == StatusCode::BAD_REQUEST);
    let_assert!(Some(err) = outcome.lock().expect("lock").take());
    check!(err.is_fatal());
}

/// Test that `allow_multiple` lets the last response win on the sink.
#[tokio::test]
async fn test_allow_multiple_through_service() {
    let options = Options::builder().allow_multiple(true).build();
    let service = service(
        &options,
        handler_fn(|exchange| {
            exchange.with(StatusCode::INTERNAL_SERVER_ERROR, Payload::error("borked"));
            exchange.with(StatusCode::OK, ());
        }),
    );

    let response = service.oneshot(get("/twice")).await.expect("response");

    check!(response.status() == StatusCode::OK);
    check!(response.body().as_ref() == b"\"borked\"\n{}\n");
}

/// Test that concurrent exchanges on one service do not share state.
#[tokio::test]
async fn test_concurrent_exchanges() {
    let service = service(
        &Options::default(),
        handler_fn(|exchange| {
            let path = exchange.request().uri().path().to_string();
            exchange.with(StatusCode::OK, json!({ "path": path }));
        }),
    );

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                let response = service
                    .oneshot(get(&format!("/item/{i}")))
                    .await
                    .expect("response");
                (i, json_body(&response))
            })
        })
        .collect();

    for task in tasks {
        let (i, body) = task.await.expect("task");
        check!(body == json!({ "path": format!("/item/{i}") }));
    }
}

/// Test that a second response without `allow_multiple` aborts the exchange.
#[tokio::test]
#[should_panic(expected = "response: multiple responses")]
async fn test_multiple_responses_abort() {
    let service = service(
        &Options::default(),
        handler_fn(|exchange| {
            exchange.with(StatusCode::INTERNAL_SERVER_ERROR, Payload::error("borked"));
            exchange.with(StatusCode::OK, ());
        }),
    );

    let _ = service.oneshot(get("/twice")).await;
}
