use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use cwhistory::network::{ApiClient, ApiError, Call, CallError, Endpoint, ResponseBody, TypeShape};
use cwhistory::{Left, Right};
use reqwest::Method;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Debug, Deserialize, PartialEq)]
struct Greeting {
    message: String,
}

impl ResponseBody for Greeting {}

static GREETING: TypeShape = TypeShape::Named("Greeting");
static GREETING_RESULT: TypeShape = TypeShape::Either(Some((&TypeShape::ApiError, &GREETING)));
static UNIT_RESULT: TypeShape = TypeShape::Either(Some((&TypeShape::ApiError, &TypeShape::Unit)));

static GET_GREETING: Endpoint = Endpoint {
    name: "greeting",
    method: Method::GET,
    path: "greetings/{kind}",
    returns: TypeShape::Call(Some(&GREETING_RESULT)),
};

static DELETE_GREETING: Endpoint = Endpoint {
    name: "delete_greeting",
    method: Method::DELETE,
    path: "greetings/{kind}",
    returns: TypeShape::Call(Some(&UNIT_RESULT)),
};

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/api/greetings/ok",
            get(|| async { r#"{"message":"hello"}"# }).delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/greetings/missing",
            get(|| async { (StatusCode::NOT_FOUND, "not found") }),
        )
        .route(
            "/api/greetings/chatty",
            delete(|| async { r#"{"success":true}"# }),
        )
        .route("/api/greetings/empty", get(|| async { "" }))
        .route("/api/greetings/garbled", get(|| async { "{\"message\": " }))
        .route(
            "/api/greetings/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                r#"{"message":"late"}"#
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, timeout: Duration) -> ApiClient {
    ApiClient::new(&format!("http://{addr}/api"), timeout).unwrap()
}

#[tokio::test]
async fn success_is_right() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(5));
    let binding = client.bind(&GET_GREETING).unwrap();

    let either = client
        .call::<Greeting>(&binding, &[("kind", "ok")], &[])
        .fetch()
        .await
        .unwrap();

    assert_eq!(
        either.right(),
        Some(Greeting {
            message: "hello".to_string()
        })
    );
}

#[tokio::test]
async fn non_success_status_is_http_error_with_body() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(5));
    let binding = client.bind(&GET_GREETING).unwrap();

    let response = client
        .call::<Greeting>(&binding, &[("kind", "missing")], &[])
        .execute()
        .await
        .unwrap();

    // the envelope itself is always successful
    assert!(response.is_successful());
    match response.into_body() {
        Some(Left(ApiError::Http { code, body })) => {
            assert_eq!(code, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn no_content_is_right_unit() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(5));
    let binding = client.bind(&DELETE_GREETING).unwrap();

    let either = client
        .call::<()>(&binding, &[("kind", "ok")], &[])
        .fetch()
        .await
        .unwrap();

    assert!(matches!(either, Right(())));
}

#[tokio::test]
async fn no_content_ignores_unexpected_body() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(5));
    let binding = client.bind(&DELETE_GREETING).unwrap();

    let either = client
        .call::<()>(&binding, &[("kind", "chatty")], &[])
        .fetch()
        .await
        .unwrap();

    assert!(matches!(either, Right(())));
}

#[tokio::test]
async fn empty_body_for_typed_response_is_unknown() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(5));
    let binding = client.bind(&GET_GREETING).unwrap();

    let either = client
        .call::<Greeting>(&binding, &[("kind", "empty")], &[])
        .fetch()
        .await
        .unwrap();

    match either {
        Left(ApiError::Unknown(cause)) => assert_eq!(cause.to_string(), "Response body was null"),
        other => panic!("expected unknown error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_unknown() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(5));
    let binding = client.bind(&GET_GREETING).unwrap();

    let either = client
        .call::<Greeting>(&binding, &[("kind", "garbled")], &[])
        .fetch()
        .await
        .unwrap();

    assert!(matches!(either, Left(ApiError::Unknown(_))));
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(addr, Duration::from_secs(5));
    let binding = client.bind(&GET_GREETING).unwrap();

    let either = client
        .call::<Greeting>(&binding, &[("kind", "ok")], &[])
        .fetch()
        .await
        .unwrap();

    assert!(matches!(either, Left(ApiError::Network(_))));
}

#[tokio::test]
async fn timeout_is_network_error() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_millis(100));
    let binding = client.bind(&GET_GREETING).unwrap();

    let either = client
        .call::<Greeting>(&binding, &[("kind", "slow")], &[])
        .fetch()
        .await
        .unwrap();

    assert!(matches!(either, Left(ApiError::Network(_))));
}

#[tokio::test]
async fn enqueue_delivers_mapped_result() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(5));
    let binding = client.bind(&GET_GREETING).unwrap();
    let call = client.call::<Greeting>(&binding, &[("kind", "missing")], &[]);

    let (tx, rx) = oneshot::channel();
    call.enqueue(Box::new(move |outcome| {
        let _ = tx.send(outcome);
    }));

    let response = rx.await.unwrap().unwrap();
    assert!(call.is_executed());
    assert_eq!(response.into_body().unwrap().left().unwrap().http_code(), Some(404));
}

#[tokio::test]
async fn cancel_in_flight_yields_no_result() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(10));
    let binding = client.bind(&GET_GREETING).unwrap();
    let call = std::sync::Arc::new(client.call::<Greeting>(&binding, &[("kind", "slow")], &[]));

    let running = {
        let call = std::sync::Arc::clone(&call);
        tokio::spawn(async move { call.execute().await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    call.cancel();

    let outcome = running.await.unwrap();
    assert!(matches!(outcome, Err(CallError::Canceled)));
    assert!(call.is_canceled());
}

#[tokio::test]
async fn canceled_enqueue_never_calls_back() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(10));
    let binding = client.bind(&GET_GREETING).unwrap();
    let call = client.call::<Greeting>(&binding, &[("kind", "slow")], &[]);

    let (tx, rx) = oneshot::channel::<()>();
    call.enqueue(Box::new(move |_| {
        let _ = tx.send(());
    }));
    call.cancel();

    // the callback is dropped together with its sender
    assert!(rx.await.is_err());
}

#[tokio::test]
async fn clone_call_runs_independently() {
    let addr = spawn_server().await;
    let client = client(addr, Duration::from_secs(5));
    let binding = client.bind(&GET_GREETING).unwrap();
    let call = client.call::<Greeting>(&binding, &[("kind", "ok")], &[]);

    assert!(call.fetch().await.unwrap().is_right());
    assert!(call.is_executed());

    let again = call.clone_call();
    assert!(!again.is_executed());
    assert_eq!(again.request().url(), call.request().url());
    assert!(again.execute().await.unwrap().into_body().unwrap().is_right());
}
