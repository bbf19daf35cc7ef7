mod common;

use std::time::Duration;

use futures_util::StreamExt;
use lnbot::proto::{InvoiceEventKind, PaymentEventKind};
use lnbot::{Error, ErrorKind, LnBot, StreamState, WatchOptions};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    KeepAliveServer, SilentServer, config, config_with_timeout, invoice_json, payment_json, sse,
};

fn event_stream(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

#[tokio::test]
async fn keep_alives_then_settled_yields_exactly_one_event() {
    let server = MockServer::start().await;
    let body = format!(
        ": keep-alive\n\n: keep-alive\n\n{}",
        sse(&[("settled", invoice_json(42, "settled"))])
    );
    Mock::given(method("GET"))
        .and(path("/v1/invoices/42/events"))
        .and(header("accept", "text/event-stream"))
        .and(header("authorization", "Bearer key_test"))
        .respond_with(event_stream(body))
        .expect(1)
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let mut stream = bot.invoices().watch(42_u64, WatchOptions::new());
    assert_eq!(stream.state(), StreamState::Connecting);

    let event = stream.next().await.unwrap().unwrap();
    assert_eq!(event.event, InvoiceEventKind::Settled);
    assert_eq!(event.data.number, 42);
    assert_eq!(stream.state(), StreamState::Settled);

    assert!(stream.next().await.is_none());
    assert!(stream.next().await.is_none());
    assert_eq!(stream.state(), StreamState::Settled);
}

#[tokio::test]
async fn expired_event_ends_without_error() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/invoices/7/events"))
        .respond_with(event_stream(sse(&[("expired", invoice_json(7, "expired"))])))
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let events: Vec<_> = bot
        .invoices()
        .watch(7_u64, WatchOptions::new())
        .collect()
        .await;

    assert_eq!(events.len(), 1);
    let event = events.into_iter().next().unwrap().unwrap();
    assert_eq!(event.event, InvoiceEventKind::Expired);
}

#[tokio::test]
async fn events_after_the_terminal_one_are_not_delivered() {
    let server = MockServer::start().await;
    let body = sse(&[
        ("settled", invoice_json(1, "settled")),
        ("expired", invoice_json(1, "expired")),
    ]);
    Mock::given(path("/v1/invoices/1/events"))
        .respond_with(event_stream(body))
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let events: Vec<_> = bot
        .invoices()
        .watch(1_u64, WatchOptions::new())
        .collect()
        .await;
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn unknown_frames_are_ignored() {
    let server = MockServer::start().await;
    let body = format!(
        "event: keepalive\ndata: {{}}\n\nevent: pending\ndata: {}\n\ndata: nameless\n\nretry: 1000\n\n{}",
        invoice_json(3, "pending"),
        sse(&[("settled", invoice_json(3, "settled"))])
    );
    Mock::given(path("/v1/invoices/3/events"))
        .respond_with(event_stream(body))
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let events: Vec<_> = bot
        .invoices()
        .watch(3_u64, WatchOptions::new())
        .collect()
        .await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].as_ref().unwrap().event, InvoiceEventKind::Settled);
}

#[tokio::test]
async fn disconnect_before_terminal_event_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/invoices/9/events"))
        .respond_with(event_stream(": keep-alive\n\n: keep-alive\n\n".into()))
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let mut stream = bot.invoices().watch(9_u64, WatchOptions::new());

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, Error::Disconnected), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Other);
    assert_eq!(err.status(), None);
    assert_eq!(stream.state(), StreamState::Failed);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn malformed_event_payload_fails_the_stream() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/invoices/5/events"))
        .respond_with(event_stream("event: settled\ndata: {not json\n\n".into()))
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let mut stream = bot.invoices().watch(5_u64, WatchOptions::new());
    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    assert_eq!(err.body(), Some("{not json"));
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn error_status_on_connect_is_classified() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/invoices/404/events"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"invoice not found"}"#))
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let mut stream = bot.invoices().watch(404_u64, WatchOptions::new());
    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.body(), Some(r#"{"message":"invoice not found"}"#));
    assert_eq!(stream.state(), StreamState::Failed);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn stream_connects_lazily() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/invoices/abc123/events"))
        .respond_with(event_stream(sse(&[("settled", invoice_json(1, "settled"))])))
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let mut stream = bot.invoices().watch("abc123", WatchOptions::new());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(server.received_requests().await.unwrap().is_empty());

    assert!(stream.next().await.unwrap().is_ok());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn each_watch_opens_a_fresh_connection() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/invoices/2/events"))
        .respond_with(event_stream(sse(&[("settled", invoice_json(2, "settled"))])))
        .expect(2)
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    for _ in 0..2 {
        let events: Vec<_> = bot
            .invoices()
            .watch(2_u64, WatchOptions::new())
            .collect()
            .await;
        assert_eq!(events.len(), 1);
    }
}

#[tokio::test]
async fn watch_timeout_is_sent_to_the_server() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/invoices/8/events"))
        .and(query_param("timeout", "2"))
        .respond_with(event_stream(sse(&[("settled", invoice_json(8, "settled"))])))
        .expect(1)
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let options = WatchOptions::new().with_timeout(Duration::from_millis(1500));
    let events: Vec<_> = bot.invoices().watch(8_u64, options).collect().await;
    assert!(events[0].is_ok());
}

#[tokio::test]
async fn dropping_the_stream_closes_the_connection() {
    let mut server = KeepAliveServer::start().await;
    let bot = LnBot::new(config(server.uri())).unwrap();

    let mut stream = bot.invoices().watch(11_u64, WatchOptions::new());
    let first = tokio::time::timeout(Duration::from_millis(200), stream.next()).await;
    assert!(first.is_err(), "keep-alives must not surface as events");
    assert_eq!(stream.state(), StreamState::Open);

    let head = server.request_head().await;
    assert!(head.starts_with("GET /v1/invoices/11/events "), "{head}");

    drop(stream);
    assert!(server.closed_within(Duration::from_secs(3)).await);
}

#[tokio::test]
async fn close_releases_the_connection_and_ends_the_stream() {
    let server = KeepAliveServer::start().await;
    let bot = LnBot::new(config(server.uri())).unwrap();

    let mut stream = bot.invoices().watch(12_u64, WatchOptions::new());
    let _ = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
    stream.close();
    stream.close();
    assert_eq!(stream.state(), StreamState::Cancelled);
    assert!(stream.next().await.is_none());

    assert!(server.closed_within(Duration::from_secs(3)).await);
}

#[tokio::test]
async fn cancelling_the_consuming_task_closes_the_connection() {
    let server = KeepAliveServer::start().await;
    let bot = LnBot::new(config(server.uri())).unwrap();

    let mut stream = bot.invoices().watch(13_u64, WatchOptions::new());
    let task = tokio::spawn(async move { stream.next().await.map(|r| r.is_ok()) });
    tokio::time::sleep(Duration::from_millis(150)).await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert!(server.closed_within(Duration::from_secs(3)).await);
}

#[tokio::test]
async fn client_side_deadline_fails_and_closes() {
    let mut server = KeepAliveServer::start().await;
    let bot = LnBot::new(config(server.uri())).unwrap();

    let options = WatchOptions::new().with_timeout(Duration::from_millis(300));
    let mut stream = bot.invoices().watch(14_u64, options);
    let err = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("deadline not enforced")
        .unwrap()
        .unwrap_err();
    assert!(
        matches!(err, Error::Timeout { context: "GET /v1/invoices/{id}/events" }),
        "{err:?}"
    );
    assert_eq!(err.to_string(), "timed out: GET /v1/invoices/{id}/events");
    assert_eq!(stream.state(), StreamState::Failed);
    assert!(stream.next().await.is_none());

    let head = server.request_head().await;
    assert!(head.contains("/v1/invoices/14/events?timeout=1 "), "{head}");
    assert!(server.closed_within(Duration::from_secs(3)).await);
}

#[tokio::test]
async fn stalled_server_times_out_waiting_for_headers() {
    let mut server = SilentServer::start().await;
    let bot = LnBot::new(config_with_timeout(server.uri(), Duration::from_millis(300))).unwrap();

    let mut stream = bot.invoices().watch(15_u64, WatchOptions::new());
    let err = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("header wait not bounded")
        .unwrap()
        .unwrap_err();
    assert!(err.is_timeout(), "{err:?}");
    assert_eq!(stream.state(), StreamState::Failed);

    let head = server.request_head().await;
    assert!(head.starts_with("GET /v1/invoices/15/events "), "{head}");
    assert!(server.closed_within(Duration::from_secs(3)).await);
}

#[tokio::test]
async fn payment_watch_ends_on_failure() {
    let server = MockServer::start().await;
    let mut failed = payment_json(4, "failed");
    failed["failureReason"] = json!("no route");
    Mock::given(path("/v1/payments/4/events"))
        .respond_with(event_stream(sse(&[
            ("processing", payment_json(4, "processing")),
            ("failed", failed),
        ])))
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let mut stream = bot.payments().watch(4_u64, WatchOptions::new());
    let event = stream.next().await.unwrap().unwrap();
    assert_eq!(event.event, PaymentEventKind::Failed);
    assert_eq!(event.data.failure_reason.as_deref(), Some("no route"));
    assert_eq!(stream.state(), StreamState::Completed);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn wallet_events_arrive_in_order_and_end_quietly() {
    let server = MockServer::start().await;
    let body: String = (1..=3)
        .map(|n| {
            format!(
                "data: {}\n\n: ping\n\n",
                json!({"event": "invoice.settled", "createdAt": "2024-05-01T12:00:00Z", "data": {"number": n}})
            )
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/v1/events"))
        .respond_with(event_stream(body))
        .mount(&server)
        .await;

    let bot = LnBot::new(config(server.uri())).unwrap();
    let mut stream = bot.events().stream();
    let mut numbers = Vec::new();
    while let Some(event) = stream.next().await {
        let event = event.unwrap();
        assert_eq!(event.event, "invoice.settled");
        numbers.push(event.data["number"].as_u64().unwrap());
    }
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(stream.state(), StreamState::Completed);
}
