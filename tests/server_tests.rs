//! End-to-end tests over a real socket.
//!
//! Each test starts the may_minihttp server on an ephemeral port, sends raw
//! HTTP/1.1 requests and checks the bytes that come back.

use chrono::Weekday;
use gooday::handlers::day;
use gooday::middleware::{access_log, require_bearer};
use gooday::server::{Request, ResponseSink};
use gooday::Router;

mod common;
use common::http::{header, parse_response, send_request};
use common::test_server;

#[test]
fn test_greeting_end_to_end() {
    let mut router = Router::new();
    router.add_filter(access_log());
    router.get("/", |_req: &mut Request, res: &mut dyn ResponseSink| {
        day::write_greeting(Weekday::Mon, res);
    });
    let (handle, addr) = test_server::start(router);

    let resp = send_request(&addr, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
    handle.stop();

    let (status, _headers, body) = parse_response(&resp);
    assert_eq!(status, 200);
    assert_eq!(body, "Happy Monday.\n");
}

#[test]
fn test_live_weekday_handler() {
    let mut router = Router::new();
    router.get("/", day::get_handler);
    let (handle, addr) = test_server::start(router);

    let resp = send_request(&addr, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
    handle.stop();

    let (status, _headers, body) = parse_response(&resp);
    assert_eq!(status, 200);
    assert!(body.starts_with("Happy "), "{body}");
    assert!(body.ends_with("day.\n"), "{body}");
}

#[test]
fn test_empty_router_returns_not_found() {
    let (handle, addr) = test_server::start(Router::new());

    let resp = send_request(&addr, "GET /anything HTTP/1.1\r\nHost: localhost\r\n\r\n");
    handle.stop();

    let (status, headers, body) = parse_response(&resp);
    assert_eq!(status, 404);
    assert_eq!(
        header(&headers, "content-type"),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(body, "404 page not found\n");
}

#[test]
fn test_path_and_query_params_over_the_wire() {
    let mut router = Router::new();
    router.get(
        "/cats/:id([0-9]+)",
        |req: &mut Request, res: &mut dyn ResponseSink| {
            let body = format!(
                "id={} color={}\n",
                req.query_param("id").unwrap_or_default(),
                req.query_param("color").unwrap_or_default()
            );
            res.add_header("Content-Type", "text/plain");
            res.write_all(body.as_bytes()).unwrap();
        },
    );
    let (handle, addr) = test_server::start(router);

    let ok = send_request(
        &addr,
        "GET /cats/42?color=red HTTP/1.1\r\nHost: localhost\r\n\r\n",
    );
    let miss = send_request(&addr, "GET /cats/abc HTTP/1.1\r\nHost: localhost\r\n\r\n");
    handle.stop();

    let (status, headers, body) = parse_response(&ok);
    assert_eq!(status, 200);
    assert_eq!(header(&headers, "content-type"), Some("text/plain"));
    assert_eq!(body, "id=42 color=red\n");

    let (status, _, _) = parse_response(&miss);
    assert_eq!(status, 404);
}

#[test]
fn test_filter_rejection_over_the_wire() {
    let mut router = Router::new();
    router.add_filter(require_bearer("token"));
    router.post("/items", |_req: &mut Request, res: &mut dyn ResponseSink| {
        res.write_status(201);
        res.write_all(b"created\n").unwrap();
    });
    let (handle, addr) = test_server::start(router);

    let denied = send_request(
        &addr,
        "POST /items HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\n\r\n",
    );
    let allowed = send_request(
        &addr,
        "POST /items HTTP/1.1\r\nHost: localhost\r\nAuthorization: Bearer token\r\nContent-Length: 0\r\n\r\n",
    );
    handle.stop();

    let (status, headers, body) = parse_response(&denied);
    assert_eq!(status, 401);
    assert_eq!(header(&headers, "www-authenticate"), Some("Bearer"));
    assert_eq!(body, "401 unauthorized\n");

    let (status, _, body) = parse_response(&allowed);
    assert_eq!(status, 201);
    assert_eq!(body, "created\n");
}
