//! Minimal HTTP/1.1 server that serves Apache-style autoindex pages for integration tests.
//!
//! Routes are keyed by raw request path (still percent-encoded) and can be
//! changed while the server runs. Every request path is recorded so tests can
//! assert what was (and was not) fetched.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

#[derive(Clone)]
pub struct ListingServer {
    base_url: String,
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ListingServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<Mutex<HashMap<String, Route>>> = Arc::default();
        let requests: Arc<Mutex<Vec<String>>> = Arc::default();
        {
            let routes = Arc::clone(&routes);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for stream in listener.incoming().flatten() {
                    let routes = Arc::clone(&routes);
                    let requests = Arc::clone(&requests);
                    thread::spawn(move || handle(stream, &routes, &requests));
                }
            });
        }
        Self {
            base_url: format!("http://127.0.0.1:{}/", port),
            routes,
            requests,
        }
    }

    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// URL of `path` (which must start with `/`).
    pub fn url_of(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Serves an autoindex page at `path` listing `hrefs`, surrounded by the
    /// sort links and parent link Apache emits.
    pub fn dir(&self, path: &str, hrefs: &[&str]) {
        let mut html = String::from(
            "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 3.2 Final//EN\">\n<html>\n<head><title>Index</title></head>\n<body>\n<table>\n",
        );
        html.push_str("<tr><th><a href=\"?C=N;O=D\">Name</a></th><th><a href=\"?C=M;O=A\">Last modified</a></th></tr>\n");
        html.push_str("<tr><td><img src=\"/icons/back.gif\" alt=\"[PARENTDIR]\"></td><td><a href=\"/\">Parent Directory</a></td></tr>\n");
        html.push_str("<tr><td><a href=\"../\">../</a></td></tr>\n");
        for href in hrefs {
            html.push_str(&format!(
                "<tr><td><img src=\"/icons/unknown.gif\" alt=\"[   ]\"></td><td><a href=\"{}\">{}</a></td></tr>\n",
                href, href
            ));
        }
        html.push_str("</table>\n</body></html>\n");
        self.route(path, 200, "text/html;charset=UTF-8", html.into_bytes());
    }

    /// Serves a raw HTML page at `path`.
    pub fn page(&self, path: &str, html: &str) {
        self.route(path, 200, "text/html", html.as_bytes().to_vec());
    }

    pub fn file(&self, path: &str, body: &[u8]) {
        self.route(path, 200, "application/octet-stream", body.to_vec());
    }

    /// Makes `path` answer with `status` and a short body.
    pub fn status(&self, path: &str, status: u16) {
        self.route(path, status, "text/plain", format!("status {}", status).into_bytes());
    }

    pub fn remove(&self, path: &str) {
        self.routes.lock().unwrap().remove(path);
    }

    fn route(&self, path: &str, status: u16, content_type: &'static str, body: Vec<u8>) {
        self.routes.lock().unwrap().insert(
            path.to_string(),
            Route {
                status,
                content_type,
                body,
            },
        );
    }

    /// All request paths received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &Mutex<HashMap<String, Route>>,
    requests: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = String::from_utf8_lossy(&buf);
    let (method, path) = parse_request_line(&request);
    if path.is_empty() {
        return;
    }
    requests.lock().unwrap().push(path.to_string());

    let route = routes.lock().unwrap().get(path).cloned();
    let route = route.unwrap_or(Route {
        status: 404,
        content_type: "text/plain",
        body: b"not found".to_vec(),
    });
    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.content_type,
        route.body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(&route.body);
    }
    let _ = stream.flush();
}

/// Returns (method, request-target) from the first request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let line = request.lines().next().unwrap_or("");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");
    (method, path)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
