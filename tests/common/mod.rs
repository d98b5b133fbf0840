//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed route table; unknown paths get 404. Every request is
//! recorded so tests can assert what was (not) fetched.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Route {
    pub fn html(body: &str) -> Self { Self { status: 200, content_type: "text/html; charset=utf-8", body: body.as_bytes().to_vec() } }
    pub fn bytes(body: &[u8]) -> Self { Self { status: 200, content_type: "application/octet-stream", body: body.to_vec() } }
    pub fn status(status: u16) -> Self { Self { status, content_type: "text/plain", body: Vec::new() } }
}

pub struct TestServer {
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String { format!("{}{}", self.base, path) }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> { self.requests.lock().unwrap().clone() }
}

/// Starts the server on an ephemeral port. It runs until the process exits.
pub fn start(routes: HashMap<&'static str, Route>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &routes, &seen));
        }
    });
    TestServer { base: format!("http://127.0.0.1:{port}"), requests }
}

fn handle(mut stream: TcpStream, routes: &HashMap<&'static str, Route>, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request.lines().next().and_then(|line| line.split_whitespace().nth(1)).unwrap_or("/").to_string();
    seen.lock().unwrap().push(path.clone());

    let route = routes.get(path.as_str()).cloned().unwrap_or_else(|| Route::status(404));
    let reason = if route.status == 200 { "OK" } else { "Not Found" };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason,
        route.content_type,
        route.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}
