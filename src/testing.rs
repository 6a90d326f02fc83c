//! A tiny in-process HTTP server for tests.
//!
//! Binds `127.0.0.1:0`, answers one canned response per accepted connection,
//! and hands back every request it saw.  Each response closes its connection
//! so the client opens a fresh one for the next call.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use reqwest::StatusCode;

/// A request as received by [`MockServer`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path plus query string.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct MockServer {
    url: String,
    handle: JoinHandle<Vec<Recorded>>,
}

impl MockServer {
    /// Serve `responses` in order, one per connection.
    pub fn start(responses: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                seen.push(read_request(&mut reader));
                stream.write_all(render_response(status, &body).as_bytes()).unwrap();
                stream.flush().unwrap();
            }
            seen
        });

        Self { url, handle }
    }

    /// Base URL, with a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait until every canned response was served and return the requests.
    pub fn finish(self) -> Vec<Recorded> {
        self.handle.join().unwrap()
    }
}

fn read_request(reader: &mut impl BufRead) -> Recorded {
    let mut line = String::new();
    reader.read_line(&mut line).unwrap();
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).unwrap();

    Recorded {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

fn render_response(status: u16, body: &str) -> String {
    let code = StatusCode::from_u16(status).unwrap();
    let body = if code == StatusCode::NO_CONTENT || code == StatusCode::RESET_CONTENT {
        ""
    } else {
        body
    };
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        code.as_u16(),
        code.canonical_reason().unwrap_or(""),
        body.len(),
        body
    )
}
