//! Minimal HTTP/1.1 server answering HEAD and GET for integration tests.
//!
//! Serves one static body at every path. Requests under `/redirect/` get a 302
//! to the remainder of the path, carrying a decoy `Content-Disposition`.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Sent verbatim as `Content-Disposition` on HEAD and GET when set.
    pub content_disposition: Option<String>,
    /// If false, responses omit `Content-Length` and the body is delimited by close.
    pub content_length: bool,
    /// Status line used for non-redirect responses.
    pub status: &'static str,
    /// Overrides `status` for HEAD requests only.
    pub head_status: Option<&'static str>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            content_disposition: None,
            content_length: true,
            status: "200 OK",
            head_status: None,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns the base URL
/// without a trailing slash (e.g. "http://127.0.0.1:12345").
/// The server runs until the process exits.
pub fn start(body: Vec<u8>, opts: ServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let opts = Arc::new(opts);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let opts = Arc::clone(&opts);
            thread::spawn(move || handle(stream, &body, &opts));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, body: &[u8], opts: &ServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request_line(request);

    if let Some(target) = path.strip_prefix("/redirect") {
        let response = format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\n\
Content-Disposition: attachment; filename=\"decoy.html\"\r\nConnection: close\r\n\r\n",
            target
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    let is_head = method.eq_ignore_ascii_case("HEAD");
    let status = match opts.head_status {
        Some(s) if is_head => s,
        _ => opts.status,
    };
    let mut headers = format!("HTTP/1.1 {}\r\nConnection: close\r\n", status);
    if opts.content_length {
        headers.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    if let Some(cd) = &opts.content_disposition {
        headers.push_str(&format!("Content-Disposition: {}\r\n", cd));
    }
    headers.push_str("\r\n");
    let _ = stream.write_all(headers.as_bytes());

    if method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(body);
    }
    let _ = stream.flush();
}

/// Returns (method, path) from the request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");
    (method, path)
}
