//! Mock storefront server for testing
//!
//! Serves a fixed sequence of canned HTTP responses over a real
//! socket, one per incoming request, so client tests exercise the full
//! HTTP path without a live storefront session.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Mock storefront answering each request with the next canned
/// response, then shutting down.
pub struct MockStorefront {
    port: u16,
}

impl MockStorefront {
    /// Start a server that answers each incoming request with the next
    /// `(status, body)` pair. The serving thread exits once the
    /// sequence is exhausted.
    pub fn serve(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock server");
        let port = listener.local_addr().expect("Mock server address").port();

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    break;
                };
                // Drain the request; one read is enough for the small
                // GETs issued in tests.
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);

                let reason = match status {
                    200 => "OK",
                    403 => "Forbidden",
                    500 => "Internal Server Error",
                    _ => "Unknown",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self { port }
    }

    /// Endpoint URL for pointing a client at this server.
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}/ajax/index/ordersList/", self.port)
    }
}
