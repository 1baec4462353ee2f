//! One-shot HTTP stub used by the integration tests
//!
//! Each stub accepts a single connection, records the request and answers
//! with a canned response.

#![allow(dead_code)]

use std::collections::HashMap;

use libdailycast::config::{Config, EndpointSection, FileConfig, OpenAiSection};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl StubServer {
    /// Wait for the single request the stub serves
    pub async fn captured(self) -> CapturedRequest {
        self.handle.await.expect("stub server task completes")
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Spawn a stub answering with `status`, `extra_headers` and a JSON `body`
pub async fn spawn_stub(status: u16, extra_headers: &[(&str, &str)], body: &str) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local test server");
    let addr = listener.local_addr().expect("local addr");

    let mut response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        reason_phrase(status),
        body.len()
    );
    for (name, value) in extra_headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("\r\n");
    response.push_str(body);

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept connection");

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.expect("read request");
            assert!(n > 0, "connection closed before headers were complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find_header_end(&buf) {
                break pos;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();
        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();

        let headers: HashMap<String, String> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
            .collect();

        let content_length: usize = headers
            .get("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let mut body = buf[header_end + 4..].to_vec();
        while body.len() < content_length {
            let n = socket.read(&mut chunk).await.expect("read body");
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }

        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        let _ = socket.shutdown().await;

        CapturedRequest {
            method,
            path,
            headers,
            body: String::from_utf8_lossy(&body).to_string(),
        }
    });

    StubServer {
        base_url: format!("http://{}", addr),
        handle,
    }
}

/// Base URLs for each service; `None` keeps the production default
#[derive(Default)]
pub struct Endpoints {
    pub openai: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
}

/// Build a config from explicit variables and stub endpoints
pub fn config_with(vars: &[(&str, &str)], endpoints: Endpoints) -> Config {
    let file = FileConfig {
        openai: OpenAiSection {
            model: None,
            base_url: endpoints.openai,
        },
        twitter: EndpointSection {
            base_url: endpoints.twitter,
        },
        linkedin: EndpointSection {
            base_url: endpoints.linkedin,
        },
        facebook: EndpointSection {
            base_url: endpoints.facebook,
        },
        ..FileConfig::default()
    };

    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Config::resolve(file, move |key| vars.get(key).cloned())
}

pub const TWITTER_VARS: [(&str, &str); 4] = [
    ("TWITTER_API_KEY", "consumer-key"),
    ("TWITTER_API_SECRET", "consumer-secret"),
    ("TWITTER_ACCESS_TOKEN", "access-token"),
    ("TWITTER_ACCESS_SECRET", "access-secret"),
];

pub const LINKEDIN_VARS: [(&str, &str); 2] = [
    ("LINKEDIN_ACCESS_TOKEN", "li-token"),
    ("LINKEDIN_PERSON_ID", "abc123"),
];

pub const FACEBOOK_VARS: [(&str, &str); 2] = [
    ("FACEBOOK_ACCESS_TOKEN", "page-token"),
    ("FACEBOOK_PAGE_ID", "905589205979351"),
];

/// Chat completion body whose first choice is `content`
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
    .to_string()
}
