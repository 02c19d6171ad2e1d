//! Minimal HTTP/1.1 stub standing in for an Egeria platform.
//!
//! Each accepted connection is answered with the next canned response and
//! closed. Requests are recorded and handed back by [`StubServer::finish`].

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use serde_json::Value;

use egeria_client::{Config, ServerClient};

#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    /// Path plus query string, exactly as sent.
    pub target: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Captured {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self, name: &str) -> Option<String> {
        let (_, query) = self.target.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_string())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct StubServer {
    url: String,
    handle: JoinHandle<Vec<Captured>>,
}

impl StubServer {
    /// Serve `responses` in order, one connection each.
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));

        let handle = thread::spawn(move || {
            let mut captured = Vec::with_capacity(responses.len());
            for (status, body) in responses {
                let (stream, _) = listener.accept().expect("accept");
                captured.push(serve_one(stream, status, &body));
            }
            captured
        });

        Self { url, handle }
    }

    /// Serve JSON bodies with status 200.
    pub fn json(bodies: Vec<Value>) -> Self {
        Self::start(bodies.into_iter().map(|b| (200, b.to_string())).collect())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn client(&self) -> ServerClient {
        ServerClient::from_config(&Config::for_platform(&self.url)).expect("client")
    }

    /// Wait for every canned response to be served and return the requests.
    pub fn finish(self) -> Vec<Captured> {
        self.handle.join().expect("stub server thread")
    }
}

fn serve_one(stream: TcpStream, status: u16, body: &str) -> Captured {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("request line");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut buf = vec![0u8; length];
    reader.read_exact(&mut buf).expect("request body");

    let mut stream = stream;
    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason(status),
        body.len(),
    );
    stream.write_all(response.as_bytes()).expect("write response");
    stream.flush().expect("flush response");

    Captured {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&buf).into_owned(),
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Error",
    }
}

/// `{"class": "GUIDResponse", "relatedHTTPCode": 200, "guid": ...}`
pub fn guid_response(guid: &str) -> Value {
    serde_json::json!({"class": "GUIDResponse", "relatedHTTPCode": 200, "guid": guid})
}

pub fn void_response() -> Value {
    serde_json::json!({"class": "VoidResponse", "relatedHTTPCode": 200})
}

pub fn element(guid: &str, qualified_name: &str) -> Value {
    serde_json::json!({
        "elementHeader": {"guid": guid, "type": {"typeName": "Referenceable"}},
        "properties": {"qualifiedName": qualified_name}
    })
}

pub fn elements_response(elements: Vec<Value>) -> Value {
    serde_json::json!({"class": "OpenMetadataRootElementsResponse", "relatedHTTPCode": 200, "elements": elements})
}

pub fn element_response(element: Value) -> Value {
    serde_json::json!({"class": "OpenMetadataRootElementResponse", "relatedHTTPCode": 200, "element": element})
}

/// Path prefix of a view service on the stub's default view server.
pub fn view_path(marker: &str) -> String {
    format!("/servers/qs-view-server/api/open-metadata/{marker}")
}
