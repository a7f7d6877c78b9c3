//! Shared test helper: a minimal HTTP/1.1 storage endpoint on an ephemeral
//! port. Implements just enough of the protocol for the upload transport
//! (content-length and chunked request bodies), records every request, and
//! answers with `{"storageId": ...}`. A request whose body is exactly `FAIL`
//! is answered with a 500 so tests can exercise the failure path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One request as seen by the stub server.
#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

pub struct StubStorageServer {
    base_url: String,
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
}

impl StubStorageServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub storage server");
        let addr = listener.local_addr().expect("stub storage server addr");
        let received: Arc<Mutex<Vec<ReceivedUpload>>> = Arc::new(Mutex::new(Vec::new()));
        let counter = Arc::new(AtomicUsize::new(0));

        let log = received.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let log = log.clone();
                let counter = counter.clone();
                tokio::spawn(async move {
                    let _ = handle_connection(stream, log, counter).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            received,
        }
    }

    pub fn upload_url(&self) -> String {
        format!("{}/store", self.base_url)
    }

    pub fn requests(&self) -> Vec<ReceivedUpload> {
        self.received.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    log: Arc<Mutex<Vec<ReceivedUpload>>>,
    counter: Arc<AtomicUsize>,
) -> std::io::Result<()> {
    let mut buf: Vec<u8> = Vec::new();
    let header_end = loop {
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        read_more(&mut stream, &mut buf).await?;
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_type = None;
    let mut content_length: Option<usize> = None;
    let mut chunked = false;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "content-type" => content_type = Some(value.to_string()),
            "content-length" => content_length = value.parse().ok(),
            "transfer-encoding" => chunked = value.eq_ignore_ascii_case("chunked"),
            _ => {},
        }
    }

    let mut rest = buf.split_off(header_end);
    let body = if chunked {
        read_chunked_body(&mut stream, &mut rest).await?
    } else {
        let length = content_length.unwrap_or(0);
        while rest.len() < length {
            read_more(&mut stream, &mut rest).await?;
        }
        rest.truncate(length);
        rest
    };

    let failing = body.as_slice() == b"FAIL".as_slice();
    log.lock().unwrap().push(ReceivedUpload {
        method,
        path,
        content_type,
        body,
    });

    let response = if failing {
        let message = "storage backend unavailable";
        format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            message.len(),
            message
        )
    } else {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        let body = format!("{{\"storageId\":\"st_{:04}\"}}", id);
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    };
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Decode a chunked request body. `rest` holds any bytes already read past
/// the headers.
async fn read_chunked_body(
    stream: &mut TcpStream,
    rest: &mut Vec<u8>,
) -> std::io::Result<Vec<u8>> {
    let mut body = Vec::new();
    let mut pos = 0usize;
    loop {
        let line_end = loop {
            if let Some(idx) = find_subslice(&rest[pos..], b"\r\n") {
                break pos + idx;
            }
            read_more(stream, rest).await?;
        };
        let size_line = String::from_utf8_lossy(&rest[pos..line_end]).into_owned();
        let size_text = size_line.split(';').next().unwrap_or("0").trim().to_string();
        let size = usize::from_str_radix(&size_text, 16).unwrap_or(0);
        pos = line_end + 2;
        if size == 0 {
            return Ok(body);
        }
        while rest.len() < pos + size + 2 {
            read_more(stream, rest).await?;
        }
        body.extend_from_slice(&rest[pos..pos + size]);
        pos += size + 2;
    }
}

async fn read_more(stream: &mut TcpStream, buf: &mut Vec<u8>) -> std::io::Result<()> {
    let mut chunk = [0u8; 4096];
    let n = stream.read(&mut chunk).await?;
    if n == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed mid-request",
        ));
    }
    buf.extend_from_slice(&chunk[..n]);
    Ok(())
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
