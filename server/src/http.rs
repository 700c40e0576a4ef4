//! HTTP delivery of rendered ASCII art.
//!
//! A minimal HTTP/1.1 server: one task per connection, one request per
//! connection, `Connection: close` on every response. The configured route
//! answers GET and HEAD with the art as `text/plain`.

use crate::source::{SourceError, load_image};
use asciify::{ArtError, ConversionConfig, process_image};
use log::{debug, error, info, warn};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinError;

/// Time allowed for a client to send its request head
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Header lines accepted before a request is rejected
const MAX_HEADER_LINES: usize = 100;

/// Longest request or header line accepted, in bytes
const MAX_LINE_LEN: usize = 8 * 1024;

/// What the endpoint serves and how
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub route: String,
    pub image: PathBuf,
    pub conversion: ConversionConfig,
    pub render_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Art(#[from] ArtError),
}

/// Load an image from disk and convert it
pub fn render(image: &Path, config: &ConversionConfig) -> Result<String, RenderError> {
    let img = load_image(image)?;
    Ok(process_image(&img, config)?)
}

/// Parsed request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub version: String,
}

impl HttpRequest {
    pub fn is_head(&self) -> bool {
        self.method == "HEAD"
    }
}

/// Parse `METHOD TARGET VERSION`
pub fn parse_request_line(line: &str) -> Option<HttpRequest> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    let version = parts.next()?;
    if parts.next().is_some() || !version.starts_with("HTTP/") || !target.starts_with('/') {
        return None;
    }

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query.to_string())),
        None => (target, None),
    };

    Some(HttpRequest {
        method: method.to_string(),
        path: path.to_string(),
        query,
        version: version.to_string(),
    })
}

/// Read one line of at most `MAX_LINE_LEN` bytes, newline included
///
/// Returns `Ok(None)` when the line is longer than that; the excess stays unread.
async fn read_line_capped<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<usize>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let read = (&mut *reader)
        .take(MAX_LINE_LEN as u64 + 1)
        .read_until(b'\n', buf)
        .await?;
    if buf.len() > MAX_LINE_LEN {
        return Ok(None);
    }
    Ok(Some(read))
}

/// Read a request head, discarding headers
///
/// Returns `Ok(None)` for a malformed request: an unparsable or non-UTF-8
/// request line, a line over `MAX_LINE_LEN` bytes or too many headers.
/// Header bytes are never decoded.
async fn read_request<R>(reader: &mut R) -> io::Result<Option<HttpRequest>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let request = match read_line_capped(reader, &mut line).await? {
        Some(0) => {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before request line",
            ));
        }
        Some(_) => std::str::from_utf8(&line).ok().and_then(parse_request_line),
        None => return Ok(None),
    };

    for _ in 0..MAX_HEADER_LINES {
        match read_line_capped(reader, &mut line).await? {
            Some(0) => return Ok(request),
            Some(_) if line.trim_ascii().is_empty() => return Ok(request),
            Some(_) => {}
            None => return Ok(None),
        }
    }
    Ok(None)
}

/// Scale requested through the `scale` query parameter, if any
pub fn scale_override(query: Option<&str>) -> Result<Option<f64>, String> {
    let Some(query) = query else {
        return Ok(None);
    };

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == "scale" {
            return value
                .parse::<f64>()
                .map(Some)
                .map_err(|_| format!("invalid scale '{}'", value));
        }
    }
    Ok(None)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "text/plain; charset=utf-8".to_string())],
            body: body.into().into_bytes(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Serialize status line, headers and (unless `head_only`) the body
    pub fn to_bytes(&self, head_only: bool) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status, reason_phrase(self.status));
        for (name, value) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        head.push_str("Connection: close\r\n\r\n");

        let mut bytes = head.into_bytes();
        if !head_only {
            bytes.extend_from_slice(&self.body);
        }
        bytes
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Build the response for a parsed request
pub async fn respond(request: &HttpRequest, endpoint: &Endpoint) -> HttpResponse {
    if request.path != endpoint.route {
        return HttpResponse::text(404, "not found\n");
    }
    if request.method != "GET" && request.method != "HEAD" {
        return HttpResponse::text(405, "method not allowed\n").with_header("Allow", "GET, HEAD");
    }

    let config = match scale_override(request.query.as_deref()) {
        Ok(Some(scale)) => ConversionConfig::with_scale(scale),
        Ok(None) => endpoint.conversion,
        Err(msg) => return HttpResponse::text(400, format!("{}\n", msg)),
    };
    if let Err(e) = config.validate() {
        return HttpResponse::text(400, format!("{}\n", e));
    }

    let image = endpoint.image.clone();
    let task = tokio::task::spawn_blocking(move || render(&image, &config));
    bounded_render(endpoint.render_timeout, task).await
}

/// Wait for a render up to `limit` and translate its outcome
///
/// A blocking render cannot be cancelled; on timeout only the response is
/// abandoned.
async fn bounded_render<F>(limit: Duration, task: F) -> HttpResponse
where
    F: Future<Output = Result<Result<String, RenderError>, JoinError>>,
{
    match tokio::time::timeout(limit, task).await {
        Ok(Ok(Ok(art))) => HttpResponse::text(200, art),
        Ok(Ok(Err(e))) => {
            warn!("render failed: {}", e);
            HttpResponse::text(500, "failed to render image\n")
        }
        Ok(Err(e)) => {
            error!("render task failed: {}", e);
            HttpResponse::text(500, "failed to render image\n")
        }
        Err(_) => {
            warn!("render timed out after {:?}", limit);
            HttpResponse::text(503, "render timed out\n")
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    endpoint: &Endpoint,
) -> io::Result<()> {
    let start = Instant::now();
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let request = tokio::time::timeout(REQUEST_READ_TIMEOUT, read_request(&mut reader))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "timed out reading request"))??;

    let (response, head_only, label) = match request {
        Some(request) => {
            let response = respond(&request, endpoint).await;
            let label = format!("{} {} {}", request.method, request.path, request.version);
            (response, request.is_head(), label)
        }
        None => (
            HttpResponse::text(400, "bad request\n"),
            false,
            "<malformed>".to_string(),
        ),
    };

    write_half.write_all(&response.to_bytes(head_only)).await?;
    write_half.shutdown().await?;

    info!(
        "{} \"{}\" {} {} bytes in {:?}",
        peer.ip(),
        label,
        response.status,
        response.body.len(),
        start.elapsed()
    );
    Ok(())
}

/// Accept connections until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, endpoint: Arc<Endpoint>, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("server shutting down");
                return Ok(());
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let endpoint = Arc::clone(&endpoint);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, peer, &endpoint).await {
                            debug!("connection from {} dropped: {}", peer, e);
                        }
                    });
                }
                Err(e) => error!("accept failed: {}", e),
            }
        }
    }
}
