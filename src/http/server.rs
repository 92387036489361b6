use crate::concurrency::ThreadPool;
use crate::http::parse::{self, ParseError};
use crate::http::router::Router;
use crate::http::{self, BUFFER_SIZE, Response};
use anyhow::Context;
use bytes::{Buf, BytesMut};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use tracing::{debug, warn};

const HTTP_VERSION: &str = "HTTP/1.1";

pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    pool: ThreadPool,
}

impl Server {
    pub fn bind(addr: &str, workers: usize, router: Router) -> anyhow::Result<Server> {
        let listener =
            TcpListener::bind(addr).with_context(|| format!("can't bind address {addr}"))?;
        Ok(Server {
            listener,
            router: Arc::new(router),
            pool: ThreadPool::new(workers),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop. Each connection runs on a pool worker until it ends;
    /// connection failures are logged, never fatal to the listener.
    pub fn run(&self) -> anyhow::Result<()> {
        for stream in self.listener.incoming() {
            let stream = stream.context("accept failed")?;
            let router = Arc::clone(&self.router);
            self.pool.execute(move || {
                let peer = stream.peer_addr().ok();
                debug!(?peer, "accepted connection");
                if let Err(error) = serve_connection(stream, &router) {
                    warn!("connection from {peer:?} ended with error: {error:#}");
                }
            });
        }
        Ok(())
    }
}

/// Drives one connection until the peer disconnects, asks to close, or a
/// parse error poisons the framing.
///
/// Bytes accumulate in a buffer until the parser can frame a request out of
/// them; a single read never has to contain a whole request, and a read
/// holding several pipelined requests answers all of them without another
/// read. Reads block with no timeout. The stream is dropped, closing the
/// socket, on every exit path.
pub fn serve_connection(mut stream: TcpStream, router: &Router) -> anyhow::Result<()> {
    let mut buf = BytesMut::with_capacity(BUFFER_SIZE);

    loop {
        match parse::parse_request(&buf) {
            Ok((request, consumed)) => {
                buf.advance(consumed);

                let close = request.wants_close();
                let mut response = router.dispatch(&request);
                if close {
                    response.push_header("Connection", "close");
                }

                stream
                    .write_all(&serialize_response(&response))
                    .context("failed to write response")?;

                if close {
                    debug!("client requested close");
                    return Ok(());
                }
            }
            Err(ParseError::Incomplete) => {
                let mut chunk = [0u8; BUFFER_SIZE];
                let n = stream.read(&mut chunk).context("socket read failed")?;
                if n == 0 {
                    // Zero-length read is the normal end of a connection,
                    // unless it cut a buffered request short.
                    anyhow::ensure!(
                        buf.is_empty(),
                        "peer closed mid-request with {} bytes buffered",
                        buf.len()
                    );
                    return Ok(());
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            Err(error) => {
                let response = match &error {
                    ParseError::UnsupportedMethod(_) => http::method_not_allowed(),
                    _ => http::bad_request(),
                };
                stream
                    .write_all(&serialize_response(&response))
                    .context("failed to write error response")?;
                return Err(error).context("rejected request");
            }
        }
    }
}

/// Wire bytes for a response. Content-Length is emitted only when a body is
/// present, and always reflects the exact byte count being sent.
pub fn serialize_response(response: &Response) -> Vec<u8> {
    let content_len = response.content.as_ref().map(|c| c.len()).unwrap_or(0);
    let mut bytes = Vec::with_capacity(content_len + response.headers.len() * 32 + 64);

    bytes.extend(
        format!(
            "{HTTP_VERSION} {} {}\r\n",
            response.status.code_num, response.status.message
        )
        .as_bytes(),
    );

    for (key, value) in &response.headers {
        bytes.extend(format!("{key}: {value}\r\n").as_bytes());
    }

    if let Some(c) = &response.content {
        bytes.extend(format!("Content-Length: {}\r\n", c.len()).as_bytes());
        bytes.extend(b"\r\n");
        bytes.extend(c);
    } else {
        bytes.extend(b"\r\n");
    }

    bytes
}
