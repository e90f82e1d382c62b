//! Blocking `ureq` transport driven from the tokio blocking pool

use super::{Body, HttpRequest, HttpResponse, Method, ProgressFn, Transport};
use crate::error::{DeskError, DeskResult};
use async_trait::async_trait;
use std::io::{self, Read};
use std::time::Duration;
use tracing::trace;
use ureq::typestate::WithBody;
use ureq::RequestBuilder;

/// Upload bodies are fed to the socket in chunks of this size so progress
/// callbacks fire at a useful rate
const UPLOAD_CHUNK: usize = 16 * 1024;

/// Transport backed by a shared `ureq` agent
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport with a global per-request timeout
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
        }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> DeskResult<HttpResponse> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| DeskError::Internal(format!("request task failed: {}", e)))?
    }
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> DeskResult<HttpResponse> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
        progress,
    } = request;

    let result = match method {
        Method::Get => with_headers(agent.get(&url), &headers).call(),
        Method::Delete => with_headers(agent.delete(&url), &headers).call(),
        Method::Post => send_body(with_headers(agent.post(&url), &headers), body, progress),
        Method::Put => send_body(with_headers(agent.put(&url), &headers), body, progress),
    };

    let mut response = result.map_err(|e| DeskError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| DeskError::Transport(format!("reading response body: {}", e)))?;

    trace!("{} {} -> {}", method.as_str(), url, status);
    Ok(HttpResponse { status, body })
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: RequestBuilder<WithBody>,
    body: Body,
    progress: Option<ProgressFn>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Body::Empty => builder.send_empty(),
        Body::Json(text) => builder
            .header("Content-Type", "application/json")
            .send(text),
        Body::Bytes { content_type, data } => {
            let builder = builder.header("Content-Type", content_type.as_str());
            match progress {
                None => builder.send(data),
                Some(progress) => {
                    let total = data.len() as u64;
                    let mut reader = ProgressReader::new(data, progress);
                    builder
                        .header("Content-Length", total.to_string().as_str())
                        .send(ureq::SendBody::from_reader(&mut reader))
                }
            }
        }
    }
}

/// Reader over an in-memory body that reports how much has been consumed
struct ProgressReader {
    data: Vec<u8>,
    position: usize,
    progress: ProgressFn,
}

impl ProgressReader {
    fn new(data: Vec<u8>, progress: ProgressFn) -> Self {
        Self {
            data,
            position: 0,
            progress,
        }
    }
}

impl Read for ProgressReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.data[self.position..];
        let n = remaining.len().min(buf.len()).min(UPLOAD_CHUNK);
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;

        if n > 0 {
            (self.progress)(self.position as u64, self.data.len() as u64);
        }
        Ok(n)
    }
}
