//! HTTP transport for the reflection routes.

use std::io::Read;
use std::thread::{self, JoinHandle};

use tiny_http::{Header, Request, Response, Server};

use crate::routes::{RouteResponse, route};

#[derive(Debug, thiserror::Error)]
pub enum ReflectionServerError {
    #[error("Failed to bind to port {port}: {error}")]
    BindError { port: u16, error: String },
    #[error("Failed to spawn server thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Serves the reflection routes on a background thread.
pub struct ReflectionServer {
    port: u16,
    actual_port: Option<u16>,
    handle: Option<JoinHandle<()>>,
}

impl ReflectionServer {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            actual_port: None,
            handle: None,
        }
    }

    /// Bind to localhost and start serving. Port 0 lets the OS choose.
    pub fn start(&mut self) -> Result<(), ReflectionServerError> {
        let server = Server::http(format!("127.0.0.1:{}", self.port)).map_err(|e| {
            ReflectionServerError::BindError {
                port: self.port,
                error: e.to_string(),
            }
        })?;

        let actual_port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .unwrap_or(self.port);
        self.actual_port = Some(actual_port);

        let handle = thread::Builder::new()
            .name("reflection-server".into())
            .spawn(move || Self::run_server(server))?;
        self.handle = Some(handle);

        tracing::info!(port = actual_port, "Reflection endpoint listening");
        Ok(())
    }

    /// Detach the serving thread. tiny_http has no graceful shutdown; the
    /// thread ends with the process.
    pub fn stop(&mut self) {
        self.handle.take();
    }

    pub fn actual_port(&self) -> u16 {
        self.actual_port.unwrap_or(self.port)
    }

    fn run_server(server: Server) {
        for request in server.incoming_requests() {
            if let Err(e) = Self::handle_request(request) {
                tracing::warn!("Reflection endpoint error: {e}");
            }
        }
    }

    fn handle_request(mut request: Request) -> std::io::Result<()> {
        let method = request.method().as_str().to_ascii_uppercase();
        let url = request.url().to_string();

        let mut body = String::new();
        let response = match request.as_reader().read_to_string(&mut body) {
            Ok(_) => route(&method, &url, &body),
            Err(e) => RouteResponse {
                status: 500,
                body: serde_json::json!({ "error": format!("Error: {e}") }),
            },
        };
        tracing::debug!(%method, %url, status = response.status, "Reflection request");

        let mut reply =
            Response::from_string(response.body.to_string()).with_status_code(response.status);
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
            reply = reply.with_header(header);
        }
        request.respond(reply)
    }
}

impl Drop for ReflectionServer {
    fn drop(&mut self) {
        self.stop();
    }
}
