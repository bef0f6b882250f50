//! Demo HTTP server feeding [`Response`] values to a real TCP connection.
//!
//! This is not a web server: the request is read and discarded, and every
//! client gets the same welcome page. The point is to show a sink
//! implementation that frames the emission as an HTTP/1.1 message, with the
//! library doing the status/header/body bookkeeping.
//!
//! Run with `cargo run --example serve`, then `curl -i localhost:8080`.
//! An optional `demo.toml` in the working directory overrides the defaults.

use async_std::net::{TcpListener, TcpStream};
use async_std::prelude::*;
use async_std::task;
use serde::Deserialize;
use std::io;
use std::sync::OnceLock;
use std::time::SystemTime;

use http_reply::{Response, ResponseSink, status};

static CONFIG: OnceLock<DemoConfig> = OnceLock::new();

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct DemoConfig {
    address: String,
    port: u16,
    server_name: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
            server_name: "http-reply-demo/0.1".to_string(),
        }
    }
}

impl DemoConfig {
    fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return DemoConfig::default(),
        };

        match toml::from_str::<DemoConfig>(content.as_str()) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Fail to deserialize config file {}: {err}", path);
                eprintln!("Fall back to default config");
                DemoConfig::default()
            }
        }
    }
}

fn config() -> &'static DemoConfig {
    CONFIG.get().expect("Config not initialized")
}

/// Sink that frames the emission as an HTTP/1.1 message.
///
/// The serialized bytes are collected in memory and shipped to the socket
/// in one piece after `send` completes.
struct HttpSink {
    head: String,
    body: String,
}

impl HttpSink {
    fn new() -> Self {
        Self {
            head: String::new(),
            body: String::new(),
        }
    }

    fn finish(self) -> Vec<u8> {
        format!("{}\r\n{}", self.head, self.body).into_bytes()
    }
}

impl ResponseSink for HttpSink {
    fn status_code(&mut self, code: u16) -> io::Result<()> {
        let reason = status::reason_phrase(code).unwrap_or(status::UNKNOWN_REASON);
        self.head
            .push_str(&format!("HTTP/1.1 {} {}\r\n", code, reason));
        Ok(())
    }

    fn line(&mut self, line: &str) -> io::Result<()> {
        // The status announcement already produced the HTTP status line;
        // drop the CGI-style "Status:" line the way a web server would.
        if line.starts_with("Status:") {
            return Ok(());
        }
        self.head.push_str(line);
        self.head.push_str("\r\n");
        Ok(())
    }

    fn payload(&mut self, body: &str) -> io::Result<()> {
        self.body.push_str(body);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn welcome() -> Result<Response, http_reply::Error> {
    let body = format!("<h1>Welcome to {}!</h1>", config().server_name);

    let mut response = Response::new();
    response
        .set_header("Content-Type", "text/html", false)?
        .set_header("Content-Length", body.len(), false)?
        .set_header("Server", config().server_name.as_str(), false)?
        .set_header("Date", httpdate::fmt_http_date(SystemTime::now()), false)?
        .set_body(body);
    Ok(response)
}

async fn handle_client(mut stream: TcpStream) {
    // Drain the request head; the demo answers everything the same way.
    let mut buffer = vec![0u8; 4096];
    if stream.read(&mut buffer).await.is_err() {
        return;
    }

    let response = match welcome() {
        Ok(response) => response,
        Err(err) => {
            eprintln!("Fail to build response: {err}");
            return;
        }
    };

    let mut sink = HttpSink::new();
    if response.send(&mut sink).is_err() {
        return;
    }

    if let Err(err) = stream.write_all(&sink.finish()).await {
        eprintln!("Fail to write response: {err}");
    }
}

fn main() -> io::Result<()> {
    CONFIG
        .set(DemoConfig::from_file("demo.toml"))
        .expect("Config already set");

    task::block_on(async {
        let listener = TcpListener::bind((config().address.as_str(), config().port)).await?;
        println!("Listening on {}:{}", config().address, config().port);

        while let Ok((stream, _addr)) = listener.accept().await {
            task::spawn(handle_client(stream));
        }

        Ok(())
    })
}
