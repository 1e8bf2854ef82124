// Test helpers for isolated testing
// Provides a throwaway prefix and a tiny HTTP server so tests never touch
// the real system or the network.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// How the test server answers every request
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
    /// Sleep before answering, to trigger client timeouts
    pub delay: Option<Duration>,
}

impl Response {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"not here".to_vec(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Start a server on loopback that answers every request with `response`.
/// Returns the base URL (e.g. "http://127.0.0.1:12345"). Runs until the
/// test process exits.
pub fn serve(response: Response) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let response = Arc::new(response);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let response = Arc::clone(&response);
            thread::spawn(move || handle(stream, &response));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A URL on loopback where nothing is listening
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/installer.sh", port)
}

fn handle(mut stream: TcpStream, response: &Response) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    if !matches!(stream.read(&mut buf), Ok(n) if n > 0) {
        return;
    }

    if let Some(delay) = response.delay {
        thread::sleep(delay);
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&response.body);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Isolated install prefix, cleaned up on drop
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub prefix: PathBuf,
    pub bin: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let prefix = temp_dir.path().join("prefix");
        let bin = prefix.join("bin");

        Self {
            temp_dir,
            prefix,
            bin,
        }
    }

    /// Write a TOML manifest next to the prefix and return its path
    pub fn write_manifest(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(file_name);
        std::fs::write(&path, contents).expect("Failed to write manifest");
        path
    }

    pub fn installed(&self, target: &str) -> PathBuf {
        self.bin.join(target)
    }
}

/// TOML manifest for `url` installing as `target`
pub fn manifest_toml(url: &str, sha256: &str, target: &str, version: Option<&str>) -> String {
    let mut toml = format!(
        "name = \"installer-script\"\n\
         desc = \"A script to set up my environment\"\n\
         url = \"{url}\"\n\
         sha256 = \"{sha256}\"\n\
         target = \"{target}\"\n"
    );
    if let Some(version) = version {
        toml.push_str(&format!("version = \"{version}\"\n"));
    }
    toml
}

pub fn file_names(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}
