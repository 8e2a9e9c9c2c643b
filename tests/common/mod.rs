#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tiny::cgi::{CgiInvocation, Spawner};
use tiny::config::Config;
use tiny::server::ServerContext;
use tiny::server::listener::serve;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Remembers every launch instead of running anything.
#[derive(Default)]
pub struct RecordingSpawner {
    calls: Mutex<Vec<(PathBuf, String)>>,
}

impl RecordingSpawner {
    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&self, invocation: CgiInvocation) -> std::io::Result<()> {
        // stdout is dropped here so the client sees EOF
        self.calls
            .lock()
            .unwrap()
            .push((invocation.program, invocation.query_args));
        Ok(())
    }
}

pub fn config_for(root: &Path) -> Config {
    let mut cfg = Config::default();
    cfg.content.root = root.display().to_string();
    cfg
}

pub async fn start_server(cfg: Config, spawner: Arc<dyn Spawner>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, ServerContext::new(cfg, spawner)));
    addr
}

pub async fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut client = TcpStream::connect(addr).await.unwrap();
    client.write_all(raw).await.unwrap();
    let mut buf = Vec::new();
    client.read_to_end(&mut buf).await.unwrap();
    buf
}

pub async fn send(addr: SocketAddr, raw: &str) -> Vec<u8> {
    send_raw(addr, raw.as_bytes()).await
}

/// Splits a raw response into header text and body bytes.
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header terminator");
    (
        String::from_utf8_lossy(&raw[..end + 4]).into_owned(),
        raw[end + 4..].to_vec(),
    )
}

pub fn write_file(root: &Path, name: &str, contents: &[u8], mode: u32) -> PathBuf {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    path
}
