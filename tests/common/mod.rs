#![allow(dead_code)]

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use http_conformance::launcher::{self, ServerCommand, ServerHandle};

pub const STATIC_SERVER: &str = env!("CARGO_BIN_EXE_static-server");

pub struct ServerGuard {
    pub base_url: String,
    pub port: u16,
    pub handle: ServerHandle,
    _www: tempfile::TempDir,
}

/// A document root holding every resource of the default expectation table.
pub fn populated_www() -> Result<tempfile::TempDir> {
    let www = tempfile::tempdir().context("create www tempdir")?;
    write_file(www.path(), "index.html", b"<html><body>index</body></html>")?;
    write_file(www.path(), "foo/bar.html", b"<html><body>bar</body></html>")?;
    write_file(
        www.path(),
        "images/uchicago/logo.png",
        &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    )?;
    Ok(www)
}

fn write_file(root: &Path, rel: &str, contents: &[u8]) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("mkdir {}", parent.display()))?;
    }
    std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
}

pub fn free_port() -> Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind ephemeral port")?;
    Ok(listener.local_addr().context("read local addr")?.port())
}

pub fn static_server_command(www: &Path) -> ServerCommand {
    ServerCommand::new(
        Some(STATIC_SERVER.to_string()),
        www.to_string_lossy().into_owned(),
    )
}

pub fn spawn_static_server() -> Result<ServerGuard> {
    spawn_static_server_in(populated_www()?)
}

pub fn spawn_static_server_in(www: tempfile::TempDir) -> Result<ServerGuard> {
    let port = free_port()?;
    let handle = launcher::start(
        &static_server_command(www.path()),
        "127.0.0.1",
        port,
        Duration::from_secs(5),
    );
    let base_url = format!("http://127.0.0.1:{}", port);
    wait_for_listening(port)?;

    Ok(ServerGuard {
        base_url,
        port,
        handle,
        _www: www,
    })
}

pub fn wait_for_listening(port: u16) -> Result<()> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("static-server did not start listening on port {}", port);
        }
        if std::net::TcpStream::connect(("127.0.0.1", port)).is_ok() {
            return Ok(());
        }
        thread::sleep(Duration::from_millis(50));
    }
}

pub fn is_listening(port: u16) -> bool {
    std::net::TcpStream::connect_timeout(
        &std::net::SocketAddr::from(([127, 0, 0, 1], port)),
        Duration::from_millis(200),
    )
    .is_ok()
}
