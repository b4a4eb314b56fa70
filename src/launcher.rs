use std::net::{TcpStream, ToSocketAddrs};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

const READY_POLL_INTERVAL: Duration = Duration::from_millis(50);
const CONNECT_TIMEOUT: Duration = Duration::from_millis(200);

/// How to start the server under test: `[launcher?, identifier, --serverPort=<port>]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerCommand {
    launcher: Option<String>,
    identifier: String,
}

impl ServerCommand {
    pub fn new(launcher: Option<String>, identifier: impl Into<String>) -> Self {
        Self {
            launcher: launcher.filter(|l| !l.trim().is_empty()),
            identifier: identifier.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn argv(&self, port: u16) -> Vec<String> {
        let mut argv = Vec::with_capacity(3);
        if let Some(launcher) = &self.launcher {
            argv.push(launcher.clone());
        }
        argv.push(self.identifier.clone());
        argv.push(format!("--serverPort={}", port));
        argv
    }

    fn spawn(&self, port: u16) -> Result<Child> {
        let argv = self.argv(port);
        let (program, args) = argv
            .split_first()
            .context("server command has no program")?;
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| format!("spawn server {:?}", argv))
    }
}

/// Owns the server subprocess for one run.
///
/// The child is killed and reaped exactly once, either by `terminate` or on drop.
#[derive(Debug)]
pub struct ServerHandle {
    identifier: String,
    child: Option<Child>,
}

impl ServerHandle {
    /// A handle for a server that failed to start; terminating it does nothing.
    pub fn detached(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            child: None,
        }
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    pub fn terminate(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        let pid = child.id();
        if let Err(err) = child.kill() {
            // Already exited; still reap it below.
            tracing::debug!(pid, error = %err, "kill server");
        }
        match child.wait() {
            Ok(status) => {
                tracing::info!(pid, %status, server = %self.identifier, "server stopped")
            }
            Err(err) => tracing::warn!(pid, error = %err, "wait for server exit"),
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Start the server and wait until it accepts connections on `host:port`.
///
/// Never fails: a spawn error is logged and a detached handle is returned, so
/// every probe later reports the connection failure on its own. Returns once the
/// port is reachable, the child has exited, or `ready_timeout` has elapsed.
pub fn start(
    command: &ServerCommand,
    host: &str,
    port: u16,
    ready_timeout: Duration,
) -> ServerHandle {
    tracing::info!(argv = ?command.argv(port), "starting server");

    let child = match command.spawn(port) {
        Ok(child) => child,
        Err(err) => {
            tracing::error!(error = %format!("{:#}", err), "could not start server process");
            return ServerHandle::detached(command.identifier());
        }
    };
    tracing::info!(pid = child.id(), "got server process");

    let mut handle = ServerHandle {
        identifier: command.identifier().to_string(),
        child: Some(child),
    };
    wait_for_ready(&mut handle, host, port, ready_timeout);
    handle
}

fn wait_for_ready(handle: &mut ServerHandle, host: &str, port: u16, ready_timeout: Duration) {
    let start = Instant::now();
    loop {
        if accepts_connections(host, port) {
            tracing::info!(
                elapsed_ms = start.elapsed().as_millis() as u64,
                "server is accepting connections"
            );
            return;
        }
        if !handle.is_running() {
            tracing::warn!(
                server = %handle.identifier,
                "server exited before accepting connections"
            );
            return;
        }
        if start.elapsed() >= ready_timeout {
            tracing::warn!(
                timeout_ms = ready_timeout.as_millis() as u64,
                "server not reachable at {}:{} yet; probing anyway",
                host,
                port
            );
            return;
        }
        thread::sleep(READY_POLL_INTERVAL);
    }
}

fn accepts_connections(host: &str, port: u16) -> bool {
    let Ok(addrs) = (host, port).to_socket_addrs() else {
        return false;
    };
    addrs
        .into_iter()
        .any(|addr| TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT).is_ok())
}

#[cfg(test)]
#[path = "tests/launcher_tests.rs"]
mod tests;
