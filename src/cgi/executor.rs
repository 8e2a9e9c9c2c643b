use std::os::fd::{AsFd, OwnedFd};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use tokio::net::TcpStream;
use tokio::process::Command;
use tracing::debug;

use crate::cgi::reaper::Reaper;
use crate::http::SERVER_NAME;
use crate::http::request::Request;
use crate::http::response::{ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;

/// Environment variable carrying the request's query arguments.
pub const QUERY_STRING: &str = "QUERY_STRING";

/// One program launch: run `program` with no arguments, the server's
/// environment plus `QUERY_STRING`, and standard output on `stdout`.
#[derive(Debug)]
pub struct CgiInvocation {
    pub program: PathBuf,
    pub query_args: String,
    pub stdout: OwnedFd,
}

/// Launches CGI programs without waiting for them.
pub trait Spawner: Send + Sync {
    fn spawn(&self, invocation: CgiInvocation) -> std::io::Result<()>;
}

/// Runs programs as child processes and hands them to a [`Reaper`].
///
/// Each child gets its own copy of the environment; the server's table is
/// never modified.
#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    reaper: Reaper,
}

impl ProcessSpawner {
    pub fn new(reaper: Reaper) -> Self {
        Self { reaper }
    }
}

impl Spawner for ProcessSpawner {
    fn spawn(&self, invocation: CgiInvocation) -> std::io::Result<()> {
        let child = Command::new(&invocation.program)
            .env(QUERY_STRING, &invocation.query_args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(invocation.stdout))
            .spawn()?;

        debug!(
            pid = ?child.id(),
            program = %invocation.program.display(),
            query = %invocation.query_args,
            "Spawned CGI program"
        );

        self.reaper.adopt(child);
        Ok(())
    }
}

/// Writes the first part of the response and, for GET, starts the program.
///
/// Only the status line, `Server` and `Connection` go out; the program must
/// finish the header block. HEAD never starts the program. Returns as soon
/// as the child is launched.
pub async fn serve_dynamic(
    stream: &mut TcpStream,
    request: &Request,
    program: &Path,
    query_args: &str,
    spawner: &dyn Spawner,
) -> anyhow::Result<()> {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Server", SERVER_NAME)
        .header("Connection", "close")
        .build();
    ResponseWriter::partial(&response)
        .write_to_stream(stream)
        .await?;

    if request.is_head() {
        return Ok(());
    }

    let stdout = child_stdout(stream).context("duplicating connection for CGI output")?;

    spawner
        .spawn(CgiInvocation {
            program: program.to_path_buf(),
            query_args: query_args.to_string(),
            stdout,
        })
        .with_context(|| format!("spawning {}", program.display()))
}

/// A blocking duplicate of the connection socket.
///
/// Blocking mode is shared with the server's handle, which performs no more
/// I/O once the program is running.
fn child_stdout(stream: &TcpStream) -> std::io::Result<OwnedFd> {
    let socket = std::net::TcpStream::from(stream.as_fd().try_clone_to_owned()?);
    socket.set_nonblocking(false)?;
    Ok(OwnedFd::from(socket))
}
