use std::net::SocketAddr;

use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::cgi::serve_dynamic;
use crate::content::access::{Approved, authorize};
use crate::content::resolver::{resolve_uri, uri_name};
use crate::content::static_file::serve_static;
use crate::http::error::HttpError;
use crate::http::parser::{ParseError, drain_headers, read_request_line};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::server::ServerContext;

/// One client connection, good for exactly one transaction.
///
/// Dropping the connection closes the server's handle on the socket. It is
/// never shut down, since a CGI child may still be writing to it.
pub struct Connection {
    stream: BufReader<TcpStream>,
    peer: SocketAddr,
    ctx: ServerContext,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Failed(HttpError),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, ctx: ServerContext) -> Self {
        Self {
            stream: BufReader::new(stream),
            peer,
            ctx,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the transaction to completion.
    ///
    /// Client faults are answered with an error page and still count as
    /// success; `Err` means the socket itself failed.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => self.read_request().await?,

                ConnectionState::Processing(req) => self.dispatch(&req).await?,

                ConnectionState::Failed(err) => {
                    self.send_error(err).await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<ConnectionState> {
        let max_line = self.ctx.config.server.max_line;
        let limit = self.ctx.config.server.read_timeout();
        let stream = &mut self.stream;

        let parse = async move {
            let req = match read_request_line(stream, max_line).await {
                Ok(req) => req,
                Err(ParseError::ConnectionClosed) => return Ok(ConnectionState::Closed),
                Err(ParseError::UnsupportedMethod(method)) => {
                    return Ok(ConnectionState::Failed(HttpError::NotImplemented { method }));
                }
                Err(ParseError::Io(e)) => return Err(anyhow::Error::from(e)),
            };

            drain_headers(stream, max_line).await?;
            anyhow::Ok(ConnectionState::Processing(req))
        };

        match limit {
            Some(limit) => match tokio::time::timeout(limit, parse).await {
                Ok(state) => state,
                Err(_) => {
                    warn!(peer = %self.peer, "Timed out reading request");
                    Ok(ConnectionState::Closed)
                }
            },
            None => parse.await,
        }
    }

    async fn dispatch(&mut self, req: &Request) -> anyhow::Result<ConnectionState> {
        info!(
            peer = %self.peer,
            method = req.method.as_str(),
            uri = %req.uri,
            version = %req.version,
            "Handling request"
        );

        let target = resolve_uri(&req.uri, &self.ctx.config.content);

        let approved = match authorize(target).await {
            Ok(approved) => approved,
            Err(err) => return Ok(ConnectionState::Failed(err)),
        };

        match approved {
            Approved::File { path, size } => {
                let name = uri_name(&path, &self.ctx.config.content);
                serve_static(&mut self.stream, req, &path, &name, size).await?;
            }
            Approved::Program { path, query_args } => {
                serve_dynamic(
                    self.stream.get_mut(),
                    req,
                    &path,
                    &query_args,
                    self.ctx.spawner.as_ref(),
                )
                .await?;
            }
        }

        Ok(ConnectionState::Closed)
    }

    async fn send_error(&mut self, err: HttpError) -> anyhow::Result<()> {
        let record = err.record();
        debug!(
            peer = %self.peer,
            status = record.status.as_u16(),
            cause = %record.cause,
            "Sending error page"
        );

        let response = record.into_response();
        ResponseWriter::new(&response)
            .write_to_stream(&mut self.stream)
            .await
    }
}
