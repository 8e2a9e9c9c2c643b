use std::path::Path;

use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::http::SERVER_NAME;
use crate::http::mime::content_type_for;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;

/// Header block for a static file. GET and HEAD share it byte for byte.
///
/// The content type is picked from `name`, the URI-derived part of the path.
pub fn static_headers(name: &str, size: u64) -> Response {
    ResponseBuilder::new(StatusCode::Ok)
        .header("Server", SERVER_NAME)
        .header("Connection", "close")
        .header("Content-length", size.to_string())
        .header("Content-type", content_type_for(name))
        .build()
}

/// Sends the header block and, for GET, exactly `size` bytes of the file.
///
/// `size` comes from the access check; a file that shrank since then is an
/// error rather than a short body.
pub async fn serve_static<W>(
    stream: &mut W,
    request: &Request,
    path: &Path,
    name: &str,
    size: u64,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response = static_headers(name, size);
    let mut head = ResponseWriter::head(&response);
    debug!(
        path = %path.display(),
        headers = %String::from_utf8_lossy(head.as_bytes()).trim_end(),
        "Response headers"
    );
    head.write_to_stream(stream).await?;

    if request.is_head() {
        return Ok(());
    }

    let file = File::open(path)
        .await
        .with_context(|| format!("opening {}", path.display()))?;
    let mut body = file.take(size);

    let copied = tokio::io::copy(&mut body, stream).await?;
    if copied != size {
        anyhow::bail!(
            "{} shrank while sending: announced {} bytes, sent {}",
            path.display(),
            size,
            copied
        );
    }
    stream.flush().await?;

    Ok(())
}
