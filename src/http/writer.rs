use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.0";

fn put_status_and_headers(buf: &mut BytesMut, resp: &Response) {
    // Status line
    buf.put_slice(
        format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            resp.status.as_u16(),
            resp.status.reason_phrase()
        )
        .as_bytes(),
    );

    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }
}

/// Status line, headers and the blank-line terminator.
pub fn serialize_head(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(256);
    put_status_and_headers(&mut buf, resp);
    buf.put_slice(b"\r\n");
    buf
}

/// Status line and headers without the terminator; whoever writes next
/// finishes the header block.
pub fn serialize_partial_head(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(128);
    put_status_and_headers(&mut buf, resp);
    buf
}

fn serialize_response(resp: &Response) -> BytesMut {
    let mut buf = serialize_head(resp);
    buf.put_slice(&resp.body);
    buf
}

/// Accumulates one response fragment and writes it with no partial write
/// left behind.
pub struct ResponseWriter {
    buffer: BytesMut,
    written: usize,
}

impl ResponseWriter {
    /// Full response: header block followed by the in-memory body.
    pub fn new(response: &Response) -> Self {
        Self::from_bytes(serialize_response(response))
    }

    /// Header block only, body omitted.
    pub fn head(response: &Response) -> Self {
        Self::from_bytes(serialize_head(response))
    }

    /// Unterminated header block.
    pub fn partial(response: &Response) -> Self {
        Self::from_bytes(serialize_partial_head(response))
    }

    fn from_bytes(buffer: BytesMut) -> Self {
        Self { buffer, written: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
