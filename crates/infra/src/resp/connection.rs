//! Buffered TCP connection speaking the store's wire protocol.

use std::time::Duration;

use kvscribe_domain::{Result, ScribeError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::codec::{decode, RespValue};
use crate::errors::InfraError;

const READ_CHUNK: usize = 4096;

/// One established connection to the store.
///
/// Replies are accumulated in an internal buffer so frames split across TCP
/// reads reassemble transparently.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    buf: Vec<u8>,
}

impl Connection {
    /// Opens a TCP connection to `addr`, giving up after `connect_timeout`.
    pub async fn connect(addr: &str, connect_timeout: Duration) -> Result<Self> {
        let stream = tokio::time::timeout(connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| ScribeError::StoreUnavailable(format!("connect to {addr} timed out")))?
            .map_err(InfraError::from)?;

        tracing::debug!(%addr, "connected to store");
        Ok(Connection { stream, buf: Vec::new() })
    }

    /// Sends one encoded command and reads back exactly one reply frame.
    pub async fn round_trip(&mut self, command: &[u8]) -> Result<RespValue> {
        self.stream.write_all(command).await.map_err(InfraError::from)?;

        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some((reply, consumed)) = decode(&self.buf)? {
                self.buf.drain(..consumed);
                return Ok(reply);
            }

            let n = self.stream.read(&mut chunk).await.map_err(InfraError::from)?;
            if n == 0 {
                return Err(ScribeError::StoreUnavailable(
                    "store closed the connection mid-reply".into(),
                ));
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }
}
