//! TCP-backed key-value store adapter.

use std::time::Duration;

use async_trait::async_trait;
use kvscribe_core::store::ports::KeyValueStore;
use kvscribe_domain::config::StoreConfig;
use kvscribe_domain::{Result, ScribeError};
use tokio::sync::Mutex;

use super::codec::{Command, RespValue};
use super::connection::Connection;

/// [`KeyValueStore`] implementation backed by a single TCP connection to an
/// external store speaking the RESP2 protocol.
///
/// Commands are serialized through a mutex. After a transport failure or a
/// command timeout the connection is dropped and every later command fails
/// fast until a fresh store is connected.
#[derive(Debug)]
pub struct RespStore {
    connection: Mutex<Option<Connection>>,
    command_timeout: Duration,
}

impl RespStore {
    /// Connects to the store described by `config`.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let connection = Connection::connect(&config.addr(), config.connect_timeout()).await?;
        Ok(RespStore {
            connection: Mutex::new(Some(connection)),
            command_timeout: config.command_timeout(),
        })
    }

    /// Runs one command against the connection and surfaces `-ERR` replies as
    /// [`ScribeError::Protocol`].
    async fn command(&self, command: Command) -> Result<RespValue> {
        let name = command.name();
        let encoded = command.encode();

        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or_else(|| {
            ScribeError::StoreUnavailable("connection closed after an earlier failure".into())
        })?;

        let outcome =
            tokio::time::timeout(self.command_timeout, connection.round_trip(&encoded)).await;
        let reply = match outcome {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                // The stream may hold a partial reply, drop the connection
                *guard = None;
                return Err(err);
            }
            Err(_) => {
                *guard = None;
                return Err(ScribeError::StoreUnavailable(format!("{name} timed out")));
            }
        };

        tracing::debug!(command = %name, "store round trip complete");

        // An error reply is a complete frame, the stream stays aligned
        if let RespValue::Error(message) = reply {
            return Err(ScribeError::Protocol(message));
        }
        Ok(reply)
    }
}

fn unexpected_reply(context: &str, reply: &RespValue) -> ScribeError {
    ScribeError::Protocol(format!("unexpected reply to {context}: {reply:?}"))
}

#[async_trait]
impl KeyValueStore for RespStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let reply = self.command(Command::new("GET").arg(key)).await?;
        match reply {
            RespValue::Bulk(value) => Ok(value),
            other => Err(unexpected_reply("GET", &other)),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let reply = self.command(Command::new("SET").arg(key).arg(value)).await?;
        match reply {
            RespValue::Simple(_) => Ok(()),
            other => Err(unexpected_reply("SET", &other)),
        }
    }

    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        // SETEX rejects a zero ttl, sub-second durations round up to one second
        let seconds = ttl.as_secs().max(1);
        let reply = self
            .command(Command::new("SETEX").arg(key).arg(seconds.to_string()).arg(value))
            .await?;
        match reply {
            RespValue::Simple(_) => Ok(()),
            other => Err(unexpected_reply("SETEX", &other)),
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let reply = self
            .command(Command::new("EXPIRE").arg(key).arg(ttl.as_secs().to_string()))
            .await?;
        match reply {
            RespValue::Integer(applied) => Ok(applied != 0),
            other => Err(unexpected_reply("EXPIRE", &other)),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let reply = self.command(Command::new("INCR").arg(key)).await?;
        match reply {
            RespValue::Integer(count) => Ok(count),
            other => Err(unexpected_reply("INCR", &other)),
        }
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<u64> {
        let reply = self.command(Command::new("RPUSH").arg(key).arg(value)).await?;
        match reply {
            RespValue::Integer(len) => u64::try_from(len)
                .map_err(|_| ScribeError::Protocol(format!("negative list length {len}"))),
            other => Err(unexpected_reply("RPUSH", &other)),
        }
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let reply = self
            .command(Command::new("LRANGE").arg(key).arg(start.to_string()).arg(stop.to_string()))
            .await?;
        match reply {
            RespValue::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        RespValue::Bulk(Some(bytes)) => values.push(bytes),
                        other => return Err(unexpected_reply("LRANGE element", &other)),
                    }
                }
                Ok(values)
            }
            other => Err(unexpected_reply("LRANGE", &other)),
        }
    }

    async fn flush_db(&self) -> Result<()> {
        let reply = self.command(Command::new("FLUSHDB")).await?;
        match reply {
            RespValue::Simple(_) => Ok(()),
            other => Err(unexpected_reply("FLUSHDB", &other)),
        }
    }
}
