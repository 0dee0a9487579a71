//! Wire codec for the store's reply protocol (RESP2).
//!
//! Commands are encoded as arrays of bulk strings. Replies come back as one
//! of five frame kinds, distinguished by their first byte: `+` simple string,
//! `-` error, `:` integer, `$` bulk string, `*` array.

use std::str;

use kvscribe_domain::{Result, ScribeError};

/// Upper bound on a single bulk reply.
const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Upper bound on the element count of a single array reply.
const MAX_ARRAY_LEN: usize = 1024 * 1024;

/// A single reply frame decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    /// Simple string reply, e.g. `+OK`.
    Simple(String),
    /// Error reply, e.g. `-ERR unknown command`.
    Error(String),
    /// Integer reply, e.g. `:42`.
    Integer(i64),
    /// Bulk string reply; `None` is the nil reply (`$-1`).
    Bulk(Option<Vec<u8>>),
    /// Array reply, e.g. the result of `LRANGE`.
    Array(Vec<RespValue>),
}

/// Builder for one outgoing command.
#[derive(Debug, Clone)]
pub struct Command {
    args: Vec<Vec<u8>>,
}

impl Command {
    /// Starts a command with the given verb, e.g. `Command::new("GET")`.
    pub fn new(name: &str) -> Self {
        Command { args: vec![name.as_bytes().to_vec()] }
    }

    /// Appends one argument. Numeric arguments are passed as their decimal
    /// string form, matching what the store expects.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Vec<u8>>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The command verb, for logging.
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.args[0]).into_owned()
    }

    /// Encodes the command as an array of bulk strings.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(16 * self.args.len());
        buf.extend_from_slice(format!("*{}\r\n", self.args.len()).as_bytes());
        for arg in &self.args {
            buf.extend_from_slice(format!("${}\r\n", arg.len()).as_bytes());
            buf.extend_from_slice(arg);
            buf.extend_from_slice(b"\r\n");
        }
        buf
    }
}

/// Decodes a single reply from the front of `buf`.
///
/// Returns `Ok(None)` when the buffer holds an incomplete frame and more
/// bytes are needed, or the decoded value together with the number of bytes
/// it consumed.
pub fn decode(buf: &[u8]) -> Result<Option<(RespValue, usize)>> {
    let Some((line, after_line)) = find_line(buf) else {
        return Ok(None);
    };
    let Some((&type_byte, payload)) = line.split_first() else {
        return Err(ScribeError::Protocol("empty reply line".into()));
    };

    match type_byte {
        b'+' => Ok(Some((RespValue::Simple(decode_text(payload)?), after_line))),
        b'-' => Ok(Some((RespValue::Error(decode_text(payload)?), after_line))),
        b':' => Ok(Some((RespValue::Integer(decode_integer(payload)?), after_line))),
        b'$' => decode_bulk(buf, payload, after_line),
        b'*' => decode_array(buf, payload, after_line),
        other => Err(ScribeError::Protocol(format!("unknown reply type byte {other:#04x}"))),
    }
}

/// Finds the first CRLF-terminated line in `buf`.
///
/// Returns the line without its terminator and the index just past it.
fn find_line(buf: &[u8]) -> Option<(&[u8], usize)> {
    let pos = buf.windows(2).position(|pair| pair == b"\r\n")?;
    Some((&buf[..pos], pos + 2))
}

fn decode_text(payload: &[u8]) -> Result<String> {
    str::from_utf8(payload)
        .map(str::to_owned)
        .map_err(|_| ScribeError::Protocol("reply line is not valid UTF-8".into()))
}

fn decode_integer(payload: &[u8]) -> Result<i64> {
    let text = str::from_utf8(payload)
        .map_err(|_| ScribeError::Protocol("reply line is not valid UTF-8".into()))?;
    text.parse::<i64>()
        .map_err(|_| ScribeError::Protocol(format!("invalid integer in reply: {text:?}")))
}

fn decode_bulk(buf: &[u8], payload: &[u8], offset: usize) -> Result<Option<(RespValue, usize)>> {
    let len = decode_integer(payload)?;
    if len == -1 {
        return Ok(Some((RespValue::Bulk(None), offset)));
    }
    if len < 0 {
        return Err(ScribeError::Protocol(format!("invalid bulk length {len}")));
    }

    let len = len as usize;
    if len > MAX_BULK_LEN {
        return Err(ScribeError::Protocol(format!(
            "bulk reply of {len} bytes exceeds the {MAX_BULK_LEN} byte limit"
        )));
    }

    let end = offset + len;
    if buf.len() < end + 2 {
        return Ok(None);
    }
    if &buf[end..end + 2] != b"\r\n" {
        return Err(ScribeError::Protocol("bulk reply is missing its trailing CRLF".into()));
    }

    Ok(Some((RespValue::Bulk(Some(buf[offset..end].to_vec())), end + 2)))
}

fn decode_array(buf: &[u8], payload: &[u8], mut offset: usize) -> Result<Option<(RespValue, usize)>> {
    let len = decode_integer(payload)?;
    if len < 0 {
        return Err(ScribeError::Protocol(format!("unexpected negative array length {len}")));
    }

    let len = len as usize;
    if len > MAX_ARRAY_LEN {
        return Err(ScribeError::Protocol(format!(
            "array reply of {len} elements exceeds the {MAX_ARRAY_LEN} element limit"
        )));
    }

    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        match decode(&buf[offset..])? {
            Some((item, consumed)) => {
                items.push(item);
                offset += consumed;
            }
            None => return Ok(None),
        }
    }

    Ok(Some((RespValue::Array(items), offset)))
}
