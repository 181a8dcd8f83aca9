//! Protocol codec
//!
//! Frame parsing and response encoding for the wire protocol.
//!
//! A frame is one application message as delivered by a single socket
//! read; there is no length prefix and no explicit delimiter. Keys and
//! values therefore cannot contain the separator characters (space and
//! newline).

use std::io::Write;

use crate::error::{FileKvError, Result};
use super::{Command, Response};

/// Maximum inbound frame size in bytes
pub const MAX_FRAME_SIZE: usize = 128;

/// Shortest frame that can carry a tag ("GET" plus a terminator)
pub const MIN_FRAME_SIZE: usize = 4;

/// Tag probe order; on a frame containing several tags the first
/// probe that matches wins.
const TAGS: [&str; 3] = ["GET", "SET", "DEL"];

/// Token separator set on the wire
const SEPARATORS: [char; 2] = [' ', '\n'];

// =============================================================================
// Command Parsing
// =============================================================================

/// Parse one received frame into a [`Command`].
///
/// The tag is located by scanning the whole frame for the literal
/// substrings `GET`, `SET`, `DEL` (uppercase, probed in that order).
/// The frame is then split on spaces and newlines; the first token is
/// discarded as the tag position and the rest are the arguments.
///
/// Errors carry their wire code: frames under [`MIN_FRAME_SIZE`] bytes
/// (3), non-text frames and frames without a tag (5), wrong argument
/// count for the tag (6), more than two arguments (7).
pub fn parse_command(frame: &[u8]) -> Result<Command> {
    if frame.len() < MIN_FRAME_SIZE {
        return Err(FileKvError::FrameTooShort(frame.len()));
    }

    // The wire protocol is ASCII text; a frame that does not decode
    // carries no recognizable tag.
    let text = std::str::from_utf8(frame).map_err(|_| FileKvError::InvalidCommand)?;

    let tag = TAGS
        .iter()
        .copied()
        .find(|tag| text.contains(tag))
        .ok_or(FileKvError::InvalidCommand)?;

    let mut tokens = text.split(SEPARATORS).filter(|t| !t.is_empty());
    let _tag_token = tokens.next();
    let args: Vec<&str> = tokens.collect();

    if args.len() > 2 {
        return Err(FileKvError::TooManyArgs);
    }

    match (tag, args.as_slice()) {
        ("SET", [key, value]) => Ok(Command::Set {
            key: (*key).to_string(),
            value: (*value).to_string(),
        }),
        ("GET", [key]) => Ok(Command::Get {
            key: (*key).to_string(),
        }),
        ("DEL", [key]) => Ok(Command::Del {
            key: (*key).to_string(),
        }),
        _ => Err(FileKvError::MissingArgs(tag)),
    }
}

// =============================================================================
// Command Encoding (client side)
// =============================================================================

/// Encode a command as a wire frame
pub fn encode_command(command: &Command) -> Vec<u8> {
    let line = match command {
        Command::Set { key, value } => format!("SET {key} {value}\n"),
        Command::Get { key } => format!("GET {key}\n"),
        Command::Del { key } => format!("DEL {key}\n"),
    };
    line.into_bytes()
}

// =============================================================================
// Response Encoding
// =============================================================================

/// Encode a response as wire bytes.
///
/// A GET reply is a single buffer with the `OK` line ahead of the
/// value line. `ERROR` replies carry no trailing newline.
pub fn encode_response(response: &Response) -> Vec<u8> {
    match response {
        Response::Ok => b"OK\n".to_vec(),
        Response::Value(value) => {
            let mut out = Vec::with_capacity(3 + value.len() + 1);
            out.extend_from_slice(b"OK\n");
            out.extend_from_slice(value);
            out.push(b'\n');
            out
        }
        Response::NotFound => b"NOTFOUND\n".to_vec(),
        Response::Error(code) => format!("ERROR:{code}").into_bytes(),
    }
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&encode_response(response))?;
    writer.flush()?;
    Ok(())
}
