//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{ErrorKind, Read};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::{FileKvError, Result};
use crate::protocol::{parse_command, write_response, Command, Response, MAX_FRAME_SIZE};
use crate::store::Store;

/// Handles a single client session
pub struct Connection<'a> {
    /// Accepted TCP stream
    stream: TcpStream,

    /// Store the commands run against
    store: &'a Store,

    /// Peer address for logging
    peer_addr: String,
}

impl<'a> Connection<'a> {
    /// Create a new connection handler
    pub fn new(stream: TcpStream, store: &'a Store) -> Self {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            stream,
            store,
            peer_addr,
        }
    }

    /// Configure the idle timeout for the session (0 disables it)
    pub fn set_idle_timeout(&mut self, timeout_ms: u64) -> Result<()> {
        if timeout_ms > 0 {
            self.stream
                .set_read_timeout(Some(Duration::from_millis(timeout_ms)))?;
        }
        Ok(())
    }

    /// Serve the session until the peer closes (blocking).
    ///
    /// Each iteration reads one frame, parses it, runs it against the
    /// store and replies. Frames that fail to parse are dropped
    /// without a reply; the session keeps serving subsequent frames.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        let mut frame = [0u8; MAX_FRAME_SIZE];
        loop {
            let len = match self.stream.read(&mut frame) {
                Ok(0) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Ok(len) => len,
                Err(ref e) if e.kind() == ErrorKind::NotConnected => {
                    tracing::debug!("Client {} is disconnecting", self.peer_addr);
                    return Ok(());
                }
                Err(ref e)
                    if e.kind() == ErrorKind::ConnectionReset
                        || e.kind() == ErrorKind::ConnectionAborted =>
                {
                    tracing::debug!("Connection reset by client {}", self.peer_addr);
                    return Ok(());
                }
                Err(ref e)
                    if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut =>
                {
                    // Only reachable with the idle timeout knob set.
                    tracing::debug!("Idle timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e.into());
                }
            };

            tracing::trace!("{} bytes arrived from {}", len, self.peer_addr);

            let command = match parse_command(&frame[..len]) {
                Ok(command) => command,
                Err(e) => {
                    // Unparseable frames get no reply.
                    tracing::warn!(
                        "Dropping frame from {}: {} (code {})",
                        self.peer_addr,
                        e,
                        e.wire_code()
                    );
                    continue;
                }
            };

            let response = self.execute(command);
            if let Err(e) = self.send_response(&response) {
                // The reply is lost but the session stays open for the
                // next frame.
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
            }
        }
    }

    /// Run a command against the store and build the reply
    fn execute(&self, command: Command) -> Response {
        let result = match &command {
            Command::Set { key, value } => {
                self.store.set(key, value.as_bytes()).map(|()| Response::Ok)
            }
            Command::Get { key } => self.store.get(key).map(Response::Value),
            Command::Del { key } => self.store.del(key).map(|()| Response::Ok),
        };

        match result {
            Ok(response) => response,
            Err(FileKvError::KeyNotFound) => Response::NotFound,
            Err(e) => {
                tracing::warn!("{} from {} failed: {}", command.tag(), self.peer_addr, e);
                Response::Error(e.wire_code())
            }
        }
    }

    /// Send a response to the client
    fn send_response(&mut self, response: &Response) -> Result<()> {
        write_response(&mut self.stream, response)?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
