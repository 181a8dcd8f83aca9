//! TCP Server
//!
//! Binds the listening socket and serves connections one at a time.

use std::net::{SocketAddr, TcpListener};

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::Config;
use crate::error::{FileKvError, Result};
use crate::network::Connection;
use crate::store::Store;

/// Accept backlog; one client is served at a time
const BACKLOG: i32 = 1;

/// TCP server for filekv
pub struct Server {
    config: Config,
    store: Store,
    listener: TcpListener,
}

impl Server {
    /// Bind the listening socket described by `config`.
    ///
    /// Sets `SO_REUSEADDR` and listens with a backlog of one. Any
    /// failure here is fatal to the process.
    pub fn bind(config: Config, store: Store) -> Result<Self> {
        let addr: SocketAddr = config.listen_addr.parse().map_err(|e| {
            FileKvError::Config(format!(
                "invalid listen address {}: {}",
                config.listen_addr, e
            ))
        })?;

        let domain = match addr {
            SocketAddr::V4(_) => Domain::IPV4,
            SocketAddr::V6(_) => Domain::IPV6,
        };
        let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
        socket.set_reuse_address(true)?;
        socket.bind(&addr.into())?;
        socket.listen(BACKLOG)?;

        let listener: TcpListener = socket.into();
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            config,
            store,
            listener,
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve connections forever, one client at a time (blocking).
    ///
    /// Earlier-accepted clients complete fully before a later
    /// connection is observed. Returns only on an accept failure,
    /// which is fatal.
    pub fn run(&self) -> Result<()> {
        loop {
            tracing::info!("Waiting for connection");
            let (stream, peer) = self.listener.accept()?;
            tracing::info!("Connection from {}", peer);

            let mut connection = Connection::new(stream, &self.store);
            if let Err(e) = connection.set_idle_timeout(self.config.idle_timeout_ms) {
                tracing::warn!("Could not set idle timeout for {}: {}", peer, e);
            }
            if let Err(e) = connection.handle() {
                tracing::warn!("Session with {} ended with error: {}", peer, e);
            }
        }
    }
}
