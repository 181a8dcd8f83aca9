//! filekv CLI Client
//!
//! Command-line interface for interacting with a filekv server.

use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use clap::{Parser, Subcommand};
use filekv::protocol::{encode_command, Command};

/// How long to wait for reply bytes before assuming the server sent
/// everything it will send (parse errors get no reply at all).
const REPLY_TIMEOUT: Duration = Duration::from_millis(500);

/// filekv CLI
#[derive(Parser, Debug)]
#[command(name = "filekv-cli")]
#[command(about = "CLI for the filekv key-value server")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },
}

fn main() {
    let args = Args::parse();

    let command = match args.command {
        Commands::Get { key } => Command::Get { key },
        Commands::Set { key, value } => Command::Set { key, value },
        Commands::Del { key } => Command::Del { key },
    };

    if let Err(e) = run(&args.server, &command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Send one command frame and print whatever the server replies
fn run(server: &str, command: &Command) -> filekv::Result<()> {
    let mut stream = TcpStream::connect(server)?;
    stream.write_all(&encode_command(command))?;

    // Replies are not length-prefixed; drain until the server goes
    // quiet or closes.
    stream.set_read_timeout(Some(REPLY_TIMEOUT))?;
    let mut reply = Vec::new();
    let mut chunk = [0u8; 256];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => reply.extend_from_slice(&chunk[..n]),
            Err(ref e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                break
            }
            Err(e) => return Err(e.into()),
        }
    }

    print!("{}", String::from_utf8_lossy(&reply));
    Ok(())
}
