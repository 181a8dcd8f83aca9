//! End-to-end tests over a real TCP socket
//!
//! Each test binds its own server on an ephemeral port, serves on a
//! background thread, and drives the wire protocol with a plain
//! `TcpStream` client.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

use filekv::network::Server;
use filekv::{Config, Store};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn spawn_server() -> (TempDir, SocketAddr) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .listen_addr("127.0.0.1:0")
        .data_dir(temp_dir.path())
        .build();
    let store = Store::open(temp_dir.path()).unwrap();

    let server = Server::bind(config, store).unwrap();
    let addr = server.local_addr().unwrap();
    thread::spawn(move || {
        let _ = server.run();
    });

    (temp_dir, addr)
}

fn connect(addr: SocketAddr) -> TcpStream {
    let stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_millis(500)))
        .unwrap();
    stream
}

/// Send one frame and give the server time to drain it, so
/// consecutive frames do not coalesce into a single read.
fn send_frame(stream: &mut TcpStream, frame: &[u8]) {
    stream.write_all(frame).unwrap();
    thread::sleep(Duration::from_millis(50));
}

/// Read whatever reply arrives before the client timeout; an empty
/// result means the server stayed silent.
fn read_reply(stream: &mut TcpStream) -> Vec<u8> {
    let mut chunk = [0u8; 256];
    match stream.read(&mut chunk) {
        Ok(len) => chunk[..len].to_vec(),
        Err(_) => Vec::new(),
    }
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_set_replies_ok_and_persists() {
    let (dir, addr) = spawn_server();
    let mut client = connect(addr);

    send_frame(&mut client, b"SET foo bar\n");
    assert_eq!(read_reply(&mut client), b"OK\n");
    assert_eq!(std::fs::read(dir.path().join("foo")).unwrap(), b"bar");
}

#[test]
fn test_get_replies_ok_then_value() {
    let (_dir, addr) = spawn_server();
    let mut client = connect(addr);

    send_frame(&mut client, b"SET foo bar\n");
    assert_eq!(read_reply(&mut client), b"OK\n");

    send_frame(&mut client, b"GET foo\n");
    assert_eq!(read_reply(&mut client), b"OK\nbar\n");
}

#[test]
fn test_del_replies_ok_and_unlinks() {
    let (dir, addr) = spawn_server();
    let mut client = connect(addr);

    send_frame(&mut client, b"SET foo bar\n");
    assert_eq!(read_reply(&mut client), b"OK\n");

    send_frame(&mut client, b"DEL foo\n");
    assert_eq!(read_reply(&mut client), b"OK\n");
    assert!(!dir.path().join("foo").exists());

    send_frame(&mut client, b"GET foo\n");
    assert_eq!(read_reply(&mut client), b"NOTFOUND\n");
}

#[test]
fn test_get_missing_key_replies_not_found() {
    let (_dir, addr) = spawn_server();
    let mut client = connect(addr);

    send_frame(&mut client, b"GET missing\n");
    assert_eq!(read_reply(&mut client), b"NOTFOUND\n");
}

#[test]
fn test_repeated_del_replies_not_found_after_first() {
    let (_dir, addr) = spawn_server();
    let mut client = connect(addr);

    send_frame(&mut client, b"SET foo bar\n");
    assert_eq!(read_reply(&mut client), b"OK\n");

    send_frame(&mut client, b"DEL foo\n");
    assert_eq!(read_reply(&mut client), b"OK\n");

    send_frame(&mut client, b"DEL foo\n");
    assert_eq!(read_reply(&mut client), b"NOTFOUND\n");
}

#[test]
fn test_set_with_missing_value_is_dropped() {
    let (dir, addr) = spawn_server();
    let mut client = connect(addr);

    // No reply, no file, and the session keeps working.
    send_frame(&mut client, b"SET onlyone\n");
    assert_eq!(read_reply(&mut client), b"");
    assert!(!dir.path().join("onlyone").exists());

    send_frame(&mut client, b"SET foo bar\n");
    assert_eq!(read_reply(&mut client), b"OK\n");
}

#[test]
fn test_unknown_tag_is_dropped() {
    let (_dir, addr) = spawn_server();
    let mut client = connect(addr);

    send_frame(&mut client, b"HELLO world\n");
    assert_eq!(read_reply(&mut client), b"");

    send_frame(&mut client, b"GET missing\n");
    assert_eq!(read_reply(&mut client), b"NOTFOUND\n");
}

#[test]
fn test_traversal_set_replies_os_error() {
    let (_dir, addr) = spawn_server();
    let mut client = connect(addr);

    send_frame(&mut client, b"SET ../escape gotcha\n");
    assert_eq!(read_reply(&mut client), b"ERROR:1");
}

#[test]
fn test_serial_connections_share_the_store() {
    let (_dir, addr) = spawn_server();

    let mut first = connect(addr);
    send_frame(&mut first, b"SET foo bar\n");
    assert_eq!(read_reply(&mut first), b"OK\n");
    drop(first);

    // The next client is only accepted once the first session ended.
    let mut second = connect(addr);
    send_frame(&mut second, b"GET foo\n");
    assert_eq!(read_reply(&mut second), b"OK\nbar\n");
}
