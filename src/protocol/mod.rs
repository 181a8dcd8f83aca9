//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (plain text)
//!
//! ### Request Format
//! ```text
//! <TAG>[ <arg1>[ <arg2>]]\n
//! ```
//!
//! One frame per socket read, at most 128 bytes. Tags are uppercase
//! and case-sensitive:
//! - GET <key>
//! - SET <key> <value>
//! - DEL <key>
//!
//! ### Responses
//! ```text
//! OK\n            success (SET, DEL)
//! OK\n<value>\n   successful GET
//! NOTFOUND\n      no such key (GET or DEL)
//! ERROR:<n>       protocol or I/O error, decimal code
//! ```
//!
//! ### Error Codes
//! - 1: OS / I/O failure
//! - 3: frame too short
//! - 5: no recognized tag
//! - 6: wrong argument count
//! - 7: too many arguments
//!
//! (2 and 4 are reserved code points with no producible failure.)

mod command;
mod response;
mod codec;

pub use command::Command;
pub use response::Response;
pub use codec::{
    encode_command, encode_response, parse_command, write_response, MAX_FRAME_SIZE, MIN_FRAME_SIZE,
};
