//! Response definitions
//!
//! Represents responses to clients.

/// A response to send to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Operation succeeded (SET, DEL)
    Ok,

    /// GET succeeded; carries the value
    Value(Vec<u8>),

    /// No such key (GET or DEL of an absent key)
    NotFound,

    /// Protocol or I/O error with its decimal wire code
    Error(u8),
}
