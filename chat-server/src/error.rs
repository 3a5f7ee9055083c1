//! Error types for one chat session's lifetime.
//!
//! Every variant here ends only the connection that produced it; nothing in
//! this crate lets a single session's failure take down the listener or
//! another session.

use chat_protocol::CodecError;

/// Something that ended a session's read/write loop.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
	#[error("framing or decode error: {0}")]
	Codec(#[from] CodecError),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("client disconnected before completing log in")]
	LoginIncomplete,

	#[error("a chat room endpoint panicked")]
	EndpointPanicked,
}
